use chrono::{DateTime, Datelike, Months, TimeDelta, Utc};

/// How often an event repeats.
///
/// `interval` is kept signed so that a non-positive value read from storage is
/// still representable; the expander refuses to step on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frequency {
    #[default]
    None,
    Daily { interval: i64 },
    Weekly { interval: i64 },
    Monthly { interval: i64 },
    Yearly { interval: i64 },
}

impl Frequency {
    /// ## Summary
    /// Builds a frequency from its stored name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str, interval: i64) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Some(Self::None),
            "daily" => Some(Self::Daily { interval }),
            "weekly" => Some(Self::Weekly { interval }),
            "monthly" => Some(Self::Monthly { interval }),
            "yearly" => Some(Self::Yearly { interval }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily { .. } => "daily",
            Self::Weekly { .. } => "weekly",
            Self::Monthly { .. } => "monthly",
            Self::Yearly { .. } => "yearly",
        }
    }

    #[must_use]
    pub const fn interval(self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Daily { interval }
            | Self::Weekly { interval }
            | Self::Monthly { interval }
            | Self::Yearly { interval } => Some(interval),
        }
    }

    #[must_use]
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::None)
    }

    /// ## Summary
    /// Returns the start of the `step`-th repetition counted from `anchor`.
    ///
    /// Month and year arithmetic is calendar-based and always measured from the
    /// anchor, so a day-of-month that does not exist in the target month clamps to
    /// that month's last day without shifting later repetitions
    /// (Jan 31 → Feb 28 → Mar 31).
    ///
    /// Returns `None` for `Frequency::None` or when the result is not representable.
    #[must_use]
    pub fn nth(self, anchor: DateTime<Utc>, step: i64) -> Option<DateTime<Utc>> {
        match self {
            Self::None => None,
            Self::Daily { interval } => {
                anchor.checked_add_signed(TimeDelta::try_days(interval.checked_mul(step)?)?)
            }
            Self::Weekly { interval } => {
                anchor.checked_add_signed(TimeDelta::try_weeks(interval.checked_mul(step)?)?)
            }
            Self::Monthly { interval } => add_months(anchor, interval.checked_mul(step)?),
            Self::Yearly { interval } => {
                add_months(anchor, interval.checked_mul(step)?.checked_mul(12)?)
            }
        }
    }

    /// ## Summary
    /// A step index whose repetition starts strictly before `target`, at most two
    /// steps short of the last such index.
    ///
    /// Lets callers skip ahead to a distant window instead of walking every
    /// repetition since the anchor. Returns `0` when `target` is not after the
    /// anchor or the interval is not positive.
    #[must_use]
    pub fn step_before(self, anchor: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
        if target <= anchor {
            return 0;
        }
        match self {
            Self::None => 0,
            Self::Daily { interval } => fixed_steps(anchor, target, TimeDelta::try_days(interval)),
            Self::Weekly { interval } => {
                fixed_steps(anchor, target, TimeDelta::try_weeks(interval))
            }
            Self::Monthly { interval } => calendar_steps(anchor, target, interval),
            Self::Yearly { interval } => {
                calendar_steps(anchor, target, interval.saturating_mul(12))
            }
        }
    }
}

fn fixed_steps(anchor: DateTime<Utc>, target: DateTime<Utc>, step: Option<TimeDelta>) -> i64 {
    let Some(step) = step.filter(|step| *step > TimeDelta::zero()) else {
        return 0;
    };
    let gap = target.signed_duration_since(anchor).num_seconds();
    (gap / step.num_seconds()).saturating_sub(1).max(0)
}

fn calendar_steps(anchor: DateTime<Utc>, target: DateTime<Utc>, months_per_step: i64) -> i64 {
    if months_per_step <= 0 {
        return 0;
    }
    let gap = i64::from(target.year() - anchor.year()) * 12 + i64::from(target.month())
        - i64::from(anchor.month());
    (gap / months_per_step).saturating_sub(1).max(0)
}

fn add_months(anchor: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        anchor.checked_add_months(magnitude)
    } else {
        anchor.checked_sub_months(magnitude)
    }
}

/// Recurrence rule attached to a base event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Last instant at which a repetition may start (inclusive).
    pub end_date: Option<DateTime<Utc>>,
}

impl Recurrence {
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            end_date: None,
        }
    }

    #[must_use]
    pub fn until(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.frequency.is_recurring()
    }
}
