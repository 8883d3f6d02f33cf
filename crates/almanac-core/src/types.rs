use serde::{Deserialize, Serialize};

/// Event category. Each category maps to a fixed display style.
///
/// Unknown category names read as [`EventType::Other`] so that records written
/// by newer clients still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Meeting,
    Birthday,
    Appointment,
    Social,
    Personal,
    RedDays,
    #[default]
    Other,
}

/// Display attributes for an [`EventType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTypeStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl EventType {
    pub const ALL: [Self; 7] = [
        Self::Meeting,
        Self::Birthday,
        Self::Appointment,
        Self::Social,
        Self::Personal,
        Self::RedDays,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Birthday => "birthday",
            Self::Appointment => "appointment",
            Self::Social => "social",
            Self::Personal => "personal",
            Self::RedDays => "red_days",
            Self::Other => "other",
        }
    }

    /// Case-insensitive lookup; anything unrecognised is `Other`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .unwrap_or(Self::Other)
    }

    #[must_use]
    pub const fn style(self) -> EventTypeStyle {
        match self {
            Self::Meeting => EventTypeStyle {
                label: "Meeting",
                icon: "briefcase",
                color: "#9B7EBD",
            },
            Self::Birthday => EventTypeStyle {
                label: "Birthday",
                icon: "cafe",
                color: "#FFB6C6",
            },
            Self::Appointment => EventTypeStyle {
                label: "Appointment",
                icon: "calendar",
                color: "#A8D5E2",
            },
            Self::Social => EventTypeStyle {
                label: "Social",
                icon: "people",
                color: "#E6D5F5",
            },
            Self::Personal => EventTypeStyle {
                label: "Personal",
                icon: "heart",
                color: "#FFD6E8",
            },
            Self::RedDays => EventTypeStyle {
                label: "Red Days",
                icon: "water",
                color: "#FFB5B5",
            },
            Self::Other => EventTypeStyle {
                label: "Other",
                icon: "star",
                color: "#D4AF37",
            },
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        self.style().color
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
