use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A guest's reply to an invitation. Accepted from JSON in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
    #[default]
    Pending,
}

impl RsvpStatus {
    pub const ALL: [RsvpStatus; 4] = [Self::Yes, Self::No, Self::Maybe, Self::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Maybe => "Maybe",
            Self::Pending => "Pending",
        }
    }

    /// Whether the guest has answered at all.
    pub fn is_answered(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRsvpStatus(pub String);

impl fmt::Display for UnknownRsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown RSVP status '{}'", self.0)
    }
}

impl std::error::Error for UnknownRsvpStatus {}

impl FromStr for RsvpStatus {
    type Err = UnknownRsvpStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRsvpStatus(s.to_string()))
    }
}

impl TryFrom<String> for RsvpStatus {
    type Error = UnknownRsvpStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Kind of email recorded in the email log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Invitation,
    Confirmation,
}

impl EmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invitation => "invitation",
            Self::Confirmation => "confirmation",
        }
    }
}

/// Delivery status stored on an email log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
    Opened,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Opened => "opened",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsvp_status_parses_case_insensitively() {
        assert_eq!("yes".parse::<RsvpStatus>().unwrap(), RsvpStatus::Yes);
        assert_eq!(" Maybe ".parse::<RsvpStatus>().unwrap(), RsvpStatus::Maybe);
        assert!("perhaps".parse::<RsvpStatus>().is_err());
    }

    #[test]
    fn rsvp_status_serializes_as_display_name() {
        let json = serde_json::to_string(&RsvpStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
        assert!(!RsvpStatus::Pending.is_answered());
        assert!(RsvpStatus::No.is_answered());
    }

    #[test]
    fn rsvp_status_deserializes_in_any_case() {
        let status: RsvpStatus = serde_json::from_str("\"yes\"").unwrap();
        assert_eq!(status, RsvpStatus::Yes);
        let status: RsvpStatus = serde_json::from_str("\"MAYBE\"").unwrap();
        assert_eq!(status, RsvpStatus::Maybe);
        let err = serde_json::from_str::<RsvpStatus>("\"perhaps\"").unwrap_err();
        assert!(err.to_string().contains("unknown RSVP status 'perhaps'"));
    }
}
