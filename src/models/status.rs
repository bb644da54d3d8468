use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical application status vocabulary, in pipeline order.
pub const APPLICATION_STATUSES: [&str; 5] =
    ["Applied", "Reviewed", "Interview", "Offer", "Rejected"];

/// Maps legacy status labels to the canonical vocabulary.
///
/// Unknown labels are returned unchanged rather than coerced to a default, so
/// enum validation further down the pipeline rejects them loudly.
pub fn normalize(label: &str) -> &str {
    match label {
        "Submitted" => "Applied",
        "Under Review" => "Reviewed",
        "Interview Scheduled" => "Interview",
        "Offer Extended" => "Offer",
        "Accepted" => "Offer",
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Interview,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Parses a canonical label. Callers holding possibly-legacy input should
    /// run it through [`normalize`] first.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Applied" => Some(ApplicationStatus::Applied),
            "Reviewed" => Some(ApplicationStatus::Reviewed),
            "Interview" => Some(ApplicationStatus::Interview),
            "Offer" => Some(ApplicationStatus::Offer),
            "Rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// Normalizes and parses in one step.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::parse(normalize(label))
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
