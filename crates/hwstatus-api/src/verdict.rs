//! Review verdicts and their chat sentences.

use std::fmt;

/// The three review states the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Accepted by the reviewer.
    Approved,
    /// Taken for review.
    Reviewing,
    /// Returned with remarks.
    Rejected,
}

impl Verdict {
    /// Every verdict, in API order.
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Maps an API status code to its verdict.
    pub fn from_status(status: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verdict| verdict.status() == status)
    }

    /// The status code as the API spells it.
    pub const fn status(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// The sentence shown to the chat recipient.
    pub const fn sentence(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(Verdict::from_status("approved"), Some(Verdict::Approved));
        assert_eq!(Verdict::from_status("reviewing"), Some(Verdict::Reviewing));
        assert_eq!(Verdict::from_status("rejected"), Some(Verdict::Rejected));
        assert_eq!(Verdict::from_status("Approved"), None);
        assert_eq!(Verdict::from_status(""), None);
    }

    #[test]
    fn test_status_roundtrip() {
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::from_status(verdict.status()), Some(verdict));
        }
    }

    #[test]
    fn test_display_is_sentence() {
        assert_eq!(
            Verdict::Rejected.to_string(),
            "Работа проверена: у ревьюера есть замечания."
        );
    }
}
