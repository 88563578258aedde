//! Explicit user confirmation for destructive actions.

/// Answer to a "are you sure?" prompt.
///
/// Chore deletion and week regeneration take this as an argument; a
/// `Declined` answer leaves all state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(value: bool) -> Self {
        if value {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}
