use std::fmt;
use std::str::FromStr;

/// Ordering requested for a conversation listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// `-updatedAt`: most recently updated first.
    #[default]
    UpdatedDesc,
    /// `updatedAt`: least recently updated first.
    UpdatedAsc,
    /// Keep the backend's order.
    Source,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::UpdatedDesc => "-updatedAt",
            SortKey::UpdatedAsc => "updatedAt",
            SortKey::Source => "source",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-updatedAt" | "-updated_date" | "-updated_at" => Ok(SortKey::UpdatedDesc),
            "updatedAt" | "updated_date" | "updated_at" => Ok(SortKey::UpdatedAsc),
            "source" | "" => Ok(SortKey::Source),
            other => Err(format!(
                "Invalid sort key: {}. Expected: -updatedAt, updatedAt, or source",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
