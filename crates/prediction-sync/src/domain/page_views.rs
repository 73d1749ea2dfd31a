use serde::{Deserialize, Serialize};

/// Page views counted for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViews {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

impl PageViews {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            count: 0,
        }
    }
}
