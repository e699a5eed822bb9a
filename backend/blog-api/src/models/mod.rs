/// Shared data structures
///
/// Most store payloads are relayed as raw JSON; the types here are the
/// ones several handlers agree on.
use serde::{Deserialize, Serialize};

/// Pagination query parameters shared by list endpoints
///
/// Both values are optional; handlers apply their own default page size
/// (absent or zero means "use the default").
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl Pagination {
    /// Effective limit, treating zero as unset
    pub fn limit_or(&self, default: usize) -> usize {
        match self.limit {
            Some(0) | None => default,
            Some(limit) => limit,
        }
    }

    pub fn offset_or_zero(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// A newsletter subscriber row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub subscribed_at: Option<String>,
    #[serde(default)]
    pub unsubscribed_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}
