//! Wire envelopes returned by the REST API.

use serde::{Deserialize, Serialize};

/// Every response body is wrapped as `{data, message?}`.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of a list endpoint.
///
/// `count` and `total_pages` always describe the server-side result set,
/// never the length of `results`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: usize,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            count: 0,
            total_pages: 0,
        }
    }

    /// Converts every row, keeping the server-side totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            results: self.results.into_iter().map(f).collect(),
            count: self.count,
            total_pages: self.total_pages,
        }
    }
}
