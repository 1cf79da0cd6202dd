use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination and filter parameters for list requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub limit: u64,
    pub offset: u64,
    pub q: String,
    /// Value sent for `filter_name`, e.g. `"true"`.
    pub is_checked: String,
    /// Server-side filter field, e.g. `doc_annotations__isnull`. Empty means unfiltered.
    pub filter_name: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            q: String::new(),
            is_checked: String::new(),
            filter_name: String::new(),
        }
    }
}

impl SearchOptions {
    /// Merge the overrides present in `patch`.
    pub fn apply(&mut self, patch: SearchOptionsPatch) {
        if let Some(limit) = patch.limit {
            self.limit = limit;
        }
        if let Some(offset) = patch.offset {
            self.offset = offset;
        }
        if let Some(q) = patch.q {
            self.q = q;
        }
        if let Some(is_checked) = patch.is_checked {
            self.is_checked = is_checked;
        }
        if let Some(filter_name) = patch.filter_name {
            self.filter_name = filter_name;
        }
    }

    /// Query string pairs; the filter becomes `{filter_name}={is_checked}`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
            ("q".to_string(), self.q.clone()),
        ];
        if !self.filter_name.is_empty() {
            pairs.push((self.filter_name.clone(), self.is_checked.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_checked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,
}

/// Paginated list envelope; `count` is the server-side total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}
