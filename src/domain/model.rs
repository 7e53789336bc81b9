use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one management CLI invocation. `output` holds trimmed stdout on
/// success and trimmed stderr on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub output: String,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }

    /// Case-insensitive check used to treat idempotent failures as success.
    pub fn mentions_any(&self, markers: &[&str]) -> bool {
        let lowered = self.output.to_lowercase();
        markers.iter().any(|marker| lowered.contains(marker))
    }
}

/// Parameters of `GET /api/records`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub size: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    pub fn newest() -> Self {
        Self {
            sort: Some("newest".to_string()),
            size: Some(1),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: SearchHits,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub total: HitTotal,
    #[serde(default)]
    pub hits: Vec<RecordHit>,
}

/// OpenSearch 1.x reports a bare integer, later versions `{ "value": n, ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HitTotal {
    Count(u64),
    Object {
        #[serde(default)]
        value: u64,
    },
}

impl Default for HitTotal {
    fn default() -> Self {
        HitTotal::Count(0)
    }
}

impl HitTotal {
    pub fn value(&self) -> u64 {
        match self {
            HitTotal::Count(n) => *n,
            HitTotal::Object { value } => *value,
        }
    }
}

impl SearchResponse {
    pub fn total(&self) -> u64 {
        self.hits.total.value()
    }

    pub fn record_ids(&self) -> Vec<&str> {
        self.hits
            .hits
            .iter()
            .filter_map(|hit| hit.id.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordHit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RecordHit {
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or("Unknown Title")
    }

    pub fn description(&self) -> &str {
        self.metadata
            .description
            .as_deref()
            .unwrap_or("No description")
    }
}

/// IIIF annotation list as served by the OCR annotation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationList {
    #[serde(default)]
    pub resources: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub resource: AnnotationResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationResource {
    #[serde(default)]
    pub chars: Option<String>,
}

impl AnnotationList {
    /// Non-empty `chars` of every resource, joined by single spaces.
    pub fn text(&self) -> String {
        self.resources
            .iter()
            .filter_map(|a| a.resource.chars.as_deref())
            .filter(|chars| !chars.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCase {
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub min_hits: u64,
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: String,
    pub duration: Duration,
}
