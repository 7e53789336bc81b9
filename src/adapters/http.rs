use crate::domain::model::{AnnotationList, RecordHit, SearchQuery, SearchResponse};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{OpsError, Result};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Thin client over the repository search API and the IIIF annotation API.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    client: Client,
    base_url: String,
    iiif_url: String,
}

impl RepositoryClient {
    pub fn new(
        base_url: &str,
        iiif_url: &str,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self> {
        // Local instances run on self-signed certificates.
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            iiif_url: iiif_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.iiif_url(),
            config.request_timeout(),
            config.accept_invalid_certs(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn records_url(&self) -> String {
        format!("{}/api/records", self.base_url)
    }

    pub fn annotations_url(&self, pid: &str, page_id: &str) -> String {
        format!("{}/annotations/{}/{}", self.iiif_url, pid, page_id)
    }

    /// Sends the search request and hands back the raw response whatever its
    /// status. Only transport failures are errors.
    pub async fn send_search(&self, query: &SearchQuery) -> Result<Response> {
        let url = self.records_url();
        let params = query.to_params();
        tracing::debug!("GET {} {:?}", url, params);

        let response = self.client.get(&url).query(&params).send().await?;
        tracing::debug!("Search response status: {}", response.status());
        Ok(response)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let response = self.send_search(query).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OpsError::UnexpectedStatus {
                url: self.records_url(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn search_status(&self, query: &SearchQuery) -> Result<StatusCode> {
        Ok(self.send_search(query).await?.status())
    }

    /// Newest published record, if any.
    pub async fn latest_record(&self) -> Result<Option<RecordHit>> {
        let response = self.search(&SearchQuery::newest()).await?;
        Ok(response.hits.hits.into_iter().next())
    }

    /// Annotation list for one page; `None` when the service answers 404.
    pub async fn annotations(&self, pid: &str, page_id: &str) -> Result<Option<AnnotationList>> {
        let url = self.annotations_url(pid, page_id);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(OpsError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }
        Ok(Some(response.json().await?))
    }
}
