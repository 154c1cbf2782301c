use anyhow::Context as _;

use crate::domain::repository::SearchIndexer;

/// Document ingestion into the search cluster over its REST API.
#[derive(Clone)]
pub struct HttpSearchIndexer {
    pub http: reqwest::Client,
    pub endpoint: String,
}

impl SearchIndexer for HttpSearchIndexer {
    async fn index(&self, index: &str, document: serde_json::Value) -> anyhow::Result<()> {
        let url = format!("{}/{index}/_doc", self.endpoint.trim_end_matches('/'));
        let resp = self
            .http
            .post(&url)
            .json(&document)
            .send()
            .await
            .context("send index request")?;

        if !resp.status().is_success() {
            anyhow::bail!("search index returned {}", resp.status());
        }
        Ok(())
    }
}
