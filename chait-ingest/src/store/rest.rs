//! PostgREST store
//!
//! Talks to a hosted PostgREST endpoint (`<url>/rest/v1/THESAURI`) using the
//! project access key. Upserts merge on `puri` and ask for no response body.

use super::{StoreError, ThesaurusStore};
use async_trait::async_trait;
use chait_common::record::THESAURI_TABLE;
use chait_common::ThesaurusRecord;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

const REST_PATH: &str = "rest/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

/// PostgREST code for "zero or several rows where one was expected"
const NO_SINGLE_ROW: &str = "PGRST116";

/// Error body returned by PostgREST
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    hint: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PuriRow {
    puri: String,
}

pub struct RestStore {
    table_url: String,
    headers: HeaderMap,
    client: Option<reqwest::Client>,
}

impl RestStore {
    /// Store for project `base_url` with access `key`; call `connect` before use
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Result<Self, StoreError> {
        let base_url = base_url.into();
        let key = key.into();

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&key)
            .map_err(|_| StoreError::new("Store access key is not a valid header value"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| StoreError::new("Store access key is not a valid header value"))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            table_url: format!(
                "{}/{}/{}",
                base_url.trim_end_matches('/'),
                REST_PATH,
                THESAURI_TABLE
            ),
            headers,
            client: None,
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn connected_client(&self) -> Result<&reqwest::Client, StoreError> {
        self.client.as_ref().ok_or_else(StoreError::not_connected)
    }
}

/// Turn a non-success response into a StoreError carrying PostgREST fields
async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed: PostgrestError = serde_json::from_str(&body).unwrap_or_default();

    StoreError {
        message: parsed
            .message
            .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), body.trim())),
        code: parsed.code.or_else(|| Some(status.as_u16().to_string())),
        hint: parsed.hint,
        details: parsed.details,
    }
}

#[async_trait]
impl ThesaurusStore for RestStore {
    fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    async fn connect(&mut self) -> Result<(), StoreError> {
        let client = reqwest::Client::builder()
            .default_headers(self.headers.clone())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        // Connection test
        let response = client
            .get(&self.table_url)
            .query(&[("select", "puri"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| StoreError::new(format!("Connection test failed: {}", e)))?;

        if !response.status().is_success() {
            let mut err = error_from_response(response).await;
            err.message = format!("Connection test failed: {}", err.message);
            return Err(err);
        }

        tracing::info!(url = %self.table_url, "Connected to REST store");
        self.client = Some(client);
        Ok(())
    }

    async fn find_existing(&self, puri: &str) -> Result<Option<String>, StoreError> {
        let filter = format!("eq.{}", puri);
        let response = self
            .connected_client()?
            .get(&self.table_url)
            .query(&[("select", "puri"), ("puri", filter.as_str()), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            if err.code.as_deref() == Some(NO_SINGLE_ROW) {
                return Ok(None);
            }
            return Err(err);
        }

        let rows: Vec<PuriRow> = response.json().await?;
        Ok(rows.into_iter().next().map(|row| row.puri))
    }

    async fn upsert(&self, record: &ThesaurusRecord) -> Result<(), StoreError> {
        let response = self
            .connected_client()?
            .post(&self.table_url)
            .query(&[("on_conflict", "puri")])
            .header("Prefer", UPSERT_PREFER)
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(())
    }
}
