//! API client issuing one search request per source.

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use super::Unavailable;
use crate::config::Credentials;
use crate::models::SourceDescriptor;
use crate::utils::HttpClient;

/// Client for the third-party image APIs
///
/// Each call is a single GET with the client's timeout. There are no retries:
/// a failed attempt makes the source unavailable for that search.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(http: HttpClient, credentials: Credentials) -> Self {
        Self { http, credentials }
    }

    /// Credential store used to authenticate requests
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolve the credential for a source.
    ///
    /// `Ok(None)` means the source needs no key.
    pub fn api_key(&self, source: &SourceDescriptor) -> Result<Option<String>, Unavailable> {
        match source.api_key_env.as_deref() {
            None => Ok(None),
            Some(var) => match self.credentials.lookup(var) {
                Some(key) => Ok(Some(key)),
                None => Err(Unavailable::NoCredential(var.to_string())),
            },
        }
    }

    /// Search one source's API and return the parsed payload untouched.
    ///
    /// Sources without an API, or without a credential, fail locally without
    /// touching the network.
    pub async fn fetch(
        &self,
        source: &SourceDescriptor,
        query: &str,
        limit: u32,
    ) -> Result<Value, Unavailable> {
        let api = source.api.as_ref().ok_or(Unavailable::NoApi)?;

        let api_key = self.api_key(source).inspect_err(|e| {
            tracing::warn!("{} ({})", e, source.id);
        })?;

        let adapter = &api.adapter;
        let per_page = limit.min(adapter.max_per_page());
        let params = adapter.query_params(query, per_page, api_key.as_deref());

        let mut request = self.http.client().get(&api.url).query(&params);
        if let Some(auth) = api_key.as_deref().and_then(|key| adapter.authorization(key)) {
            request = request.header(AUTHORIZATION, auth);
        }

        tracing::info!("Making API request to {}: {}", source.id, api.url);

        let response = request.send().await.map_err(|e| {
            tracing::error!("API request failed for {}: {}", source.id, e);
            Unavailable::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("API request failed for {}: status {}", source.id, status);
            return Err(Unavailable::Transport(format!(
                "{} API returned status {}",
                source.name, status
            )));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response from {}: {}", source.id, e);
            Unavailable::Transport(e.to_string())
        })?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", source.id, e);
            Unavailable::from(e)
        })?;

        if is_empty_payload(&payload) {
            tracing::error!("Empty JSON response from {}", source.id);
            return Err(Unavailable::MalformedResponse("empty payload".to_string()));
        }

        Ok(payload)
    }
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
