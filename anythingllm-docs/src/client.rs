#![doc = "AnythingLLM HTTP client: implements the core `DocumentApi` contract over reqwest."]
//
//! # AnythingLLM client (CLI <-> service)
//!
//! [`AnythingLlmClient`] is the production implementation of
//! [`anythingllm_docs_core::contract::DocumentApi`]. It owns the [`ApiConfig`]
//! built at startup and attaches the bearer token to every request.
//!
//! - Non-2xx responses become `DocsError::RemoteRequestFailed` with status and body.
//! - Connection and decoding failures become `DocsError::Transport`.
//! - No retries: each call is exactly one HTTP round-trip.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use anythingllm_docs_core::contract::{DocumentApi, EmbedRequest};
use anythingllm_docs_core::tree::{DocumentTree, DocumentsResponse};
use anythingllm_docs_core::workspace::{Workspace, WorkspacesResponse};
use anythingllm_docs_core::{ApiConfig, DocsError};

pub struct AnythingLlmClient {
    config: ApiConfig,
    http: Client,
}

impl AnythingLlmClient {
    pub fn new(config: ApiConfig) -> Self {
        tracing::info!(
            base_url = %config.base_url,
            api_key_set = !config.api_key.is_empty(),
            "Initialized AnythingLLM client"
        );
        Self {
            config,
            http: Client::new(),
        }
    }
}

fn transport(e: reqwest::Error) -> DocsError {
    DocsError::Transport(Box::new(e))
}

/// Passes 2xx responses through, turns anything else into `RemoteRequestFailed`.
async fn ensure_success(response: Response) -> Result<Response, DocsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "Request rejected by AnythingLLM");
    Err(DocsError::RemoteRequestFailed {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DocumentApi for AnythingLlmClient {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, DocsError> {
        let url = self.config.endpoint("/v1/workspaces");
        tracing::info!(url = %url, "Listing workspaces");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport)?;
        let body: WorkspacesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        tracing::info!(count = body.workspaces.len(), "Fetched workspaces");
        Ok(body.workspaces)
    }

    async fn list_documents(&self) -> Result<DocumentTree, DocsError> {
        let url = self.config.endpoint("/v1/documents");
        tracing::info!(url = %url, "Listing documents");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport)?;
        let body: DocumentsResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        Ok(body.into())
    }

    async fn upload_document(&self, file_name: &str, content: Vec<u8>) -> Result<(), DocsError> {
        let url = self.config.endpoint("/v1/document/upload");
        tracing::info!(file = file_name, size = content.len(), "Uploading document");
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn update_embeddings(
        &self,
        slug: &str,
        request: &EmbedRequest,
    ) -> Result<(), DocsError> {
        let url = self
            .config
            .endpoint(&format!("/v1/workspace/{slug}/update-embeddings"));
        tracing::info!(
            slug,
            adds = request.adds.len(),
            "Updating workspace embeddings"
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}
