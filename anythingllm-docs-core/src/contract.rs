#![allow(unused)]

//! # contract: the AnythingLLM endpoints this crate consumes
//!
//! [`DocumentApi`] is the single seam between the domain operations and the
//! network. The CLI crate implements it with a reqwest client; tests use the
//! `mockall`-generated `MockDocumentApi`.
//!
//! Implementations must map every non-2xx response to
//! [`DocsError::RemoteRequestFailed`] with the status code and the response body,
//! and every transport or decoding failure to [`DocsError::Transport`].

use async_trait::async_trait;
use mockall::{automock, predicate::*};
use serde::Serialize;

use crate::error::DocsError;
use crate::tree::DocumentTree;
use crate::workspace::Workspace;

/// Body of `POST /v1/workspace/{slug}/update-embeddings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedRequest {
    /// Document locations to embed into the workspace.
    pub adds: Vec<String>,
    /// Never populated by this tool; always sent as an empty list.
    pub deletes: Vec<String>,
}

impl EmbedRequest {
    pub fn adds(adds: Vec<String>) -> Self {
        Self {
            adds,
            deletes: Vec::new(),
        }
    }
}

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// `GET /v1/workspaces`
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, DocsError>;

    /// `GET /v1/documents`, unwrapped to the root items of `localFiles`.
    async fn list_documents(&self) -> Result<DocumentTree, DocsError>;

    /// `POST /v1/document/upload` as a multipart form with a single `file` part.
    async fn upload_document(&self, file_name: &str, content: Vec<u8>) -> Result<(), DocsError>;

    /// `POST /v1/workspace/{slug}/update-embeddings`
    async fn update_embeddings(
        &self,
        slug: &str,
        request: &EmbedRequest,
    ) -> Result<(), DocsError>;
}
