#![doc = "anythingllm-docs-core: document management logic for AnythingLLM."]

//! This crate holds the domain logic of the `anythingllm-docs` CLI: the document
//! tree model and its traversal, workspace resolution, per-workspace counting,
//! title matching, directory upload and workspace embedding.
//!
//! No HTTP transport lives here. Every operation is generic over
//! [`contract::DocumentApi`], which the CLI crate implements with reqwest and
//! tests replace with `MockDocumentApi`.

pub mod config;
pub mod contract;
pub mod counter;
pub mod embed;
pub mod error;
pub mod matcher;
pub mod tree;
pub mod upload;
pub mod workspace;

pub use config::ApiConfig;
pub use error::{DocsError, DocsResult};
