//! Workspace lookup: resolves human-readable workspace names to slugs.
//!
//! The workspace list is fetched on every call; nothing is cached between operations.

use serde::Deserialize;
use tracing::{error, info};

use crate::contract::DocumentApi;
use crate::error::{DocsError, DocsResult};

/// Stable numeric handle the service assigns to a workspace.
pub type WorkspaceId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub slug: String,
}

/// Body of `GET /v1/workspaces`.
#[derive(Debug, Default, Deserialize)]
pub struct WorkspacesResponse {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

/// Snapshot of the workspace list, in the order the service returned it.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceDirectory {
    workspaces: Vec<Workspace>,
}

impl WorkspaceDirectory {
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self { workspaces }
    }

    pub async fn fetch<A>(api: &A) -> DocsResult<Self>
    where
        A: DocumentApi + ?Sized,
    {
        let workspaces = api.list_workspaces().await?;
        info!(count = workspaces.len(), "Fetched workspace list");
        Ok(Self::new(workspaces))
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// Case-insensitive name lookup. With duplicate names the first in listing order wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Workspace> {
        let wanted = name.to_lowercase();
        self.workspaces
            .iter()
            .find(|ws| ws.name.to_lowercase() == wanted)
    }
}

/// Resolves `name` to its workspace slug.
///
/// A failed listing request is reported as [`DocsError::WorkspaceNotFound`] as well;
/// the underlying cause is logged.
pub async fn resolve_slug<A>(api: &A, name: &str) -> DocsResult<String>
where
    A: DocumentApi + ?Sized,
{
    let directory = match WorkspaceDirectory::fetch(api).await {
        Ok(directory) => directory,
        Err(e) => {
            error!(error = %e, workspace = name, "Failed to retrieve workspaces");
            return Err(DocsError::WorkspaceNotFound {
                name: name.to_string(),
            });
        }
    };

    match directory.find_by_name(name) {
        Some(ws) => {
            info!(workspace = name, slug = %ws.slug, "Resolved workspace slug");
            Ok(ws.slug.clone())
        }
        None => {
            error!(workspace = name, "Workspace not found");
            Err(DocsError::WorkspaceNotFound {
                name: name.to_string(),
            })
        }
    }
}
