//! Per-workspace document tally for the `list` operation.
//!
//! Every file in the tree is attributed to each known workspace it is pinned to.
//! A file with no pins at all is counted once as unassigned. A file whose pins
//! name only workspaces that no longer exist is in neither bucket; it is tallied
//! in [`DocumentCounts::stale`] so the gap is observable, but the printed report
//! keeps the two-bucket shape.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{info, warn};

use crate::contract::DocumentApi;
use crate::error::DocsResult;
use crate::tree::DocumentTree;
use crate::workspace::{WorkspaceDirectory, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceCount {
    pub id: WorkspaceId,
    pub name: String,
    pub documents: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCounts {
    /// One entry per known workspace, in listing order, zero when nothing is pinned.
    pub workspaces: Vec<WorkspaceCount>,
    pub unassigned: usize,
    /// Files pinned only to workspace ids missing from the directory.
    pub stale: usize,
}

impl DocumentCounts {
    pub fn for_workspace(&self, id: WorkspaceId) -> Option<usize> {
        self.workspaces
            .iter()
            .find(|ws| ws.id == id)
            .map(|ws| ws.documents)
    }
}

impl fmt::Display for DocumentCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ws in &self.workspaces {
            writeln!(f, "Workspace: {}, Documents: {}", ws.name, ws.documents)?;
        }
        write!(f, "Unassigned Documents: {}", self.unassigned)
    }
}

/// Tallies `tree` against the workspaces in `directory`.
pub fn count(tree: &DocumentTree, directory: &WorkspaceDirectory) -> DocumentCounts {
    let mut per_workspace: HashMap<WorkspaceId, usize> = directory
        .workspaces()
        .iter()
        .map(|ws| (ws.id, 0))
        .collect();
    let mut unassigned = 0;
    let mut stale = 0;

    tree.for_each_file(|file, _| {
        if file.pinned_workspaces.is_empty() {
            unassigned += 1;
            return;
        }

        let mut seen = HashSet::new();
        let mut known = 0;
        for id in &file.pinned_workspaces {
            if !seen.insert(*id) {
                continue;
            }
            if let Some(counter) = per_workspace.get_mut(id) {
                *counter += 1;
                known += 1;
            }
        }
        if known == 0 {
            stale += 1;
        }
    });

    if stale > 0 {
        warn!(
            stale,
            "Files pinned only to unknown workspaces are excluded from all counts"
        );
    }

    let workspaces = directory
        .workspaces()
        .iter()
        .map(|ws| WorkspaceCount {
            id: ws.id,
            name: ws.name.clone(),
            documents: per_workspace.get(&ws.id).copied().unwrap_or_default(),
        })
        .collect();

    DocumentCounts {
        workspaces,
        unassigned,
        stale,
    }
}

/// Fetches workspaces and documents, then counts documents per workspace.
pub async fn list_document_counts<A>(api: &A) -> DocsResult<DocumentCounts>
where
    A: DocumentApi + ?Sized,
{
    let directory = WorkspaceDirectory::fetch(api).await?;
    let tree = api.list_documents().await?;
    info!(files = tree.file_count(), "Fetched document tree");
    let counts = count(&tree, &directory);
    info!(
        workspaces = counts.workspaces.len(),
        unassigned = counts.unassigned,
        "Counted documents per workspace"
    );
    Ok(counts)
}
