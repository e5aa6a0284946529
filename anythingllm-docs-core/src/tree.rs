//! In-memory model of the document store listing returned by `GET /v1/documents`.
//!
//! The listing is a folder hierarchy of `file` and `folder` entries. It is fetched
//! fresh for every operation and never cached. [`DocumentTree::for_each_file`] is
//! the single traversal primitive used by the counter and the matcher: a
//! depth-first walk that hands every file to the visitor together with the
//! `/`-joined path of the folders enclosing it.

use serde::{Deserialize, Deserializer};

use crate::workspace::WorkspaceId;

/// One entry in the document store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentNode {
    File(FileEntry),
    Folder(FolderEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileEntry {
    /// Display name; files without one are never matched.
    #[serde(default)]
    pub title: Option<String>,
    /// Filesystem-style name, used to synthesise a location when none is given.
    #[serde(default)]
    pub name: Option<String>,
    /// Canonical storage path as reported by the service.
    #[serde(default)]
    pub location: Option<String>,
    /// Workspaces this file is embedded in. Absent, `null` and `[]` all mean unassigned.
    #[serde(
        default,
        rename = "pinnedWorkspaces",
        deserialize_with = "null_as_empty"
    )]
    pub pinned_workspaces: Vec<WorkspaceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FolderEntry {
    pub name: String,
    #[serde(default)]
    pub items: Vec<DocumentNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<WorkspaceId>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<WorkspaceId>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Body of `GET /v1/documents`.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default, rename = "localFiles")]
    pub local_files: LocalFiles,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocalFiles {
    #[serde(default)]
    pub items: Vec<DocumentNode>,
}

/// Root sequence of the document store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTree {
    pub items: Vec<DocumentNode>,
}

impl From<DocumentsResponse> for DocumentTree {
    fn from(resp: DocumentsResponse) -> Self {
        Self {
            items: resp.local_files.items,
        }
    }
}

impl DocumentTree {
    pub fn new(items: Vec<DocumentNode>) -> Self {
        Self { items }
    }

    /// Visits every file depth-first, siblings in listed order.
    ///
    /// The second visitor argument is the folder path leading to the file:
    /// empty at the root, otherwise folder names joined by `/`.
    pub fn for_each_file<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a FileEntry, &str),
    {
        walk(&self.items, "", &mut visit);
    }

    /// Number of file entries anywhere in the tree.
    pub fn file_count(&self) -> usize {
        let mut count = 0;
        self.for_each_file(|_, _| count += 1);
        count
    }
}

fn walk<'a, F>(nodes: &'a [DocumentNode], path: &str, visit: &mut F)
where
    F: FnMut(&'a FileEntry, &str),
{
    for node in nodes {
        match node {
            DocumentNode::File(file) => visit(file, path),
            DocumentNode::Folder(folder) => {
                let nested = join_path(path, &folder.name);
                walk(&folder.items, &nested, visit);
            }
        }
    }
}

/// Appends `name` to a folder path; an empty parent yields `name` with no leading separator.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
