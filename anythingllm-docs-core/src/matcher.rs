//! Title matching over the document tree.

use regex::Regex;
use tracing::{debug, info};

use crate::contract::DocumentApi;
use crate::error::DocsResult;
use crate::tree::{join_path, DocumentTree, FileEntry};

/// Folder the service stores uploaded documents in; used for top-level files with no location.
pub const DEFAULT_ROOT_FOLDER: &str = "custom-documents";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub title: String,
    /// `None` only when the entry has neither a location nor a name to build one from.
    pub location: Option<String>,
}

/// Compiles a user-supplied title pattern.
pub fn compile_pattern(pattern: &str) -> DocsResult<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Storage location of `file`, which sits under `folder_path`.
///
/// A non-empty `location` reported by the service wins. Otherwise the location is
/// `<folder_path>/<name>`, or `custom-documents/<name>` for files at the root.
pub fn resolve_location(file: &FileEntry, folder_path: &str) -> Option<String> {
    if let Some(location) = file.location.as_deref().filter(|l| !l.is_empty()) {
        return Some(location.to_string());
    }
    let name = file.name.as_deref()?;
    let folder = if folder_path.is_empty() {
        DEFAULT_ROOT_FOLDER
    } else {
        folder_path
    };
    Some(join_path(folder, name))
}

/// Files whose title contains a match for `pattern`, in traversal order.
///
/// Matching is unanchored and case-sensitive. Files without a title never match.
pub fn match_titles(tree: &DocumentTree, pattern: &Regex) -> Vec<MatchedFile> {
    let mut matches = Vec::new();
    tree.for_each_file(|file, folder_path| {
        let Some(title) = file.title.as_deref() else {
            return;
        };
        if !pattern.is_match(title) {
            return;
        }
        let location = resolve_location(file, folder_path);
        debug!(title, location = ?location, "Title matched pattern");
        matches.push(MatchedFile {
            title: title.to_string(),
            location,
        });
    });
    matches
}

/// Fetches the document listing and returns the files whose titles match `pattern`.
pub async fn find_matching<A>(api: &A, pattern: &Regex) -> DocsResult<Vec<MatchedFile>>
where
    A: DocumentApi + ?Sized,
{
    info!("Requesting list of all stored documents");
    let tree = api.list_documents().await?;
    let matches = match_titles(&tree, pattern);
    info!(
        pattern = pattern.as_str(),
        matched = matches.len(),
        "Applied pattern to document titles"
    );
    Ok(matches)
}
