//! Embed documents matching a title pattern into a named workspace.
//!
//! The operation runs in two phases so callers can report what is about to be
//! sent: [`prepare_embed`] resolves the workspace and collects matches without
//! writing anything, [`submit_embed`] issues the single batch write. [`embed`]
//! chains the two.

use regex::Regex;
use tracing::{error, info, warn};

use crate::contract::{DocumentApi, EmbedRequest};
use crate::error::DocsResult;
use crate::matcher::{find_matching, MatchedFile};
use crate::workspace::resolve_slug;

/// Everything needed for the write request, computed read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedPlan {
    pub workspace: String,
    pub slug: String,
    pub matched: Vec<MatchedFile>,
    pub request: EmbedRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreparedEmbed {
    /// Nothing matched; no write request will be made.
    NoMatches,
    /// Files matched but none had a usable location.
    NoLocations { matched: Vec<MatchedFile> },
    Ready(EmbedPlan),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    pub slug: String,
    pub matched: usize,
    pub sent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedOutcome {
    NoMatches,
    NoLocations { matched: usize },
    Embedded(EmbedReport),
}

/// Resolves the workspace, then matches titles. The workspace is resolved first so
/// an unknown name aborts before the document listing is fetched.
pub async fn prepare_embed<A>(
    api: &A,
    pattern: &Regex,
    workspace: &str,
) -> DocsResult<PreparedEmbed>
where
    A: DocumentApi + ?Sized,
{
    let slug = resolve_slug(api, workspace).await?;

    info!(pattern = pattern.as_str(), "Fetching document list to apply pattern");
    let matched = find_matching(api, pattern).await?;
    if matched.is_empty() {
        info!(pattern = pattern.as_str(), "No files found matching pattern");
        return Ok(PreparedEmbed::NoMatches);
    }

    let adds: Vec<String> = matched.iter().filter_map(|m| m.location.clone()).collect();
    if adds.len() < matched.len() {
        warn!(
            dropped = matched.len() - adds.len(),
            "Matched files without a usable location are skipped"
        );
    }
    if adds.is_empty() {
        return Ok(PreparedEmbed::NoLocations { matched });
    }

    Ok(PreparedEmbed::Ready(EmbedPlan {
        workspace: workspace.to_string(),
        slug,
        matched,
        request: EmbedRequest::adds(adds),
    }))
}

/// Sends the plan as one `update-embeddings` request. Not retried on failure.
pub async fn submit_embed<A>(api: &A, plan: &EmbedPlan) -> DocsResult<EmbedReport>
where
    A: DocumentApi + ?Sized,
{
    info!(
        workspace = %plan.workspace,
        slug = %plan.slug,
        adds = plan.request.adds.len(),
        "Attempting to embed files into workspace"
    );
    match api.update_embeddings(&plan.slug, &plan.request).await {
        Ok(()) => {
            info!(slug = %plan.slug, "Files successfully embedded into workspace");
            Ok(EmbedReport {
                slug: plan.slug.clone(),
                matched: plan.matched.len(),
                sent: plan.request.adds.len(),
            })
        }
        Err(e) => {
            error!(error = %e, slug = %plan.slug, "Failed to embed files into workspace");
            Err(e)
        }
    }
}

pub async fn embed<A>(api: &A, pattern: &Regex, workspace: &str) -> DocsResult<EmbedOutcome>
where
    A: DocumentApi + ?Sized,
{
    match prepare_embed(api, pattern, workspace).await? {
        PreparedEmbed::NoMatches => Ok(EmbedOutcome::NoMatches),
        PreparedEmbed::NoLocations { matched } => Ok(EmbedOutcome::NoLocations {
            matched: matched.len(),
        }),
        PreparedEmbed::Ready(plan) => submit_embed(api, &plan).await.map(EmbedOutcome::Embedded),
    }
}
