///
/// This module implements the CLI surface of anythingllm-docs: flag parsing,
/// dispatch between list / upload / embed, and user-visible progress output.
///
/// All domain logic (tree traversal, counting, matching, upload and embed
/// pipelines) lives in [`anythingllm-docs-core`]. This module is glue only.
///
/// ## Dispatch
/// - `-l` wins over everything else.
/// - `-u DIR -e PATTERN -w NAME` uploads, then embeds.
/// - `-u DIR` uploads (an `-e` without `-w` alongside it is ignored).
/// - `-e PATTERN -w NAME` embeds; `-e` without `-w` is a usage error.
/// - No flags is a usage error.
///
/// [`anythingllm-docs-core`]: ../../anythingllm-docs-core/
use crate::client::AnythingLlmClient;
use crate::load_config::load_config;
use anyhow::{Context, Result};
use anythingllm_docs_core::contract::DocumentApi;
use anythingllm_docs_core::counter::list_document_counts;
use anythingllm_docs_core::embed::{prepare_embed, submit_embed, PreparedEmbed};
use anythingllm_docs_core::matcher::compile_pattern;
use anythingllm_docs_core::upload::upload_directory;
use anythingllm_docs_core::{ApiConfig, DocsError};
use clap::Parser;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// AnythingLLM file management CLI.
#[derive(Parser, Debug, Default)]
#[clap(
    name = "anythingllm-docs",
    version,
    about = "List, upload and embed documents in AnythingLLM workspaces"
)]
pub struct Cli {
    /// List all available workspaces and their document counts
    #[clap(short = 'l')]
    pub list: bool,

    /// Upload all files in a directory (recursively)
    #[clap(short = 'u', value_name = "DIR")]
    pub upload: Option<PathBuf>,

    /// Embed documents whose title matches a regex pattern into a workspace
    #[clap(short = 'e', value_name = "PATTERN")]
    pub embed: Option<String>,

    /// Workspace name for embedding (required with -e)
    #[clap(short = 'w', value_name = "WORKSPACE")]
    pub workspace: Option<String>,

    /// Path to a YAML config file
    #[clap(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base URL, e.g. http://localhost:3001/api
    #[clap(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// What a given flag combination asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    List,
    Upload(PathBuf),
    Embed {
        pattern: String,
        workspace: String,
    },
    UploadThenEmbed {
        directory: PathBuf,
        pattern: String,
        workspace: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingWorkspace,
    NoCommand,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingWorkspace => write!(
                f,
                "Error: Embedding requires a workspace name (-w) to be specified."
            ),
            UsageError::NoCommand => write!(
                f,
                "No valid command provided. Use --help for more information."
            ),
        }
    }
}

impl std::error::Error for UsageError {}

impl Cli {
    pub fn plan(&self) -> Result<Plan, UsageError> {
        if self.list {
            return Ok(Plan::List);
        }
        match (&self.upload, &self.embed, &self.workspace) {
            (Some(directory), Some(pattern), Some(workspace)) => Ok(Plan::UploadThenEmbed {
                directory: directory.clone(),
                pattern: pattern.clone(),
                workspace: workspace.clone(),
            }),
            (Some(directory), _, _) => Ok(Plan::Upload(directory.clone())),
            (None, Some(pattern), Some(workspace)) => Ok(Plan::Embed {
                pattern: pattern.clone(),
                workspace: workspace.clone(),
            }),
            (None, Some(_), None) => Err(UsageError::MissingWorkspace),
            (None, None, _) => Err(UsageError::NoCommand),
        }
    }

    fn api_config(&self) -> Result<ApiConfig> {
        let config = load_config(self.config.as_deref())?;
        Ok(match &self.base_url {
            Some(url) => ApiConfig::new(url.as_str(), config.api_key),
            None => config,
        })
    }
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let plan = cli.plan()?;
    tracing::info!(?plan, "Resolved command plan");
    let client = AnythingLlmClient::new(cli.api_config()?);
    execute(&client, plan).await
}

/// Runs `plan` against any [`DocumentApi`], strictly one request at a time.
pub async fn execute<A>(api: &A, plan: Plan) -> Result<()>
where
    A: DocumentApi + ?Sized,
{
    match plan {
        Plan::List => list(api).await,
        Plan::Upload(directory) => upload(api, &directory).await,
        Plan::Embed { pattern, workspace } => {
            let regex = compile_pattern(&pattern)?;
            embed(api, &regex, &workspace).await
        }
        Plan::UploadThenEmbed {
            directory,
            pattern,
            workspace,
        } => {
            // A bad pattern is rejected before any file is uploaded.
            let regex = compile_pattern(&pattern)?;
            let uploaded = upload(api, &directory).await;
            let embedded = embed(api, &regex, &workspace).await;
            match (uploaded, embedded) {
                (Ok(()), embedded) => embedded,
                (Err(e), Ok(())) => Err(e.context("upload step failed")),
                (Err(upload_err), Err(embed_err)) => {
                    eprintln!("[ERROR] upload step failed: {upload_err:#}");
                    Err(embed_err)
                }
            }
        }
    }
}

async fn list<A>(api: &A) -> Result<()>
where
    A: DocumentApi + ?Sized,
{
    let counts = list_document_counts(api)
        .await
        .context("Failed to list workspaces")?;
    println!("{counts}");
    Ok(())
}

async fn upload<A>(api: &A, directory: &Path) -> Result<()>
where
    A: DocumentApi + ?Sized,
{
    let report = upload_directory(api, directory).await?;

    for name in &report.uploaded {
        println!("Uploaded file: {name}");
    }
    for failure in &report.failures {
        match &failure.error {
            DocsError::RemoteRequestFailed { status, body } => {
                println!(
                    "Failed to upload file: {}, Status: {}",
                    failure.file_name, status
                );
                println!("Response Content: {body}");
            }
            other => println!("Failed to upload file: {}, Error: {other}", failure.file_name),
        }
    }
    println!(
        "Successfully uploaded {}/{} files from directory '{}'.",
        report.succeeded(),
        report.total,
        report.directory.display()
    );

    if !report.is_complete() {
        anyhow::bail!(
            "{} of {} files failed to upload",
            report.failures.len(),
            report.total
        );
    }
    Ok(())
}

async fn embed<A>(api: &A, regex: &Regex, workspace: &str) -> Result<()>
where
    A: DocumentApi + ?Sized,
{
    let pattern = regex.as_str();
    println!("Applying regex '{pattern}' to documents for workspace '{workspace}'...");

    let plan = match prepare_embed(api, regex, workspace).await? {
        PreparedEmbed::NoMatches => {
            println!("No files found matching pattern: {pattern}");
            return Ok(());
        }
        PreparedEmbed::NoLocations { matched } => {
            println!(
                "Matched {} files but found no file locations to embed.",
                matched.len()
            );
            return Ok(());
        }
        PreparedEmbed::Ready(plan) => plan,
    };

    println!(
        "Embedding {} files matching pattern: '{}' into workspace: '{}'",
        plan.matched.len(),
        pattern,
        plan.workspace
    );
    for location in &plan.request.adds {
        println!("{location}");
    }

    let report = submit_embed(api, &plan)
        .await
        .with_context(|| format!("Failed to embed files into workspace '{}'", plan.slug))?;
    println!(
        "Successfully embedded {}/{} files into workspace '{}'.",
        report.sent, report.matched, plan.workspace
    );
    Ok(())
}
