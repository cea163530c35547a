//! Snapshot of the event that triggered the workflow run.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ActionError, Result};

/// Workflow run metadata, read from the `GITHUB_*` variables the runner sets.
#[derive(clap::Args, Debug, Clone)]
pub struct ContextArgs {
    /// JSON file holding the webhook payload of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Name of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// Commit SHA that triggered the run.
    #[arg(long, env = "GITHUB_SHA", default_value = "")]
    pub sha: String,

    /// Branch or tag ref that triggered the run.
    #[arg(long = "ref", env = "GITHUB_REF", default_value = "")]
    pub git_ref: String,

    /// Name of the workflow.
    #[arg(long, env = "GITHUB_WORKFLOW", default_value = "")]
    pub workflow: String,

    /// Identifier of the running action step.
    #[arg(long, env = "GITHUB_ACTION", default_value = "")]
    pub action: String,

    /// Login that initiated the run.
    #[arg(long, env = "GITHUB_ACTOR", default_value = "")]
    pub actor: String,

    /// Identifier of the current job.
    #[arg(long, env = "GITHUB_JOB", default_value = "")]
    pub job: String,

    /// Run number of the workflow, kept verbatim.
    #[arg(long, env = "GITHUB_RUN_NUMBER")]
    pub run_number: Option<String>,

    /// Unique id of the workflow run, kept verbatim.
    #[arg(long, env = "GITHUB_RUN_ID")]
    pub run_id: Option<String>,

    /// REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// GitHub server URL.
    #[arg(long, env = "GITHUB_SERVER_URL", default_value = "https://github.com")]
    pub server_url: String,

    /// GraphQL API URL.
    #[arg(
        long,
        env = "GITHUB_GRAPHQL_URL",
        default_value = "https://api.github.com/graphql"
    )]
    pub graphql_url: String,
}

/// Immutable execution context of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub payload: Value,
    pub event_name: String,
    pub sha: String,
    pub git_ref: String,
    pub workflow: String,
    pub action: String,
    pub actor: String,
    pub job: String,
    pub run_number: Option<String>,
    pub run_id: Option<String>,
    pub api_url: String,
    pub server_url: String,
    pub graphql_url: String,
}

impl Context {
    /// Context carrying only `payload`, with empty run metadata.
    pub fn with_payload(payload: Value) -> Self {
        Self {
            payload,
            event_name: String::new(),
            sha: String::new(),
            git_ref: String::new(),
            workflow: String::new(),
            action: String::new(),
            actor: String::new(),
            job: String::new(),
            run_number: None,
            run_id: None,
            api_url: String::new(),
            server_url: String::new(),
            graphql_url: String::new(),
        }
    }

    /// Builds the context, reading the payload from `args.event_path`.
    ///
    /// A missing event file yields an empty payload object. A file that
    /// exists but cannot be read or parsed is an error.
    pub async fn load(args: &ContextArgs) -> Result<Self> {
        let payload = match args.event_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => read_payload(path).await?,
            _ => empty_payload(),
        };

        Ok(Self {
            payload,
            event_name: args.event_name.clone(),
            sha: args.sha.clone(),
            git_ref: args.git_ref.clone(),
            workflow: args.workflow.clone(),
            action: args.action.clone(),
            actor: args.actor.clone(),
            job: args.job.clone(),
            run_number: args.run_number.clone(),
            run_id: args.run_id.clone(),
            api_url: args.api_url.clone(),
            server_url: args.server_url.clone(),
            graphql_url: args.graphql_url.clone(),
        })
    }

    /// The event payload as 2-space indented JSON.
    pub fn payload_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.payload)?)
    }
}

fn empty_payload() -> Value {
    Value::Object(Map::new())
}

async fn read_payload(path: &Path) -> Result<Value> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|source| ActionError::ReadEvent {
            path: path.to_path_buf(),
            source,
        })?;
    if !exists {
        tracing::warn!(path = %path.display(), "GITHUB_EVENT_PATH does not exist");
        return Ok(empty_payload());
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ActionError::ReadEvent {
            path: path.to_path_buf(),
            source,
        })?;
    let payload = serde_json::from_str(&raw).map_err(|source| ActionError::ParseEvent {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded event payload");
    Ok(payload)
}
