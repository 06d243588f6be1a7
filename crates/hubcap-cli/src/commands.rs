//! CLI argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hubcap", version, about = "GitHub tools for LLM agents")]
pub struct Cli {
    /// GitHub token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Approval policy: a bare boolean, or a JSON map of mutating tool name
    /// to boolean (e.g. '{"createIssue": false}')
    #[arg(long)]
    pub approval: Option<String>,

    /// Scope the registry to one or more presets
    /// (code-review, issue-triage, repo-explorer, maintainer)
    #[arg(long = "preset")]
    pub presets: Vec<String>,

    /// Use a non-default API host (GitHub Enterprise)
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tools in the composed registry
    List,
    /// Print a tool's input schema as JSON
    Schema {
        /// Tool wire name, e.g. getRepository
        tool: String,
    },
    /// Invoke one tool with JSON input and print its result
    Run {
        /// Tool wire name, e.g. listIssues
        tool: String,
        /// Tool input as a JSON object
        #[arg(long)]
        input: String,
    },
}
