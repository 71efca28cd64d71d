use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deacon", about = concat!("deacon v", env!("CARGO_PKG_VERSION"), " - projects that sync when they can"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the remote endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    pub remote: Option<String>,

    /// Override the offline cache file
    #[arg(long, global = true, value_name = "PATH")]
    pub cache: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List projects (syncs first)
    List,
    /// Sync with the remote endpoint and report the status
    Sync,
    /// Add a project
    Add(AddArgs),
    /// Toggle a project between done and active
    Toggle(IndexArgs),
    /// Delete a project
    Rm(IndexArgs),
    /// Ask the model to split a project into subtasks
    Breakdown(IndexArgs),
    /// Ask the model for advice on pending projects
    Advise,
    /// Ask the model for a progress report
    Report,
    /// Translate a request into a shell command
    Cmd(CmdArgs),
    /// View or edit the configuration
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct AddArgs {
    /// Project name
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
    /// Ask the model for a time estimate and append it to the name
    #[arg(long)]
    pub estimate: bool,
}

#[derive(Args)]
pub struct IndexArgs {
    /// Position as shown by `deacon list` (1-based)
    pub index: usize,
}

#[derive(Args)]
pub struct CmdArgs {
    /// What you want to do, in plain words
    #[arg(required = true, num_args = 1..)]
    pub request: Vec<String>,
    /// Run the translated command instead of only printing it
    #[arg(long)]
    pub run: bool,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a commented config file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a value, e.g. `deacon config set remote.url http://host/api/data`
    Set {
        /// Dotted key (section.field)
        key: String,
        value: String,
    },
}
