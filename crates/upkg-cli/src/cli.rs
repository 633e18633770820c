use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use upkg_core::DeploymentTarget;

#[derive(Parser)]
#[command(name = "upkg")]
#[command(about = "Scaffold Unity packages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new package in a Unity project
    New(NewArgs),

    /// List registry packages, or jump to the first one matching QUERY
    Search {
        /// Case-insensitive text to look for in display names
        query: Option<String>,

        /// Also list packages already referenced by the project
        #[arg(long)]
        include_installed: bool,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Unity project root (default: found from the current directory)
        #[arg(long)]
        project: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
    },

    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct NewArgs {
    /// Package name, e.g. Foo
    #[arg(long)]
    pub name: String,

    /// Company name, e.g. Acme (default from config)
    #[arg(long)]
    pub company: Option<String>,

    /// Author written to package.json (default from config)
    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Minimum Unity version, e.g. 2022.3 (default from config)
    #[arg(long)]
    pub unity: Option<String>,

    /// Root namespace (default: Company.Package)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Fully qualified package id (default: com.company.package)
    #[arg(long)]
    pub id: Option<String>,

    /// Display name (default: Company.Package)
    #[arg(long)]
    pub display_name: Option<String>,

    /// local: next to Assets/, embedded: inside Packages/
    #[arg(long)]
    pub target: Option<DeploymentTarget>,

    /// Unity project root (default: found from the current directory)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Dependency as NAME or NAME@VERSION; repeatable
    #[arg(long = "dep")]
    pub deps: Vec<String>,

    /// Take dependency versions from --dep as given instead of querying the registry
    #[arg(long)]
    pub offline: bool,

    /// Also offer packages already referenced by the project
    #[arg(long)]
    pub include_installed: bool,

    /// Print the files that would be written and stop
    #[arg(long)]
    pub dry_run: bool,
}
