use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ahr-cli")]
#[command(about = "Command line interface tool for fetching Ahrefs SEO reports")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, global = true, env = "AHR_TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Report catalog and fetching
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store an API token in the OS keyring
    Login,
    /// Remove the stored API token
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a profile field (api_url, default_mode, default_limit)
    Set {
        /// Configuration field
        field: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List available reports
    List,
    /// Fetch a report for a target
    Fetch {
        /// Report name (see 'report list')
        report: String,
        /// Target domain, prefix, or URL
        #[arg(long)]
        target: String,
        /// Target interpretation: exact, domain, subdomains, or prefix
        #[arg(long)]
        mode: Option<String>,
        /// Limit the number of result rows
        #[arg(long)]
        limit: Option<u32>,
        /// Comma-separated columns to select
        #[arg(long)]
        select: Option<String>,
        /// Sort order, e.g. 'domain_rating:desc,anchor:asc'
        #[arg(long)]
        order_by: Option<String>,
        /// Row filter in 'column:OPERATOR:value' form (repeatable)
        #[arg(long = "where", action = clap::ArgAction::Append)]
        r#where: Vec<String>,
        /// Aggregate filter in 'column:OPERATOR:value' form (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        having: Vec<String>,
        /// Output format: table, json, or csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Print the request URL instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}
