use clap::{Parser, Subcommand};
use sitewarden_domain::CliOverrides;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "sitewarden")]
#[command(version)]
#[command(about = "Sitewarden - keep a personal list of blocked sites and enforce it on navigation")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Storage file path
    #[arg(short = 's', long, value_name = "FILE")]
    storage: Option<String>,

    /// URL of the page blocked tabs are sent to
    #[arg(long)]
    blocked_page: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show every blocked domain and whether it is enabled
    List,
    /// Block a domain (URLs and www. prefixes are accepted)
    Add { domain: String },
    /// Stop tracking a domain
    Remove { domain: String },
    /// Enable or disable blocking for a listed domain
    Toggle { domain: String },
    /// Report whether a domain or URL is currently blocked
    Check { target: String },
    /// Show how input would be stored and whether it is valid
    Validate { input: String },
    /// Simulate a tab navigating to a URL and run the navigation guard
    Visit {
        url: String,

        /// Frame the navigation happens in; 0 is the top-level document
        #[arg(long, default_value_t = 0)]
        frame_id: i64,
    },
    /// Open a URL in the active tab and block its site
    AddCurrent { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        storage_path: cli.storage.clone(),
        log_level: cli.log_level.clone(),
        blocked_page_url: cli.blocked_page.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config.logging)?;
    bootstrap::log_startup(&config);

    let use_cases = di::UseCases::new(&config);

    commands::run(cli.command, &use_cases).await
}
