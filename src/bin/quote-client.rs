use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use fx_quote::client::Requestor;
use fx_quote::config::{load_or_default, validate_config, ConfigError};
use fx_quote::observability::logging;

#[derive(Parser)]
#[command(name = "quote-client")]
#[command(about = "Fetch the current bid from the quote service and save it", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Quote service URL (overrides client.server_url).
    #[arg(short, long)]
    url: Option<String>,

    /// Output file (overrides client.output_path).
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.client.server_url = url;
    }
    if let Some(output) = cli.output {
        config.client.output_path = output;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);

    let requestor = Requestor::new(config.client);
    match requestor.run().await {
        Ok(path) => {
            println!("quote saved to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
