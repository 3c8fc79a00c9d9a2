//! CLI parser and command dispatch.

mod serve;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "invocr")]
#[command(about = "Local invoice OCR review console")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check CLI args for the verbose flag before the full parse, so logging
/// can be configured first.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the inference server wrapping the local OCR engine
    ServeInference {
        /// Bind address (port, host, or host:port)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Start the JSON API server
    ServeApi {
        /// Bind address (port, host, or host:port)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Start the review UI server
    ServeUi {
        /// Bind address (port, host, or host:port)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Start all three servers in one process
    ServeAll,
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Commands::ServeInference { bind } => serve::cmd_serve_inference(settings, bind).await,
        Commands::ServeApi { bind } => serve::cmd_serve_api(settings, bind).await,
        Commands::ServeUi { bind } => serve::cmd_serve_ui(settings, bind).await,
        Commands::ServeAll => serve::cmd_serve_all(settings).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors_parse() {
        assert!(Cli::try_parse_from(["invocr", "serve-inference"]).is_ok());
        assert!(Cli::try_parse_from(["invocr", "serve-api", "--bind", "9000"]).is_ok());
        assert!(Cli::try_parse_from(["invocr", "serve-ui"]).is_ok());
        assert!(Cli::try_parse_from(["invocr", "serve-all"]).is_ok());
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        assert!(Cli::try_parse_from(["invocr", "serve-everything"]).is_err());
        assert!(Cli::try_parse_from(["invocr"]).is_err());
    }
}
