use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aquanet")]
#[command(version, about = "AI advisory engine for the AQUANET water-monitoring suite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Get one short water-saving tip from a usage summary
    Tip {
        #[arg(help = "Plain-language summary of recent usage activity")]
        history: String,
    },

    /// Ask the grounded assistant a question
    Ask {
        #[arg(help = "The question to ask")]
        query: String,
        #[arg(
            long,
            default_value = "0",
            help = "Current daily usage in liters, passed as context"
        )]
        usage_liters: f64,
    },

    /// Get listing-copy improvement advice for a published project
    Content {
        #[arg(long, short, help = "Listing title")]
        title: String,
        #[arg(long, short, help = "Listing description")]
        description: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mAQUANET encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Tip { history } => {
            let rt = Runtime::new()?;
            rt.block_on(aquanet::cli::commands::tip::run(&history))?;
        }
        Commands::Ask { query, usage_liters } => {
            let rt = Runtime::new()?;
            rt.block_on(aquanet::cli::commands::ask::run(&query, usage_liters))?;
        }
        Commands::Content { title, description } => {
            let rt = Runtime::new()?;
            rt.block_on(aquanet::cli::commands::content::run(&title, &description))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                aquanet::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                aquanet::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                aquanet::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
