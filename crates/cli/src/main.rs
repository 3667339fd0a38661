use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use curricula_core::DEFAULT_PORT;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "curricula")]
#[command(about = "Curriculum analysis and test generation backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (requires DATABASE_URL)
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Create tables and indexes, then exit
    Migrate,
    /// Print the rendered curriculum-parse prompt
    RenderPrompt {
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        grade: String,
        /// Curriculum text file; `-` reads stdin
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Parse a curriculum file through the model and print the validated analysis
    Parse {
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        grade: String,
        /// Curriculum text file; `-` reads stdin
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Migrate => commands::migrate::run().await,
        Commands::RenderPrompt { subject, grade, file } => {
            commands::prompt::render(&subject, &grade, &file)
        },
        Commands::Parse { subject, grade, file } => {
            commands::prompt::parse(&subject, &grade, &file).await
        },
    }
}
