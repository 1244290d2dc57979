//! mathdrill CLI: run the practice server or generate quizzes offline.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mathdrill", version, about = "Math practice quiz generator and server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Seed for template question draws
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate one practice session and print it
    Quiz {
        /// Student grade
        #[arg(long, default_value = "5")]
        grade: i64,

        /// Topic (e.g. geometry, algebra, fractions)
        #[arg(long, default_value = "math")]
        topic: String,

        /// easy, medium, or hard (default follows grade)
        #[arg(long)]
        difficulty: Option<String>,

        /// Seed for template question draws
        #[arg(long)]
        seed: Option<u64>,

        /// Include expected answers
        #[arg(long)]
        show_answers: bool,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check whether an answer matches an expected answer
    Check {
        /// Expected answer
        #[arg(long, allow_hyphen_values = true)]
        expected: String,

        /// Given answer
        #[arg(long, allow_hyphen_values = true)]
        given: String,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mathdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            seed,
            config,
        } => commands::serve::execute(host, port, seed, config).await,
        Commands::Quiz {
            grade,
            topic,
            difficulty,
            seed,
            show_answers,
            format,
            config,
        } => {
            commands::quiz::execute(
                grade,
                topic,
                difficulty,
                seed,
                show_answers,
                format,
                config,
            )
            .await
        }
        Commands::Check { expected, given } => commands::check::execute(&expected, &given),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
