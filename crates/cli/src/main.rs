use clap::{Parser, Subcommand};

mod commands;

use commands::{GenerateArgs, InitDbArgs, PredictArgs, ReportArgs};

#[derive(Parser)]
#[command(name = "post-trade")]
#[command(about = "Post-trade monitoring and risk aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the trade risk report over the trailing window
    Report(ReportArgs),
    /// Insert synthetic trades for testing and demos
    Generate(GenerateArgs),
    /// Create the trades table and its indexes
    InitDb(InitDbArgs),
    /// Predict failure probability for a prospective trade
    Predict(PredictArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => commands::run_report(args).await,
        Commands::Generate(args) => commands::run_generate(args).await,
        Commands::InitDb(args) => commands::run_init_db(args).await,
        Commands::Predict(args) => commands::run_predict(&args),
    }
}
