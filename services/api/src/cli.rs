use crate::demo::{run_demo, run_ingest, DemoArgs, IngestArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use graduate_corps::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Graduate Corps Portal",
    about = "Run the graduate corps portal service and roster tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Ingest a roster CSV for a zone and print the ingestion report
    Ingest(IngestArgs),
    /// Run an end-to-end demo covering ingestion, registration, review, and staffing
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ingest(args) => run_ingest(args),
        Command::Demo(args) => run_demo(args),
    }
}
