use crate::report::{
    run_batch, run_catalog, run_evaluate, run_interactive, BatchArgs, EvaluateArgs, RunArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vacant_home_diagnosis::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vacant Home Diagnosis",
    about = "Serve or run the vacant home diagnosis questionnaire from the command line",
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
    /// Answer the questionnaire interactively in the terminal
    Run(RunArgs),
    /// Diagnose a single answer sheet given on the command line
    Evaluate(EvaluateArgs),
    /// Score every respondent in an answer-sheet CSV export
    Batch(BatchArgs),
    /// Print the question catalog and the active policy
    Catalog,
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Run(args) => run_interactive(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
        Command::Catalog => run_catalog(),
    }
}
