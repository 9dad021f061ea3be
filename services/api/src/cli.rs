use crate::demo::{run_demo, DemoArgs};
use crate::priority::{run_priority_explain, run_priority_list, ExplainArgs, PriorityListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use order_priority::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Order Priority Engine",
    about = "Rank in-flight vehicle orders by risk and recommend the next best action",
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
    /// Score an order snapshot and print the daily priority list
    Priority {
        #[command(subcommand)]
        command: PriorityCommand,
    },
    /// Run the pipeline over a built-in sample order book
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PriorityCommand {
    /// Generate the ranked priority list for every active order
    List(PriorityListArgs),
    /// Show the risk breakdown and every applicable rule for one order
    Explain(ExplainArgs),
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
        Command::Priority {
            command: PriorityCommand::List(args),
        } => run_priority_list(args),
        Command::Priority {
            command: PriorityCommand::Explain(args),
        } => run_priority_explain(args),
        Command::Demo(args) => run_demo(args),
    }
}
