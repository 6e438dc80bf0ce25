use crate::demo::{run_demo, run_related, DemoArgs, RelatedArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hypha_public::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "hypha-public",
    about = "Serve and preview the public site's homepage content",
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
    /// Inspect homepage sections
    Home {
        #[command(subcommand)]
        command: HomeCommand,
    },
    /// Print every homepage list resolved against the demo catalog
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum HomeCommand {
    /// Resolve the related funds, labs or RFPs for one homepage section
    Related(RelatedArgs),
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
        Command::Home {
            command: HomeCommand::Related(args),
        } => run_related(args),
        Command::Demo(args) => run_demo(args),
    }
}
