//! `openapi-fetch` - generate TypeScript endpoint types from OpenAPI documents.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod generate;

#[derive(Parser, Debug)]
#[command(
    name = "openapi-fetch",
    version,
    about = "Generate typed endpoint declarations from OpenAPI documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the build-start hook for every configured input
    Generate(generate::GenerateArgs),
}

pub(crate) async fn run_cli_async<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "openapi_fetch=debug,openapi_fetch_codegen=debug"
    } else {
        "openapi_fetch=info,openapi_fetch_codegen=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let code = match Cli::try_parse() {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => {
                init_tracing(args.verbose);
                generate::run(args).await
            }
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    };
    std::process::exit(code);
}
