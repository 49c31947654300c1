use clap::{Parser, Subcommand};
use set_plays::commands::{run_plays, run_sort, DEFAULT_LIST_PATH};
use set_plays::{LogConfig, PlayCountClient};
use std::path::PathBuf;

/// Sum Mixcloud, SoundCloud and YouTube plays for every set in the list
#[derive(Parser)]
#[command(
    name = "set-plays",
    about = "Annotate a markdown set list with play counts",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information on stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Markdown list of sets
    #[arg(long, global = true, env = "SET_PLAYS_INPUT", default_value = DEFAULT_LIST_PATH)]
    input: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Re-order an already annotated list by play count, without fetching anything
    Sort,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    LogConfig::new(args.verbose).init();

    let mut stdout = std::io::stdout().lock();

    let result = match args.command {
        Some(Command::Sort) => run_sort(&args.input, &mut stdout),
        None => {
            let http_client = http_client::native::NativeClient::new();
            let client = PlayCountClient::new(Box::new(http_client));
            run_plays(&client, &args.input, &mut stdout).await
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
