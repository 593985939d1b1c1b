mod offers;
mod queries;
mod scan;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "offerwatch-cli")]
#[command(about = "Marketplace offer watcher command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one scan cycle now and print the outcome.
    Scan {
        /// Skip push notifications even when credentials are configured.
        #[arg(long)]
        no_notify: bool,
    },
    /// List recently detected offers.
    Offers {
        /// Case-insensitive substring filter on the title.
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Validate and print the configured search queries.
    Queries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan { no_notify } => scan::run(no_notify).await,
        Commands::Offers {
            title,
            min_price,
            max_price,
            limit,
        } => offers::run(title, min_price, max_price, limit).await,
        Commands::Queries => queries::run(),
    }
}
