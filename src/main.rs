use anyhow::Result;
use clap::Parser;
use std::time::Duration;

/// datetime-client - fetch the current date and time from a remote service
///
/// Sends `GET <URL>/datetime` and prints the result, retrying with
/// exponential backoff until the retry budget is spent.
///
/// The base URL comes from --url, then the URL environment variable,
/// then http://localhost:8001.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Service base URL (overrides the URL environment variable)
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Total retry budget in seconds
    #[arg(long = "max-elapsed", value_name = "SECS", default_value_t = 30)]
    pub max_elapsed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = datetime_client::runtime::RealRuntime;

    let datetime = datetime_client::app::run(
        &runtime,
        cli.url,
        Duration::from_secs(cli.max_elapsed),
    )
    .await?;

    println!("Current DateTime: {}", datetime);
    Ok(())
}
