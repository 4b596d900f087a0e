use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use whenmeet_cli::{commands::Cli, config::CliConfig};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let output = whenmeet_cli::run(cli, &config).await?;
    println!("{output}");

    Ok(())
}
