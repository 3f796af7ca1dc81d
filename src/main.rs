use clap::Parser;
use labelkit::cli::{run, Cli};
use labelkit::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    run(cli).await
}
