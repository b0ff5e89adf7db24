use anyhow::Result;
use domainbot::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
