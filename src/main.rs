use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cryptogate::cli::run().await
}
