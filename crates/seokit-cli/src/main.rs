use anyhow::Result;
use clap::Parser;

use seokit_cli::{Cli, init_tracing, run};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    run(Cli::parse()).await
}
