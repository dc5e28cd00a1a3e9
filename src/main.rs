//! xcodebuild-runner CLI entry point.

use clap::Parser;

use xcodebuild_runner::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let code = match cli::execute(cli).await {
        Ok(code) => code,
        Err(err) => {
            cli::handle_error(&err, json);
            1
        }
    };

    std::process::exit(code);
}
