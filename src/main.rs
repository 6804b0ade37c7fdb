mod config;
mod data;
mod error;
mod invigilator;
mod labels;
mod partition;
mod placement;
mod report;
mod server;
mod solver;
mod store;

use clap::Parser;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = config::Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    server::run_server(config.bind).await
}
