use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "hall_allocator", about = "Exam hall seat allocation service")]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "HALL_ALLOCATOR_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "HALL_ALLOCATOR_LOG", default_value = "info")]
    pub log_filter: String,
}
