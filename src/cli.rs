use std::net::{IpAddr, SocketAddr};

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "garden-log")]
#[command(version)]
#[command(about = "A small web app for tracking plants and their harvests")]
pub struct Cli {
    /// MongoDB connection string; the path names the database
    #[arg(
        long = "mongo-uri",
        env = "MONGO_URI",
        default_value = "mongodb://localhost:27017/plantsDatabase"
    )]
    pub mongo_uri: String,

    /// Where plants and harvests are kept
    #[arg(long, env = "GARDEN_STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// Host to bind to
    #[arg(short = 'H', long, env = "GARDEN_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "GARDEN_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// MongoDB at --mongo-uri
    Mongo,
    /// In-process store, emptied on exit
    Memory,
}

impl Cli {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
