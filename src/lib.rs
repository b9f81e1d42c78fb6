//! # Garden Log
//!
//! Server-rendered pages for keeping track of plants and the harvests
//! collected from them, backed by MongoDB.

pub mod cli;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod memory;
pub mod models;
pub mod server;
pub mod views;

pub use db::{MongoStore, PlantStore};
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use server::{router, AppState, Server, ServerConfig};
