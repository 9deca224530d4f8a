//! FedClient Dashboard - terminal front end for training results
//!
//! Wires the results pipeline to the backend client and presents it either
//! as an interactive TUI or as plain-text console output.

pub mod app;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod logging;
pub mod router;

pub use app::{App, FetchRequest};
pub use config::DashboardConfig;
pub use router::Route;
