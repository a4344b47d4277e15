//! Host application for the QR generator: configuration, the local web
//! server with its embedded page, and the interactive terminal generator.

pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod server;

pub use bootstrap::init_foundation;
