// menuscan - menu photo nutrition analysis service

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod server;
pub mod utils;
