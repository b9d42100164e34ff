pub mod cache;
pub mod config;
pub mod generate;
pub mod run_wrapper;
pub mod stats;
pub mod trace;

pub mod error;
