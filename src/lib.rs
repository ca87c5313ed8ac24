pub mod config;
pub mod logging;
pub mod output;
pub mod pool;
pub mod scoring;
