pub mod args;
pub mod config;
pub mod runner;

pub use args::Args;
pub use config::Config;
pub use runner::run;
