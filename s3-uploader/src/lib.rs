pub mod cli;
pub mod load_mapping;
pub mod upload;

pub use cli::{execute, run, Cli};
