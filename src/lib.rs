pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod server;
pub mod types;
pub mod utils;
pub mod worker;


// Re-export commonly used items
pub use error::{ClassifydError, ClassifydResult};
