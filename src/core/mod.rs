mod config;
mod errors;
pub mod logging;
pub use config::*;
pub use errors::*;
