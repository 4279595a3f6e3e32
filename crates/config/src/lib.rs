mod models;
mod defaults;
mod loader;
mod env;
mod errors;

pub use models::*;
pub use errors::ConfigError;
