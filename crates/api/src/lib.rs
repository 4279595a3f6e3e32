pub mod handlers;
pub mod models;
pub mod errors;
mod routes;

pub use handlers::*;
pub use models::*;
pub use errors::ApiError;
pub use routes::routes;
