pub mod filename;
pub mod path;
pub mod errors;

pub use filename::*;
pub use path::*;
pub use errors::*;
