mod encoder;
mod errors;

pub use encoder::LinkEncoder;
pub use errors::EncodeError;
