use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Cannot encode an empty link")]
    EmptyInput,

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}
