use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unrecognized image format signature")]
    UnknownFormat,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Decode worker disconnected before reporting a result")]
    WorkerDisconnected,

    #[error("No document is loaded")]
    NoDocument,

    #[error("{command} failed: {message}")]
    FileAction { command: String, message: String },
}

pub type Result<T> = std::result::Result<T, GlanceError>;
