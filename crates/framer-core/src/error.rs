use thiserror::Error;

use crate::asset::AssetRole;

#[derive(Error, Debug)]
pub enum FramerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to decode {role} image: {source}")]
    AssetDecode {
        role: AssetRole,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Delivery via {method} failed: {message}")]
    Delivery { method: String, message: String },

    #[error("All delivery methods failed: {}", .attempts.join("; "))]
    DeliveryExhausted { attempts: Vec<String> },

    #[error("Invalid config: {0}")]
    Config(String),
}

impl FramerError {
    pub fn delivery(method: impl ToString, message: impl ToString) -> Self {
        Self::Delivery {
            method: method.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FramerError>;
