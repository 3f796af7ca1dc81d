//! Logo image loading.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use thiserror::Error;
use tracing::debug;

/// Logo loading error
#[derive(Error, Debug)]
pub enum LogoError {
    #[error("Failed to read logo {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported logo format, expected PNG or JPEG")]
    UnsupportedFormat,
}

/// Encodes PNG or JPEG bytes as a `data:` URI.
pub fn logo_data_uri(bytes: &[u8]) -> Result<String, LogoError> {
    let mime = match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        _ => return Err(LogoError::UnsupportedFormat),
    };
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Reads a logo file and returns it as a `data:` URI.
pub async fn read_logo(path: impl AsRef<Path>) -> Result<String, LogoError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| LogoError::Read {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Read {} byte logo from {}", bytes.len(), path.display());
    logo_data_uri(&bytes)
}
