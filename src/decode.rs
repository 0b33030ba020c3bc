//! Decoding media files into pixel buffers.

use std::path::Path;

use crate::graphic::PixelBuffer;

/// Kind of media file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Movie,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
const MOVIE_EXTENSIONS: &[&str] = &["mov", "mp4", "flv", "avi", "mkv", "webm"];

/// Errors while decoding an image file.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown file type: {0}")]
    UnknownFileType(String),

    #[error("failed to decode '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{0}' has no pixels")]
    Empty(String),
}

/// Lower-cased extension of `path`, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Classify a file by its extension.
pub fn media_kind(path: &Path) -> Result<MediaKind, DecodeError> {
    let ext = extension(path);
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(MediaKind::Image)
    } else if MOVIE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(MediaKind::Movie)
    } else {
        Err(DecodeError::UnknownFileType(ext))
    }
}

/// Decode a still image into an RGBA pixel buffer.
pub fn load_image(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let img = image::open(path).map_err(|source| DecodeError::Image {
        path: path.display().to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty(path.display().to_string()));
    }
    log::info!("decoded {} ({}x{})", path.display(), width, height);
    Ok(PixelBuffer::from_rgba8(
        width as usize,
        height as usize,
        rgba.as_raw(),
    ))
}
