// icon.rs
use eframe::egui::IconData;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why a window icon could not be used. Never fatal: the window just opens
/// without one.
#[derive(Debug)]
pub enum IconError {
    Unreadable(PathBuf, io::Error),
    Decode(PathBuf, image::ImageError),
    Empty(PathBuf),
}

impl fmt::Display for IconError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IconError::Unreadable(path, err) => {
                write!(f, "cannot read icon {}: {}", path.display(), err)
            }
            IconError::Decode(path, err) => {
                write!(f, "cannot decode icon {}: {}", path.display(), err)
            }
            IconError::Empty(path) => write!(f, "icon {} has zero size", path.display()),
        }
    }
}

impl Error for IconError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IconError::Unreadable(_, err) => Some(err),
            IconError::Decode(_, err) => Some(err),
            IconError::Empty(_) => None,
        }
    }
}

/// Read and decode an image file into RGBA icon data.
pub fn load_icon(path: &Path) -> Result<IconData, IconError> {
    let bytes = std::fs::read(path).map_err(|e| IconError::Unreadable(path.to_path_buf(), e))?;
    decode_icon(&bytes).map_err(|e| match e {
        DecodeFailure::Image(err) => IconError::Decode(path.to_path_buf(), err),
        DecodeFailure::Empty => IconError::Empty(path.to_path_buf()),
    })
}

enum DecodeFailure {
    Image(image::ImageError),
    Empty,
}

fn decode_icon(bytes: &[u8]) -> Result<IconData, DecodeFailure> {
    let rgba = image::load_from_memory(bytes)
        .map_err(DecodeFailure::Image)?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeFailure::Empty);
    }
    Ok(IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}
