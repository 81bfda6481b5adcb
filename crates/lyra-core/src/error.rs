use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pipeline produced no outputs")]
    EmptyPipelineResult,

    #[error("Failed to load frame image {path}")]
    ImageLoad { path: PathBuf },

    #[error("Empty frame timeline")]
    EmptyTimeline,

    #[error("Invalid star name table: {0}")]
    InvalidNameTable(String),
}

pub type Result<T> = std::result::Result<T, LyraError>;
