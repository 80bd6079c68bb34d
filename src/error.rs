use std::path::PathBuf;

/// Errors raised while rendering or exporting an icon.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The source logo required by the logo strategy does not exist.
    #[error("source logo not found: {}", .path.display())]
    MissingAsset { path: PathBuf },

    /// Decoding, resizing or PNG encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured color is not a `#rrggbb` hex string or a known name.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("label text is empty")]
    EmptyLabel,
}

impl IconError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Fatal errors abort the run with a non-zero exit status. Everything
    /// else is a generation failure that gets reported to the user.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingAsset { .. })
    }
}
