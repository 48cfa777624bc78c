//! Crate-wide error type.

use std::path::PathBuf;

/// Errors produced while generating icons.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of the candidate source icons exist.
    #[error("no source icon found in {} (looked for icon.svg, icon.png, icon.jpg, icon.jpeg)", .0.display())]
    MissingInputIcon(PathBuf),

    /// A padding percentage outside the accepted range.
    #[error("padding {0} is outside the accepted range 0.0..=0.3")]
    InvalidPadding(f64),

    /// A padding stage leaves no room for its content.
    #[error("{stage} collapses to {remaining}px ({edge}px edge with {padding}px padding per side)")]
    DegenerateCanvas {
        stage: &'static str,
        edge: u32,
        padding: u32,
        remaining: i64,
    },

    /// A color that is not `#RRGGBB`.
    #[error("invalid hex color `{0}` (expected #RRGGBB)")]
    InvalidHexColor(String),

    /// A source or output raster could not be decoded or encoded.
    #[error("image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An SVG document could not be parsed.
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// A vector description could not be rasterized.
    #[error("failed to rasterize {0}")]
    Render(&'static str),

    /// Filesystem failure with the path it happened on.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failure while copying a protected tree.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The external icon tool exited unsuccessfully.
    #[error("`{command}` exited with {status}{}", format_stderr(.stderr))]
    ExternalTool {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The external icon tool could not be started.
    #[error("failed to launch `{command}`: {source}")]
    ToolLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The interactive prompt failed (closed terminal, I/O error).
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// No platform has its project scaffold in place.
    #[error("no platform is available: generate the Tauri project scaffold first")]
    NoPlatformsAvailable,

    /// Options could not be serialized or parsed.
    #[error("invalid run options: {0}")]
    Options(#[from] serde_json::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O error with the path it concerns.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
