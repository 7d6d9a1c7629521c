// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the graphics shell.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// An error from the font loading and rasterization stack.
#[derive(Debug)]
pub enum FontError {
    /// The system font database contains no usable faces.
    NoFontsAvailable,
    /// A font file could not be read.
    Read {
        /// The path of the file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The face data could not be parsed by the rasterizer.
    Parse {
        /// Message from the font parser.
        detail: String,
    },
    /// The resolved system face is not backed by a file on disk.
    NonFileBackedFace,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::NoFontsAvailable => {
                write!(f, "No usable fonts found in the system font database.")
            }
            FontError::Read { path, source } => {
                write!(f, "Failed to read font file '{}': {source}", path.display())
            }
            FontError::Parse { detail } => {
                write!(f, "Failed to parse font data: {detail}")
            }
            FontError::NonFileBackedFace => {
                write!(f, "The resolved font face is not backed by a file.")
            }
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A high-level error from the rendering shell at runtime.
#[derive(Debug)]
pub enum GraphicsError {
    /// Failed to acquire the next frame from the swapchain/surface for rendering.
    SurfaceAcquisitionFailed(String),
    /// A font operation failed.
    Font(FontError),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::SurfaceAcquisitionFailed(msg) => {
                write!(f, "Failed to acquire surface for rendering: {msg}")
            }
            GraphicsError::Font(err) => {
                write!(f, "Font operation failed: {err}")
            }
        }
    }
}

impl std::error::Error for GraphicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphicsError::Font(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FontError> for GraphicsError {
    fn from(err: FontError) -> Self {
        GraphicsError::Font(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn font_error_display() {
        let err = FontError::Read {
            path: PathBuf::from("fonts/mono.ttf"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to read font file 'fonts/mono.ttf': missing"
        );
        assert!(err.source().is_some());

        let err_parse = FontError::Parse {
            detail: "bad table".to_string(),
        };
        assert_eq!(format!("{err_parse}"), "Failed to parse font data: bad table");
    }

    #[test]
    fn graphics_error_display_wrapping_font_error() {
        let graphics_err: GraphicsError = FontError::NoFontsAvailable.into();
        assert_eq!(
            format!("{graphics_err}"),
            "Font operation failed: No usable fonts found in the system font database."
        );
        assert!(graphics_err.source().is_some());
    }

    #[test]
    fn surface_error_display() {
        let err = GraphicsError::SurfaceAcquisitionFailed("Timeout".to_string());
        assert_eq!(
            format!("{err}"),
            "Failed to acquire surface for rendering: Timeout"
        );
        assert!(err.source().is_none());
    }
}
