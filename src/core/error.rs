//! Error types for stellar-mapper
//!
//! This module provides structured error handling using thiserror.

use mapper_delaunay::DelaunayError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mapper operations
pub type Result<T> = std::result::Result<T, MapperError>;

/// Errors that can occur while building or persisting a network
#[derive(Error, Debug)]
pub enum MapperError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Positions that no tetrahedralization can handle
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] DelaunayError),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<MapperError>,
    },
}

impl MapperError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        MapperError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        MapperError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error (or the error it wraps) is an invalid-geometry failure
    pub fn is_invalid_geometry(&self) -> bool {
        match self {
            MapperError::InvalidGeometry(_) => true,
            MapperError::WithContext { source, .. } => source.is_invalid_geometry(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
