//! Configuration for TarangIO applications
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! for acquisition and recording. The stream geometry here must match what
//! the A-mode machine was configured to send; it is negotiated out-of-band.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub acquisition: AcquisitionConfig,
    pub recording: RecordingConfig,
    pub logging: LoggingConfig,
}

/// A-mode acquisition configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcquisitionConfig {
    /// TCP endpoint of the A-mode streaming PC (e.g., "192.168.1.2:6340")
    ///
    /// The socket itself is owned by the caller; this crate only decodes
    /// the bytes read from it.
    pub server_address: String,
    /// Number of ultrasound probes multiplexed into each frame
    pub probe_count: usize,
    /// Number of sample points per probe signal
    pub sample_count: usize,
}

/// Sequence recording configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingConfig {
    /// Directory where sequence (.mha) files are written
    pub output_dir: String,
    /// Prefix for generated sequence file names
    pub file_prefix: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log output (stdout, stderr, or file path)
    pub output: String,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Example
    /// ```no_run
    /// use tarang_io::Config;
    ///
    /// let config = Config::from_file("tarangio.toml")?;
    /// # Ok::<(), tarang_io::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| Error::Parse(format!("config: {e}")))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidParameter(format!("config: {e}")))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration for the Diagnostic Sonar A-mode setup
    ///
    /// Suitable for testing and development. Deployments should use a
    /// proper TOML configuration file.
    pub fn amode_defaults() -> Self {
        Self {
            acquisition: AcquisitionConfig {
                server_address: "127.0.0.1:6340".to_string(),
                probe_count: 30,
                sample_count: 3500,
            },
            recording: RecordingConfig {
                output_dir: ".".to_string(),
                file_prefix: "output".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                output: "stdout".to_string(),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::amode_defaults()
    }
}
