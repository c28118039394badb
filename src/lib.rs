//! TarangIO - Ultrasound data acquisition and interchange library
//!
//! This library provides the core components for streaming A-mode ultrasound
//! amplitude data, soft-synchronizing it with camera/pose sources, and
//! exchanging recorded sequences and reconstructed volumes with external
//! reconstruction tools.
//!
//! ## Components
//!
//! - [`stream`]: separator-delimited frame decoding from a raw byte stream
//! - [`sync`]: latest-wins pairing of two asynchronous producers
//! - [`sequence`]: sequence (.mha) header codec, recorder, and volume reader
//!
//! Socket setup, camera capture and motion-capture SDK handling are the
//! caller's concern; this crate consumes their bytes, images and transforms
//! and produces decoded frames, paired records and interchange files.

pub mod config;
pub mod error;
pub mod sequence;
pub mod stream;
pub mod sync;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
