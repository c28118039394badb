//! Common data types

pub mod frame;
pub mod image;
pub mod pose;

pub use frame::*;
pub use image::*;
pub use pose::*;
