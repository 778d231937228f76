//! # thumbhash-core
//!
//! ThumbHash encoding and decoding in pure Rust.
//!
//! [ThumbHash](https://evanw.github.io/thumbhash/) is a very compact
//! representation of an image placeholder. Compared to BlurHash it also keeps
//! the aspect ratio and alpha channel, and it encodes more detail in the same
//! space. A hash is at most 24 bytes for an opaque image and 25 bytes with
//! alpha.
//!
//! Inputs must be at most 100x100 pixels; resize larger images first. Decoded
//! placeholders are 32 pixels on their longer side.
//!
//! ## Quick Start
//!
//! ```
//! use thumbhash_core::{average_rgba, decode, encode};
//!
//! // Encode: RGBA pixels -> ThumbHash bytes
//! let pixels = [128u8, 64, 32, 255].repeat(8 * 4); // 8x4 opaque image
//! let hash = encode(8, 4, &pixels).unwrap();
//!
//! // Decode: ThumbHash bytes -> placeholder image
//! let image = decode(&hash).unwrap();
//! assert_eq!(image.width, 32);
//! assert_eq!(image.rgba.len(), (image.width * image.height * 4) as usize);
//!
//! // The average color is available from the header alone.
//! let avg = average_rgba(&hash).unwrap();
//! assert!(avg.r > avg.b);
//! ```
//!
//! ## Features
//!
//! * `parallel` - reconstruct decoded rows on the rayon thread pool.

pub mod channel;
pub mod color;
pub mod error;
pub mod packing;

mod decode_impl;
mod encode_impl;

// Re-export primary functions at crate root.
pub use color::Rgba;
pub use decode_impl::{
    approximate_aspect_ratio, average_rgba, decode, luminance_bounds, Image, OUTPUT_SIZE,
};
pub use encode_impl::{encode, MAX_DIMENSION};
pub use error::ThumbhashError;
