//! # scanline
//!
//! PNG scanline reconstruction and sample unpacking.
//!
//! This crate sits between zlib decompression and color conversion in a PNG
//! decoder: it reverses the five per-row filters and expands the raw bytes
//! into integer samples at 1, 2, 4, 8 or 16 bits.
//!
//! ## Features
//!
//! - **Unfiltering** for None, Sub, Up, Average and Paeth
//! - **Whole-image driver** that threads each row into the next
//! - **Sample unpacking** with MSB-first sub-byte order and big-endian 16-bit
//! - Optional multi-image reconstruction via the `parallel` feature
//!
//! ## Example
//!
//! ```rust
//! use scanline::{reconstruct, unpack, RowLayout};
//!
//! // Two rows of a 4-pixel grayscale image, tagged Sub then Up.
//! let data = [1, 10, 1, 1, 1, 2, 0, 0, 0, 0];
//! let layout = RowLayout::new(4, 1).unwrap();
//! let raw = reconstruct(&data, layout).unwrap();
//! assert_eq!(raw, [10, 11, 12, 13, 10, 11, 12, 13]);
//!
//! let samples = unpack(&raw[..4], 8).unwrap();
//! assert_eq!(samples, [10, 11, 12, 13]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bytewise;
pub mod error;
pub mod filter;
pub mod layout;
pub mod reconstruct;
pub mod unfilter;
pub mod unpack;

pub use error::{Error, Result};
pub use filter::FilterType;
pub use layout::{RowLayout, MAX_BPP};
#[cfg(feature = "parallel")]
pub use reconstruct::reconstruct_batch;
pub use reconstruct::{reconstruct, Reconstructor};
pub use unfilter::unfilter_row;
pub use unpack::{unpack, BitDepth};
