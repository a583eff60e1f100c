//! Generates QR Code symbols from text strings and byte arrays.
//!
//! Implements the QR Code Model 2 standard (ISO/IEC 18004): versions 1
//! through 40, error correction levels L/M/Q/H, and the Numeric/AlphaNum/
//! Byte encoding modes. Kanji mode, ECI segments, structured append, and
//! Micro QR are not supported. This crate produces only the finished
//! module bitmap (including quiet zone); rasterizing it to an image format
//! is left to the caller.
//!
//! # Examples
//!
//! ```
//! use qr::Symbol;
//!
//! let symbol = Symbol::encode_text("Hello, world!").unwrap();
//! for y in 0..symbol.height() {
//!     for x in 0..symbol.width() {
//!         let _dark = symbol.at(x, y);
//!     }
//! }
//! ```
//!
//! Manual operation with explicit options:
//!
//! ```
//! use qr::{ErrorLevel, EncodeOptions, Mode, Symbol};
//!
//! let options = EncodeOptions {
//!     mode: Some(Mode::AlphaNum),
//!     error_level: ErrorLevel::Q,
//!     ..Default::default()
//! };
//! let symbol = Symbol::encode_with_options("HELLO WORLD", &options).unwrap();
//! ```

// The set of all legal characters in alphanumeric mode,
// where each character value maps to the index in the string.
pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

mod bit_buffer;
mod block_coder;
mod data_encoder;
mod data_placer;
mod error;
mod error_level;
mod finder_penalty;
mod functional_placer;
mod gf256;
mod mask;
mod mask_evaluator;
mod matrix;
mod mode;
mod symbol;
mod version;

pub use bit_buffer::BitBuffer;
pub use error::QrError;
pub use error_level::ErrorLevel;
pub use mask::Mask;
pub use matrix::{Matrix, ReservationMask};
pub use mode::Mode;
pub use symbol::{EncodeOptions, Symbol};
pub use version::Version;
