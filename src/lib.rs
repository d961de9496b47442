//! # binmake: text to binary compiler
//!
//! binmake reads a line-oriented, human readable description of binary data
//! and produces the exact byte sequence it describes.
//!
//! ```text
//! # header
//! big-endian
//! 'MAGIC'
//! %x0a42[4] decimal 300
//! little-endian size[2] 1
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Text → Tokenizer → Classifier → Grammar check → Encoder → Emitter → Bytes
//!                          └──→ Action (mode change, no bytes)
//! ```
//!
//! * [`tokenizer`]: line splitting, token classification, grammar checks and
//!   action recognition
//! * [`encoder`]: numeric tokens to sized values, including auto-sizing
//! * [`emitter`]: values and strings to bytes in the current byte order
//! * [`stream`]: the [`BinStream`] session owning mode, input and output
//! * [`config`]: initial mode of a session
//! * [`error`]: recoverable per-token errors and hard stream errors
//!
//! ## Modes
//!
//! A stream starts little-endian, reading bare numbers as hexadecimal, with
//! automatic sizing. Action tokens change the mode for every following token
//! until the next action or a reset.

pub mod config;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod stream;
pub mod tokenizer;

// Re-exports
pub use config::StreamConfig;
pub use encoder::{EncodedNumber, NumberValue, Width};
pub use error::*;
pub use stream::{BinStream, Mode, StreamState};
pub use tokenizer::types::{Base, Category, Endianness};
