//! # Tokenizer Component
//!
//! Lexical analysis of a binary description: splitting a chunk of text into
//! tokens, deciding what each token is, and checking that its characters fit
//! what it claims to be.
//!
//! ## Component Structure
//!
//! * [`token`]: line splitting ([`Tokenizer`](token::Tokenizer)) and the
//!   lexical classifier ([`classify`](token::classify))
//! * [`grammar`]: per-category syntax checks ([`validate`](grammar::validate))
//!   and numeric token decomposition
//! * [`action`]: recognition of mode-changing keywords
//! * [`types`]: [`Base`](types::Base), [`Endianness`](types::Endianness) and
//!   [`Category`](types::Category)
//!
//! ## Token Grammar
//!
//! ```text
//! # comment line
//! 'a quoted string, whole line'
//! %x0a42  %d-12  %o17  %b0101  %f1.5[4]    explicit numbers
//! 0a42    26[2]                            bare numbers, default base
//! little-endian  big-endian                endianness
//! hex  decimal  octal  binary  float       default base (with aliases)
//! size[4]                                  default size (0, 1, 2, 4 or 8)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use binmake::tokenizer::{
//!     token::{classify, Tokenizer},
//!     types::{Base, Category},
//! };
//!
//! let tokens = Tokenizer::new().tokenize("big-endian\n%x0a42 ff\n");
//! let categories: Vec<_> = tokens.iter().map(|t| classify(t.text)).collect();
//! assert_eq!(
//!     categories,
//!     vec![
//!         Category::Action,
//!         Category::Number(Base::Hex),
//!         Category::Indeterminate,
//!     ]
//! );
//! ```

pub mod action;
pub mod grammar;
pub mod token;
pub mod types;
