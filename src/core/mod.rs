//! Parsing core:
//! - Delimiters: the five structural bytes discovered from the header
//! - Escape codec: delimiter escape sequences, memchr fast path
//! - Tokenizer: single-pass cascade-commit state machine

pub mod delimiters;
pub mod escape;
pub mod tokenizer;

pub use delimiters::{Delimiters, HEADER_TAG, MIN_MESSAGE_LEN};
pub use tokenizer::parse_message;
