//! rustyhl7 - HL7 v2 message parsing with terser path queries
//!
//! Two tightly coupled pieces:
//! - A message tokenizer that discovers the document's own delimiter
//!   bytes from its header and converts the buffer, in one pass, into a
//!   five-level ordered tree (Message > Segment > Field > Repetition >
//!   Component) with escape sequences decoded at the leaves.
//! - A terser query engine that parses compact path strings like
//!   `PID-5(1)-2` and evaluates them against the tree, either to a
//!   single value (`get`) or a cardinality (`count`).
//!
//! The tree is immutable after parsing and safe to share across threads;
//! `terser::parallel` evaluates query batches on the rayon pool.
//!
//! ```
//! use rustyhl7::{parse_message, parse_query};
//!
//! let raw = b"MSH|^~\\&|SEND|FAC|RECV|FAC|20200101||ADT^A08|42|P|2.4\rPID|||12345||DOE^JOHN";
//! let (message, delimiters) = parse_message(raw).unwrap();
//! assert_eq!(delimiters.field, b'|');
//!
//! let query = parse_query("PID-5-2").unwrap();
//! assert_eq!(query.get_string(&message), "JOHN");
//! assert_eq!(parse_query("PID").unwrap().count(&message), 1);
//! ```

mod core;
mod error;
mod message;
pub mod terser;

pub use crate::core::{parse_message, Delimiters, HEADER_TAG, MIN_MESSAGE_LEN};
pub use crate::error::{ParseError, QueryError};
pub use crate::message::{Component, Field, Message, Repetition, Segment};
pub use crate::terser::{parse_query, Query};
