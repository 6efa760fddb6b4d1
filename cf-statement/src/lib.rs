//! Extraction of Codeforces problem statements.
//!
//! A page goes through four stages:
//!
//! 1. [`Client::fetch`] retrieves the raw bytes (feature `client`).
//! 2. [`Document::parse`] turns them into an immutable markup tree, recovering from malformed
//!    markup.
//! 3. [`locate::find_first`] and [`locate::find_all`] search the tree by tag name and class.
//! 4. [`extract::extract`] flattens the located nodes into text.
//!
//! [`Problem::from_document`] ties the last three together for a problem page.
// Allow repetition of structure name instead of replacing with self as the output from
// rust-analyzer becomes more readable
#![allow(clippy::use_self)]

#[cfg(feature = "client")]
pub mod client;
mod error;
pub mod extract;
mod id;
pub mod locate;
pub mod markup;
pub mod problem;

#[cfg(feature = "client")]
pub use client::Client;
pub use error::{Error, ParseError};
pub use extract::TextMode;
pub use id::ProblemId;
pub use markup::{Document, NodeRef};
pub use problem::{Problem, Sample};
