//! # URI Toolkit for Distributed REST Services
//!
//! This library provides the URI core shared by the framework's request
//! router and event fan-out layer: a one-pass parser for absolute URIs
//! accepting a superset of [RFC3986], an immutable [`Uri`] value with a
//! fluent modification API, context-sensitive percent-encoding tuned for
//! interop with strict web servers, and a hierarchical child-URI trie for
//! matching registrants by structural prefix.
//!
//! # Library Design
//!
//! Every value produced here is immutable and freely shareable between
//! threads. The parser, encoder and decoder are pure functions; the only
//! stateful component is [`map::ChildMap`], which is single-writer by
//! contract (see its documentation).
//!
//! ## Definitions
//!
//! - [`uri`] Uniform Resource Identifier parsing and manipulation
//! - [`uri::encoding`] percent-encoding and decoding for the five uri parts
//!
//! ## Integrations
//!
//! - [`map`] child-URI trie used for routing and event fan-out
//!
//! [RFC3986]: <https://www.rfc-editor.org/rfc/rfc3986.html>
#![warn(missing_debug_implementations)]

mod log;
mod matches;

// definitions
pub mod uri;

// integration
pub mod map;

pub use uri::{Parts, Uri, UriError, encoding::UriPart};
pub use map::ChildMap;
