//! Client wire protocol.
//!
//! # Responsibilities
//! - Define the request categories and their wire codes
//! - Parse and validate raw client bytes into a `Request`
//!
//! # Design Decisions
//! - A request is a single network read of at least 2 bytes; there is no
//!   framing and no multi-read reassembly
//! - Parsing is a pure function; malformed input never reaches a backend

pub mod request;

pub use request::{Category, Request, RequestError, MIN_REQUEST_LEN};
