//! # Formats Module
//!
//! Text encoding of the gap analysis collection for the durable blob.

mod persistence;

pub use persistence::*;
