//! Common foundation types for Talc.
//!
//! This crate provides the types every other Talc crate builds on:
//! - `Span`: source code range tracking for tokens and diagnostics

mod span;

pub use span::Span;
