//! Integration tests for keel-validator.
//!
//! Each module drives the engine through its public surface only.

mod common;

mod cross_property;
mod dispatch;
mod error_container;
mod idempotence;
mod throwing;
mod untyped;
