//! Bounded fixed-interval retry primitive.
//!
//! Every page interaction in the order flows reduces to "do this, check
//! whether it took, try again shortly if not": waiting for an input to
//! render, confirming a click landed, polling a table for the effect of a
//! submission. This crate provides that loop once, with bounded attempts
//! and an optional cancellation token, so call sites stop hand-rolling
//! timer chains.

pub mod error;
pub mod policy;
pub mod retry;

pub use error::RetryError;
pub use policy::RetryPolicy;
pub use retry::{retry_until, retry_until_cancelled};
