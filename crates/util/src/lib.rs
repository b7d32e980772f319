//! Shared JSON value primitives for the use-model workspace.
//!
//! Everything that touches model data agrees on a single canonical,
//! insertion-order-sensitive encoding. The dirty check, the write-path
//! no-op detection and the mutator change detection all compare strings
//! produced by [`canonical_json`]; the write path stores only values that
//! went through [`clone_normalize`].

mod canonical;
pub use canonical::canonical_json;

mod clone;
pub use clone::{clone_normalize, clone_value, NormalizeError};

mod deep_equal;
pub use deep_equal::deep_equal;
