//! Derive macros from derive_more used across the crate.

#[allow(unused_imports)]
pub use derive_more::{Display, From, Into};
