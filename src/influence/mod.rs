//! Citation ranking: per-year citation counts, the influential set and
//! category sizes.

pub mod counts;
pub mod select;
pub mod sizes;

#[cfg(test)]
pub(crate) mod fixtures;

pub use counts::*;
pub use select::*;
pub use sizes::*;
