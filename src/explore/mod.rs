//! Read side of the influential artifact: selection slices, the heatmap
//! matrix and paper details.

pub mod detail;
pub mod heatmap;
pub mod record;
pub mod selection;

#[cfg(test)]
pub(crate) mod fixtures;

pub use detail::*;
pub use heatmap::*;
pub use record::*;
pub use selection::*;
