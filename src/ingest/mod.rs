pub mod citations;
pub mod reader;
pub mod record;
pub mod tables;
pub mod version;

pub use citations::*;
pub use reader::*;
pub use record::*;
pub use tables::*;
pub use version::*;
