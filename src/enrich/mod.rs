pub mod http;
pub mod runner;

pub use http::*;
pub use runner::*;
