pub mod logging;
pub mod output;
pub mod progress;
pub mod types;
pub mod utils;

pub use logging::*;
pub use output::*;
pub use progress::*;
pub use types::*;
pub use utils::*;
