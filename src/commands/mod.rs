pub mod build;
pub mod explore;
pub mod ingest;
pub mod pipeline;
pub mod taxonomy;

pub use build::{build_artifacts, rank_tables, run_build, run_build_async, BuildOptions, RankedTables};
pub use explore::{explore_json, run_explore};
pub use ingest::run_ingest;
pub use pipeline::run_pipeline;
pub use taxonomy::run_taxonomy;
