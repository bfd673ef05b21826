//! Ranks the most cited arXiv papers per category and year.
//!
//! The pipeline ingests the arXiv metadata dump and the internal citation
//! graph into Parquet tables, imports the category taxonomy, counts
//! citations per citing year, keeps the top papers of every (category,
//! year) and looks up a cross-reference id for each. The `explore` module
//! answers the dashboard's read queries against the resulting artifact.

pub mod cli;
pub mod commands;
pub mod common;
pub mod enrich;
pub mod explore;
pub mod influence;
pub mod ingest;
pub mod taxonomy;
