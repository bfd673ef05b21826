use clap::{Args, Parser, Subcommand};

use crate::explore::SelectionPath;

#[derive(Parser)]
#[command(name = "arxiv-citation-explorer")]
#[command(about = "Rank the most cited arXiv papers per category and year from the arXiv metadata and citation dumps")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse the metadata dump and citation graph into Parquet tables
    Ingest(IngestArgs),

    /// Import the arXiv category taxonomy from its HTML page
    Taxonomy(TaxonomyArgs),

    /// Count citations, select the influential papers and attach cross-reference ids
    Build(BuildArgs),

    /// Run the full pipeline: ingest -> taxonomy -> build
    Pipeline(PipelineArgs),

    /// Query the influential artifact: heatmap for a selection or a paper's details
    Explore(ExploreArgs),
}

impl Commands {
    pub fn log_level(&self) -> &str {
        match self {
            Commands::Ingest(args) => &args.log_level,
            Commands::Taxonomy(args) => &args.log_level,
            Commands::Build(args) => &args.log_level,
            Commands::Pipeline(args) => &args.log_level,
            Commands::Explore(args) => &args.log_level,
        }
    }
}

/// Ranking options shared by build, pipeline and explore
#[derive(Args, Clone, Debug)]
pub struct RankArgs {
    /// Papers kept per (category, year)
    #[arg(short = 'k', long, default_value = "3")]
    pub top_k: usize,

    /// Citation count a paper must exceed to be kept
    #[arg(long, default_value = "10")]
    pub threshold: u32,

    /// Break ties in citation count by paper id instead of input order
    #[arg(long, default_value = "false")]
    pub deterministic: bool,
}

/// Cross-reference lookup options shared by build and pipeline
#[derive(Args, Clone, Debug)]
pub struct EnrichArgs {
    /// Concurrent HTTP requests for id translation
    #[arg(long, default_value = "5")]
    pub concurrency: usize,

    /// Timeout in seconds per request
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Base URL of the id translation service
    #[arg(long, default_value = crate::enrich::DEFAULT_TRANSLATOR_URL)]
    pub translator_url: String,

    /// Skip the lookups and leave every cross-reference id empty
    #[arg(long, default_value = "false")]
    pub skip_enrich: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct IngestArgs {
    /// arXiv metadata dump, one JSON record per line (.json or .json.gz)
    #[arg(short, long, required = true)]
    pub metadata: String,

    /// Internal citation graph: JSON object mapping citing id to cited ids
    #[arg(short, long, required = true)]
    pub citations: String,

    /// Directory for the papers, versions, categories and citations tables
    #[arg(short, long, default_value = "data")]
    pub output_dir: String,

    /// Parser threads (0 = all cores)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Lines per parse batch
    #[arg(long, default_value = "10000")]
    pub batch_size: usize,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone, Debug)]
pub struct TaxonomyArgs {
    /// Saved copy of the taxonomy page; fetched from --url when absent
    #[arg(short, long)]
    pub input: Option<String>,

    /// Taxonomy page URL
    #[arg(long, default_value = crate::taxonomy::DEFAULT_TAXONOMY_URL, conflicts_with = "input")]
    pub url: String,

    /// Output Parquet file
    #[arg(short, long, default_value = "data/taxonomy.parquet")]
    pub output: String,

    /// Timeout in seconds for fetching the page
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone, Debug)]
pub struct BuildArgs {
    /// Directory holding the tables written by ingest
    #[arg(long, default_value = "data")]
    pub tables_dir: String,

    /// Taxonomy Parquet file written by the taxonomy step
    #[arg(long, default_value = "data/taxonomy.parquet")]
    pub taxonomy: String,

    /// Directory for category_sizes.parquet and influential.parquet/.csv
    #[arg(short, long, default_value = "web_data")]
    pub output_dir: String,

    #[command(flatten)]
    pub rank: RankArgs,

    /// Drop citations of a paper by itself before counting
    #[arg(long, default_value = "false")]
    pub exclude_self_citations: bool,

    #[command(flatten)]
    pub enrich: EnrichArgs,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone, Debug)]
pub struct PipelineArgs {
    /// arXiv metadata dump, one JSON record per line (.json or .json.gz)
    #[arg(short, long, required = true)]
    pub metadata: String,

    /// Internal citation graph: JSON object mapping citing id to cited ids
    #[arg(short, long, required = true)]
    pub citations: String,

    /// Saved copy of the taxonomy page; fetched from --taxonomy-url when absent
    #[arg(long)]
    pub taxonomy_input: Option<String>,

    /// Taxonomy page URL
    #[arg(long, default_value = crate::taxonomy::DEFAULT_TAXONOMY_URL, conflicts_with = "taxonomy_input")]
    pub taxonomy_url: String,

    /// Directory for the web artifacts
    #[arg(short, long, default_value = "web_data")]
    pub output_dir: String,

    #[command(flatten)]
    pub rank: RankArgs,

    /// Drop citations of a paper by itself before counting
    #[arg(long, default_value = "false")]
    pub exclude_self_citations: bool,

    #[command(flatten)]
    pub enrich: EnrichArgs,

    /// Parser threads (0 = all cores)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Lines per parse batch
    #[arg(long, default_value = "10000")]
    pub batch_size: usize,

    /// Keep intermediate tables instead of deleting them
    #[arg(long, default_value = "false")]
    pub keep_intermediates: bool,

    /// Directory for intermediate tables (default: system temp)
    #[arg(long)]
    pub temp_dir: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone, Debug)]
pub struct ExploreArgs {
    /// Influential Parquet file written by build
    #[arg(short, long, default_value = "web_data/influential.parquet")]
    pub influential: String,

    /// Selection: all, all/<group> or all/<group>/<category name>
    #[arg(short, long, default_value = "all")]
    pub path: SelectionPath,

    /// Show this paper's details instead of the heatmap
    #[arg(long)]
    pub paper: Option<String>,

    #[command(flatten)]
    pub rank: RankArgs,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "WARN")]
    pub log_level: String,
}
