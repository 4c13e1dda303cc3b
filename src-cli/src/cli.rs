//! Command-line arguments.

use cerulean_core::PipelineConfig;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Owl banner shown before a run and at the top of `--help`.
pub const BANNER: &str = concat!(
    r#"            ______
           /      \
          |  Hoo?  |
     ___  /\______/
    (o,o)
    /)__)
    --"--

 CeruleanOwl - v"#,
    env!("CARGO_PKG_VERSION"),
    r"
 Identify employees on LinkedIn through dorking.
"
);

/// Harvest employee names for an organization from LinkedIn search results.
#[derive(Parser, Debug)]
#[command(name = "cerulean", version, before_help = BANNER)]
pub struct Args {
    /// The target company name to dork. E.g. "Rootshell Security"
    #[arg(short, long, value_name = "COMPANY_NAME")]
    pub target: String,

    /// Number of workers used to process results [default: 50]
    #[arg(
        long,
        value_name = "THREAD_COUNT",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub threads: Option<usize>,

    /// How many pages of results to search. Pages contain 10 results [default: 10]
    #[arg(
        short,
        long,
        value_name = "QUERY_LIMIT",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub limit: Option<u32>,

    /// Capacity of the queue between fetcher and workers [default: thread count]
    #[arg(
        long,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub queue_capacity: Option<usize>,

    /// Path to the settings file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl Args {
    /// Overlay flags given on the command line onto the loaded settings.
    pub fn apply_to(&self, pipeline: &mut PipelineConfig) {
        if let Some(threads) = self.threads {
            pipeline.threads = threads;
        }
        if let Some(limit) = self.limit {
            pipeline.page_limit = limit;
        }
        if let Some(capacity) = self.queue_capacity {
            pipeline.queue_capacity = Some(capacity);
        }
    }

    /// Default log filter for the chosen verbosity.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn,cerulean=info"
        }
    }
}
