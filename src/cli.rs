use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guide-enricher")]
#[command(about = "Enrich recorded guide programs with canonical TVDB season/episode numbering")]
pub struct Cli {
    /// Guide export files to enrich (JSON arrays of programs)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Path to the configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the enriched export here instead of rewriting the input in
    /// place (single input only)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Report matches without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the catalog language from the config
    #[arg(long)]
    pub language: Option<String>,
}
