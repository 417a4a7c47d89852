mod cli;
mod config;
mod domain;
mod infra;
mod workflows;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs;
use std::path::Path;

use cli::Cli;
use config::Config;
use domain::errors::EnrichError;
use domain::models::GuideProgram;
use infra::tvdb::TvdbClient;
use infra::CatalogClient;
use workflows::enricher::Enricher;
use workflows::matchers::MatcherChain;

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if cli.output.is_some() && cli.inputs.len() > 1 {
        bail!("--output can only be used with a single input file");
    }

    let chain = MatcherChain::from_names(&config.matchers)?;
    let client = TvdbClient::new(
        config.tvdb_api_key.clone(),
        config.language.clone(),
        &config.cache_dir,
    );
    let mut enricher = Enricher::new(client, &config, chain);

    for input in &cli.inputs {
        process_file(input, cli.output.as_deref(), cli.dry_run, &mut enricher)?;
    }

    Ok(())
}

fn process_file<C: CatalogClient>(
    input: &Path,
    output: Option<&Path>,
    dry_run: bool,
    enricher: &mut Enricher<C>,
) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read guide export {}", input.display()))?;
    let mut programs: Vec<GuideProgram> = serde_json::from_str(&content)
        .with_context(|| format!("invalid guide export {}", input.display()))?;

    let mut enriched_count = 0;
    for program in &mut programs {
        match enricher.resolve_and_enrich(program) {
            Ok(true) => enriched_count += 1,
            Ok(false) => warn!(
                "no episode match for {:?} - {:?}",
                program.title, program.sub_title
            ),
            Err(EnrichError::SeriesNotFound(title)) => {
                warn!("series not found: {title:?}");
            }
            // Catalog outages abort the run; retrying is the client's call,
            // not ours.
            Err(e @ EnrichError::Catalog(_)) => return Err(e.into()),
        }
    }

    info!(
        "enriched {}/{} programs from {}",
        enriched_count,
        programs.len(),
        input.display()
    );

    if dry_run {
        return Ok(());
    }

    let target = output.unwrap_or(input);
    let serialized = serde_json::to_string_pretty(&programs)?;
    fs::write(target, serialized)
        .with_context(|| format!("failed to write enriched export {}", target.display()))?;

    Ok(())
}
