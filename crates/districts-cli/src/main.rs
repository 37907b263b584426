//! districts-cli: Command-line interface for districts-core
//!
//! Inspect the district layer and the contact spreadsheet from a terminal,
//! check how polygon names resolve to contact rows, and replay scripted map
//! sessions against an in-memory surface.
//!
//! Usage examples
//! --------------
//!
//! - List features or contacts
//!   $ districts-cli --features districts.geojson features
//!   $ districts-cli --contacts contacts.csv contacts
//!
//! - Resolve one polygon name
//!   $ districts-cli --contacts contacts.csv match "Ely Public School District"
//!
//! - Match every polygon and print totals
//!   $ districts-cli -f districts.geojson -k contacts.csv report --only none
//!
//! - Search like the sidebar does
//!   $ districts-cli -f districts.geojson -k contacts.csv search 218-555
//!
//! - Replay a session script
//!   $ districts-cli -f districts.geojson -k contacts.csv replay session.json
//!
//! Replay scripts
//! --------------
//!
//! A JSON array of steps. Map events use the `event` tag
//! (`{"event": "click", "district": "0706"}`, `{"event": "zoom_end",
//! "zoom": 19}`, `{"event": "key", "key": "t", "ctrl": true}`); a save is
//! `{"submit": "0706", "form": {...}}` and a search `{"search": "ely"}`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use districts_core::prelude::*;
use districts_core::search::{filter_entries, search_entries};
use districts_core::match_contact;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// One step of a replay script.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayStep {
    Submit {
        submit: DistrictId,
        form: FormSubmission,
    },
    Search {
        search: String,
    },
    Event(SurfaceEvent),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StepResult {
    Outcome(Outcome),
    Saved { saved: DistrictEdit },
    Search(SearchList),
}

#[derive(Debug, Serialize)]
struct ReplayReport<'a> {
    steps: Vec<StepResult>,
    edits: BTreeMap<&'a str, &'a DistrictEdit>,
    surface: &'a HeadlessSurface,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => MapConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => MapConfig::default(),
    };

    match &args.command {
        Commands::Features => {
            let features = load_features(&args, &config)?
                .context("no features: pass --features <file> or --fetch")?;
            for f in features.iter() {
                println!("{}\t{}", f.id, f.display_name());
            }
            println!("{} districts", features.len());
        }

        Commands::Contacts => {
            let book = load_contacts(&args, &config)?
                .context("no contacts: pass --contacts <file>")?;
            for r in book.records() {
                println!("{} | {} | {} | {}", r.district, r.contact_person, r.phone, r.emails);
            }
            println!("{} contacts", book.len());
        }

        Commands::Match { name } => {
            let book = load_contacts(&args, &config)?
                .context("no contacts: pass --contacts <file>")?;
            let m = match_contact(name, &book);
            println!("Match: {}", match_label(m.match_type));
            if let Some(r) = m.record {
                println!("District: {}", r.district);
                println!("Contact: {}", r.contact_person);
                println!("Phone: {}", r.phone);
                println!("Emails: {}", r.emails);
            }
        }

        Commands::Report { only } => {
            let features = load_features(&args, &config)?
                .context("no features: pass --features <file> or --fetch")?;
            let book = load_contacts(&args, &config)?.unwrap_or_default();
            let only = only.as_deref().map(str::to_ascii_lowercase);

            let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
            for f in features.iter() {
                let m = match_contact(&f.name, &book);
                let label = match_label(m.match_type);
                *totals.entry(label).or_default() += 1;
                if only.as_deref().is_some_and(|o| o != label) {
                    continue;
                }
                let contact = m.record.map(|r| r.district.as_str()).unwrap_or("-");
                println!("{}\t{}\t{label}\t{contact}", f.id, f.display_name());
            }
            for (label, count) in totals {
                println!("{label}: {count}");
            }
        }

        Commands::Search { query } => {
            let features = load_features(&args, &config)?.unwrap_or_default();
            let book = load_contacts(&args, &config)?;
            let list = filter_entries(&search_entries(book.as_ref(), &features), query);
            if let Some(message) = list.message() {
                println!("{message}");
            }
            for hit in list.results {
                println!("{} | {} | {}", hit.name, hit.contact, hit.phone);
            }
        }

        Commands::Replay { script } => {
            let text = std::fs::read_to_string(script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let steps: Vec<ReplayStep> =
                serde_json::from_str(&text).context("parsing replay script")?;
            tracing::info!(steps = steps.len(), "replaying session script");

            let mut session = Session::new(HeadlessSurface::new(), config.clone());
            if let Some(features) = load_features(&args, &config)? {
                session.load_features(features);
            }
            if let Some(book) = load_contacts(&args, &config)? {
                session.load_contacts(book);
            }

            let results = steps
                .into_iter()
                .map(|step| match step {
                    ReplayStep::Submit { submit, form } => StepResult::Saved {
                        saved: session.submit(&submit, form),
                    },
                    ReplayStep::Search { search } => StepResult::Search(session.search(&search)),
                    ReplayStep::Event(event) => StepResult::Outcome(session.dispatch(event)),
                })
                .collect();

            let report = ReplayReport {
                steps: results,
                edits: session
                    .store()
                    .iter()
                    .map(|(id, edit)| (id.as_str(), edit))
                    .collect(),
                surface: session.surface(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn match_label(m: MatchType) -> &'static str {
    match m {
        MatchType::Exact => "exact",
        MatchType::Fuzzy => "fuzzy",
        MatchType::None => "none",
    }
}

fn load_features(args: &CliArgs, config: &MapConfig) -> anyhow::Result<Option<FeatureSet>> {
    if args.fetch {
        return fetch_features(config).map(Some);
    }
    match &args.features {
        Some(path) => Ok(Some(
            FeatureSet::load_from_path(path)
                .with_context(|| format!("reading features {}", path.display()))?,
        )),
        None => Ok(None),
    }
}

/// Contacts from `--contacts`, or from the configured contacts file when it
/// exists next to the working directory.
fn load_contacts(args: &CliArgs, config: &MapConfig) -> anyhow::Result<Option<ContactBook>> {
    let source = match &args.contacts {
        Some(path) => path.to_string_lossy().into_owned(),
        None if Path::new(&config.contacts_file).is_file() => config.contacts_file.clone(),
        None => return Ok(None),
    };
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_contacts(&source, config).map(Some);
    }
    let book = ContactBook::load_from_path(&source, &config.contact_columns)
        .with_context(|| format!("reading contacts {source}"))?;
    Ok(Some(book))
}

#[cfg(feature = "fetch")]
fn fetch_features(config: &MapConfig) -> anyhow::Result<FeatureSet> {
    Ok(districts_core::loader::fetch::fetch_features(config)?)
}

#[cfg(not(feature = "fetch"))]
fn fetch_features(_config: &MapConfig) -> anyhow::Result<FeatureSet> {
    anyhow::bail!("--fetch needs districts-cli built with the 'fetch' feature")
}

#[cfg(feature = "fetch")]
fn fetch_contacts(url: &str, config: &MapConfig) -> anyhow::Result<ContactBook> {
    Ok(districts_core::loader::fetch::fetch_contacts(
        url,
        &config.contact_columns,
    )?)
}

#[cfg(not(feature = "fetch"))]
fn fetch_contacts(url: &str, _config: &MapConfig) -> anyhow::Result<ContactBook> {
    anyhow::bail!("cannot download {url}: districts-cli was built without the 'fetch' feature")
}
