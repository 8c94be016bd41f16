use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journal_federation::{
    CategoryUploadHandler, EngineConfig, FullQueryEngine, JournalUploadHandler, Quartile,
    UploadHandler,
};

#[derive(Parser)]
#[command(about, version, name = "journal-federation")]
/// Federated queries over a taxonomy store and a bibliographic store
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a taxonomy JSON document into a SQLite store
    UploadTaxonomy {
        /// SQLite file (created if missing)
        #[arg(long, value_hint = ValueHint::FilePath)]
        db: String,
        #[arg(long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    /// Load a DOAJ journal CSV export into a SPARQL endpoint
    UploadJournals {
        #[arg(long, value_hint = ValueHint::Url)]
        endpoint: String,
        #[arg(long, value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    /// Run a federated query; prints JSON
    Query {
        /// Engine configuration (taxonomy + bibliographic locations)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
        #[command(subcommand)]
        query: Query,
    },
}

#[derive(Subcommand)]
enum Query {
    /// Resolve an ISSN, EISSN, category or area name
    Entity { id: String },
    /// Journals from the bibliographic stores
    Journals {
        #[arg(long, conflicts_with_all = ["publisher", "license", "apc", "no_apc", "seal"])]
        title: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        license: Vec<String>,
        #[arg(long)]
        apc: bool,
        #[arg(long, conflicts_with = "apc")]
        no_apc: bool,
        #[arg(long)]
        seal: bool,
    },
    /// Categories, optionally filtered by quartile ("none" = no quartile)
    Categories {
        #[arg(long)]
        quartile: Vec<String>,
        /// Only categories co-assigned to these areas
        #[arg(long, conflicts_with = "quartile")]
        area: Vec<String>,
    },
    /// Areas, optionally only those co-assigned to the given categories
    Areas {
        #[arg(long)]
        category: Vec<String>,
    },
    /// Journals holding any category at any of the quartiles
    InCategories {
        #[arg(long)]
        category: Vec<String>,
        #[arg(long)]
        quartile: Vec<String>,
    },
    /// Journals in the areas carrying any of the licenses
    InAreas {
        #[arg(long)]
        area: Vec<String>,
        #[arg(long)]
        license: Vec<String>,
    },
    /// APC-free journals in the areas and categories
    Diamond {
        #[arg(long)]
        area: Vec<String>,
        #[arg(long)]
        category: Vec<String>,
        #[arg(long)]
        quartile: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Args::parse().command {
        Command::UploadTaxonomy { db, input } => run_upload_taxonomy(&db, &input),
        Command::UploadJournals { endpoint, input } => run_upload_journals(&endpoint, &input),
        Command::Query { config, query } => {
            let config = EngineConfig::from_file(&config)
                .with_context(|| format!("reading engine config {}", config.display()))?;
            let engine = config.build_engine().context("building query engine")?;
            run_query(&engine, query)
        }
    }
}

fn run_upload_taxonomy(db: &str, input: &Path) -> Result<()> {
    println!("📂 Loading taxonomy {} into {}", input.display(), db);

    let handler = CategoryUploadHandler::with_location(db)?;
    let records = handler
        .push_data_to_db(input)
        .with_context(|| format!("uploading {}", input.display()))?;

    println!("✓ Uploaded {} taxonomy records", records);
    Ok(())
}

fn run_upload_journals(endpoint: &str, input: &Path) -> Result<()> {
    println!("📂 Loading journals {} into {}", input.display(), endpoint);

    let handler = JournalUploadHandler::with_location(endpoint)?;
    let records = handler
        .push_data_to_db(input)
        .with_context(|| format!("uploading {}", input.display()))?;

    println!("✓ Uploaded {} journals", records);
    Ok(())
}

/// "Q1".."Q4", or "none" for categories without a quartile
fn parse_quartiles(labels: &[String]) -> Result<Vec<Option<Quartile>>> {
    labels
        .iter()
        .map(|label| -> Result<Option<Quartile>> {
            match label.trim().to_ascii_lowercase().as_str() {
                "none" | "null" => Ok(None),
                _ => Ok(Some(label.parse::<Quartile>()?)),
            }
        })
        .collect()
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_query(engine: &FullQueryEngine, query: Query) -> Result<()> {
    match query {
        Query::Entity { id } => print_json(&engine.get_entity_by_id(&id)?),
        Query::Journals {
            title,
            publisher,
            license,
            apc,
            no_apc,
            seal,
        } => {
            let journals = if let Some(title) = title {
                engine.get_journals_with_title(&title)?
            } else if let Some(publisher) = publisher {
                engine.get_journals_published_by(&publisher)?
            } else if apc {
                engine.get_journals_with_apc()?
            } else if no_apc {
                engine.get_journals_without_apc()?
            } else if seal {
                engine.get_journals_with_doaj_seal()?
            } else {
                engine.get_journals_with_license(&as_strs(&license))?
            };
            print_json(&journals)
        }
        Query::Categories { quartile, area } => {
            let categories = if area.is_empty() {
                engine.get_categories_with_quartile(&parse_quartiles(&quartile)?)?
            } else {
                engine.get_categories_assigned_to_areas(&as_strs(&area))?
            };
            print_json(&categories)
        }
        Query::Areas { category } => {
            let areas = if category.is_empty() {
                engine.get_all_areas()?
            } else {
                engine.get_areas_assigned_to_categories(&as_strs(&category))?
            };
            print_json(&areas)
        }
        Query::InCategories { category, quartile } => print_json(
            &engine.get_journals_in_categories_with_quartile(
                &as_strs(&category),
                &parse_quartiles(&quartile)?,
            )?,
        ),
        Query::InAreas { area, license } => print_json(
            &engine.get_journals_in_areas_with_license(&as_strs(&area), &as_strs(&license))?,
        ),
        Query::Diamond {
            area,
            category,
            quartile,
        } => print_json(
            &engine.get_diamond_journals_in_areas_and_categories_with_quartile(
                &as_strs(&area),
                &as_strs(&category),
                &parse_quartiles(&quartile)?,
            )?,
        ),
    }
}
