#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the property assessment explorer.
//!
//! With no subcommand the binary enters a menu-driven interactive
//! explorer; with a subcommand it runs a single scriptable query against
//! the CSV and exits.

mod interactive;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use property_map_cli_utils::IndicatifProgress;
use property_map_filter_models::{CategoryField, FilterCriterion, GarageFilter, PriceComparison};

#[derive(Parser)]
#[command(name = "property_map", about = "City property assessment explorer")]
struct Cli {
    /// Path to the assessment CSV. Defaults to the `PROPERTY_MAP_CSV`
    /// environment variable, then the published file name.
    #[arg(long)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate statistics over the full collection
    Stats {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Filter properties and report the matches
    Filter {
        /// Neighborhood name (exact match)
        #[arg(long)]
        neighborhood: Option<String>,
        /// Ward name (exact match)
        #[arg(long)]
        ward: Option<String>,
        /// Assessment class name (exact match)
        #[arg(long = "class")]
        assessment_class: Option<String>,
        /// Garage flag: All, Y, or N
        #[arg(long)]
        garage: Option<String>,
        /// Assessed-value threshold in whole dollars
        #[arg(long)]
        price: Option<u64>,
        /// How the assessed value compares to the threshold: Under, Equal, or Above
        #[arg(long, default_value = "Under")]
        comparison: String,
        /// Maximum matching records to print
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List distinct values of a categorical field
    Values {
        /// One of: neighborhood, ward, assessment-class
        field: String,
    },
    /// Look up a single property by account number
    Lookup {
        /// Account number to search for
        account_id: u32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the color legend for a center value
    Legend {
        /// Center value (defaults to the collection median)
        #[arg(long)]
        center: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = property_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let path = property_map_ingest::resolve_csv_path(cli.csv);
    let progress = IndicatifProgress::load_bar(&multi, "Loading properties...");
    let assessments =
        property_map_ingest::load_assessments_with_progress(&path, progress.as_ref())?;

    let Some(command) = cli.command else {
        return interactive::run(&assessments);
    };

    match command {
        Commands::Stats { json } => {
            if json {
                match assessments.statistics() {
                    Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
                    None => println!("{}", serde_json::json!(null)),
                }
            } else {
                render::print_statistics(&assessments);
            }
        }
        Commands::Filter {
            neighborhood,
            ward,
            assessment_class,
            garage,
            price,
            comparison,
            limit,
            json,
        } => {
            let mut criteria: Vec<FilterCriterion> = Vec::new();
            if let Some(value) = neighborhood {
                criteria.push(FilterCriterion::Neighborhood(value));
            }
            if let Some(value) = ward {
                criteria.push(FilterCriterion::Ward(value));
            }
            if let Some(value) = assessment_class {
                criteria.push(FilterCriterion::AssessmentClass(value));
            }
            if let Some(token) = garage {
                let garage: GarageFilter = token.parse().map_err(|_| {
                    format!("Unknown garage filter: {token} (expected All, Y, or N)")
                })?;
                criteria.push(FilterCriterion::Garage(garage));
            }
            if let Some(threshold) = price {
                let comparison: PriceComparison = comparison.parse().map_err(|_| {
                    format!("Unknown comparison: {comparison} (expected Under, Equal, or Above)")
                })?;
                criteria.push(FilterCriterion::Price {
                    comparison,
                    threshold,
                });
            }
            if criteria.is_empty() {
                return Err("Please select at least one filter.".into());
            }

            let filtered = property_map_filter::apply_all(&assessments, &criteria);
            if json {
                let records: Vec<_> = filtered.iter().take(limit).collect();
                let report = serde_json::json!({
                    "count": filtered.len(),
                    "statistics": filtered.statistics(),
                    "records": records,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render::print_filter_report(&filtered, limit);
            }
        }
        Commands::Values { field } => {
            let field: CategoryField = field.parse().map_err(|_| {
                format!("Unknown field: {field} (expected neighborhood, ward, or assessment-class)")
            })?;
            for value in property_map_filter::distinct_values(&assessments, field) {
                println!("{value}");
            }
        }
        Commands::Lookup { account_id, json } => {
            match assessments.find_by_account_id(account_id) {
                Some(property) if json => {
                    println!("{}", serde_json::to_string_pretty(property)?);
                }
                Some(property) => render::print_property_info(property),
                None => println!("No property found with the given account number."),
            }
        }
        Commands::Legend { center } => match center.or_else(|| assessments.median_value()) {
            Some(center) => render::print_legend(center),
            None => println!("No legend data available."),
        },
    }

    Ok(())
}
