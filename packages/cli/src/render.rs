//! Text rendering for query results.
//!
//! The wording of the empty states matches the panels of the map view
//! this tool replaces, so scripted output stays stable.

use property_map_assessment::PropertyAssessments;
use property_map_assessment_models::PropertyAssessment;
use property_map_legend::{format_grouped, legend_entries};

/// Prints the aggregate statistics block, or the empty state when there
/// is nothing to aggregate.
pub fn print_statistics(assessments: &PropertyAssessments) {
    let Some(stats) = assessments.statistics() else {
        println!("No statistics available for the selected filters.");
        return;
    };

    println!("Number of properties: {}", format_grouped(stats.count));
    println!("Minimum value: ${}", format_grouped(stats.min));
    println!("Maximum value: ${}", format_grouped(stats.max));
    println!("Range: ${}", format_grouped(stats.range));
    println!("Mean: ${}", format_grouped(stats.mean));
    println!("Median: ${}", format_grouped(stats.median));
}

/// Prints the full single-property display used by account lookups.
pub fn print_property_info(property: &PropertyAssessment) {
    println!("Account Number: {}", property.account_id);
    println!("Address: {}", property.address);
    println!("Garage: {}", property.garage_flag());
    println!(
        "Assessment Value: ${}",
        format_grouped(property.assessed_value)
    );
    println!("Neighborhood: {}", property.neighborhood.name);
    println!("Assessment Class: {}", property.assessment_class);
    println!("Latitude: {}", property.location.lat);
    println!("Longitude: {}", property.location.lng);
}

/// Prints the match count, the aggregate statistics, and up to `limit`
/// matching records.
pub fn print_filter_report(filtered: &PropertyAssessments, limit: usize) {
    if filtered.is_empty() {
        println!("No properties match the selected filters.");
        return;
    }

    print_statistics(filtered);

    println!();
    for property in filtered.iter().take(limit) {
        println!(
            "{:<10} {:<32} ${:>14}  {}",
            property.account_id,
            property.address.to_string(),
            format_grouped(property.assessed_value),
            property.neighborhood,
        );
    }
    if filtered.len() > limit {
        println!("... and {} more", format_grouped((filtered.len() - limit) as u64));
    }
}

/// Prints one legend row per value band, plus the highlight row.
pub fn print_legend(center: u64) {
    println!("Legend (center ${}):", format_grouped(center));
    for entry in legend_entries(center) {
        println!("  {}  {}", entry.color, entry.label);
    }
}
