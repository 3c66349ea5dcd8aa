//! Interactive menu-driven explorer.
//!
//! The dialoguer loop stands in for the filter, statistics, and legend
//! panels of the original map window: the state is the current filtered
//! collection plus an optional legend-center override, and every action
//! reads or replaces that state. Invalid numeric input is reported and
//! leaves the prior state unchanged.

use dialoguer::{Input, Select};
use property_map_assessment::PropertyAssessments;
use property_map_filter_models::{CategoryField, FilterCriterion, GarageFilter, PriceComparison};

use crate::render;

/// Top-level actions available in the explorer menu.
enum ExplorerAction {
    ApplyFilters,
    SearchAccount,
    ShowStatistics,
    ShowLegend,
    RecenterLegend,
    RemoveFilters,
    Quit,
}

impl ExplorerAction {
    const ALL: &[Self] = &[
        Self::ApplyFilters,
        Self::SearchAccount,
        Self::ShowStatistics,
        Self::ShowLegend,
        Self::RecenterLegend,
        Self::RemoveFilters,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ApplyFilters => "Apply filters",
            Self::SearchAccount => "Search by account number",
            Self::ShowStatistics => "Show statistics",
            Self::ShowLegend => "Show legend",
            Self::RecenterLegend => "Recenter legend",
            Self::RemoveFilters => "Remove filters",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the explorer loop over the loaded collection.
///
/// # Errors
///
/// Returns an error if the terminal prompt backend fails.
pub fn run(full: &PropertyAssessments) -> Result<(), Box<dyn std::error::Error>> {
    let mut current = full.clone();
    let mut center_override: Option<u64> = None;

    render::print_statistics(&current);

    let labels: Vec<&str> = ExplorerAction::ALL
        .iter()
        .map(ExplorerAction::label)
        .collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match ExplorerAction::ALL[idx] {
            ExplorerAction::ApplyFilters => {
                if let Some(filtered) = prompt_filters(full)? {
                    center_override = None;
                    if filtered.is_empty() {
                        println!("No properties match the selected filters.");
                    } else {
                        render::print_statistics(&filtered);
                    }
                    current = filtered;
                }
            }
            ExplorerAction::SearchAccount => search_account(full)?,
            ExplorerAction::ShowStatistics => render::print_statistics(&current),
            ExplorerAction::ShowLegend => show_legend(&current, center_override),
            ExplorerAction::RecenterLegend => {
                if let Some(center) = prompt_center()? {
                    center_override = Some(center);
                    render::print_legend(center);
                }
            }
            ExplorerAction::RemoveFilters => {
                current = full.clone();
                center_override = None;
                render::print_statistics(&current);
            }
            ExplorerAction::Quit => break,
        }
    }

    Ok(())
}

/// Prompts for a category filter, a garage flag, and an optional price
/// threshold, then applies them in sequence to the full collection.
///
/// Returns `None` (prior state unchanged) when no filter was selected or
/// the price input was invalid.
fn prompt_filters(
    full: &PropertyAssessments,
) -> Result<Option<PropertyAssessments>, Box<dyn std::error::Error>> {
    let mut criteria: Vec<FilterCriterion> = Vec::new();

    // Category filter: pick the field, then one of its distinct values.
    let mut field_labels = vec!["(none)".to_string()];
    field_labels.extend(CategoryField::ALL.iter().map(ToString::to_string));
    let field_idx = Select::new()
        .with_prompt("Filter by")
        .items(&field_labels)
        .default(0)
        .interact()?;

    if field_idx > 0 {
        let field = CategoryField::ALL[field_idx - 1];
        let values = property_map_filter::distinct_values(full, field);
        if values.is_empty() {
            println!("No {field} values available.");
        } else {
            let value_idx = Select::new()
                .with_prompt(format!("{field} value"))
                .items(&values)
                .max_length(20)
                .default(0)
                .interact()?;
            let value = values[value_idx].clone();
            criteria.push(match field {
                CategoryField::Neighborhood => FilterCriterion::Neighborhood(value),
                CategoryField::Ward => FilterCriterion::Ward(value),
                CategoryField::AssessmentClass => FilterCriterion::AssessmentClass(value),
            });
        }
    }

    // Garage flag: All is the identity and adds no criterion.
    let garage_options = [
        GarageFilter::All,
        GarageFilter::WithGarage,
        GarageFilter::WithoutGarage,
    ];
    let garage_labels: Vec<String> = garage_options.iter().map(ToString::to_string).collect();
    let garage_idx = Select::new()
        .with_prompt("Garage")
        .items(&garage_labels)
        .default(0)
        .interact()?;
    if garage_options[garage_idx] != GarageFilter::All {
        criteria.push(FilterCriterion::Garage(garage_options[garage_idx]));
    }

    // Price threshold with comparison.
    let price_input: String = Input::new()
        .with_prompt("Price threshold (empty for none)")
        .allow_empty(true)
        .interact_text()?;
    let price_input = price_input.trim();
    if !price_input.is_empty() {
        let Ok(threshold) = price_input.parse::<u64>() else {
            log::error!("Price must be a valid number.");
            return Ok(None);
        };
        let comparison_labels: Vec<String> =
            PriceComparison::ALL.iter().map(ToString::to_string).collect();
        let comparison_idx = Select::new()
            .with_prompt("Comparison")
            .items(&comparison_labels)
            .default(0)
            .interact()?;
        criteria.push(FilterCriterion::Price {
            comparison: PriceComparison::ALL[comparison_idx],
            threshold,
        });
    }

    if criteria.is_empty() {
        println!("Please select at least one filter.");
        return Ok(None);
    }

    Ok(Some(property_map_filter::apply_all(full, &criteria)))
}

/// Prompts for an account number and displays the matching property.
fn search_account(full: &PropertyAssessments) -> Result<(), Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt("Account number")
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();

    if input.is_empty() {
        println!("Please enter an account number.");
        return Ok(());
    }

    let Ok(account_id) = input.parse::<u32>() else {
        log::error!("Account number must be a valid number.");
        return Ok(());
    };

    match full.find_by_account_id(account_id) {
        None => println!("No property found with the given account number."),
        Some(property) => {
            render::print_property_info(property);
            // The legend recenters on the single selected property.
            render::print_legend(property.assessed_value);
        }
    }

    Ok(())
}

/// Prompts for a new legend center value.
fn prompt_center() -> Result<Option<u64>, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt("Enter new map center value")
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();

    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u64>() {
        Ok(center) => Ok(Some(center)),
        Err(_) => {
            log::error!("Center value must be a valid number.");
            Ok(None)
        }
    }
}

fn show_legend(current: &PropertyAssessments, center_override: Option<u64>) {
    match center_override.or_else(|| current.median_value()) {
        Some(center) => render::print_legend(center),
        None => println!("No legend data available."),
    }
}
