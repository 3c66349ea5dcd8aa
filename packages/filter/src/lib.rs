#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Predicate-based filtering and distinct-value queries over a
//! [`PropertyAssessments`] collection.
//!
//! Filtering never mutates: each application produces a new collection of
//! exactly the matching records in their original relative order. A
//! criterion value that matches nothing yields an empty collection, not an
//! error.

use std::collections::BTreeSet;

use property_map_assessment::PropertyAssessments;
use property_map_assessment_models::PropertyAssessment;
use property_map_filter_models::{CategoryField, FilterCriterion, GarageFilter, PriceComparison};

/// Evaluates a single criterion against a single record.
///
/// String criteria use exact, case-sensitive equality.
#[must_use]
pub fn matches(property: &PropertyAssessment, criterion: &FilterCriterion) -> bool {
    match criterion {
        FilterCriterion::Neighborhood(value) => property.neighborhood.name == *value,
        FilterCriterion::Ward(value) => property.neighborhood.ward == *value,
        FilterCriterion::AssessmentClass(value) => property.assessment_class.contains_class(value),
        FilterCriterion::Garage(GarageFilter::All) => true,
        FilterCriterion::Garage(GarageFilter::WithGarage) => property.has_garage,
        FilterCriterion::Garage(GarageFilter::WithoutGarage) => !property.has_garage,
        FilterCriterion::Price {
            comparison,
            threshold,
        } => match comparison {
            PriceComparison::Under => property.assessed_value < *threshold,
            PriceComparison::Equal => property.assessed_value == *threshold,
            PriceComparison::Above => property.assessed_value > *threshold,
        },
    }
}

/// Returns a new collection of exactly the records matching `criterion`,
/// preserving relative order.
#[must_use]
pub fn apply(assessments: &PropertyAssessments, criterion: &FilterCriterion) -> PropertyAssessments {
    let filtered: Vec<PropertyAssessment> = assessments
        .iter()
        .filter(|property| matches(property, criterion))
        .cloned()
        .collect();

    log::debug!(
        "Filter [{criterion}]: {} of {} records match",
        filtered.len(),
        assessments.len()
    );

    PropertyAssessments::new(filtered)
}

/// Applies criteria in sequence, narrowing the collection at each step.
#[must_use]
pub fn apply_all(
    assessments: &PropertyAssessments,
    criteria: &[FilterCriterion],
) -> PropertyAssessments {
    let mut current = assessments.clone();
    for criterion in criteria {
        current = apply(&current, criterion);
    }
    current
}

/// Sorted, deduplicated values of the given categorical field, for
/// populating selection prompts.
#[must_use]
pub fn distinct_values(assessments: &PropertyAssessments, field: CategoryField) -> Vec<String> {
    let values: BTreeSet<String> = match field {
        CategoryField::Neighborhood => assessments
            .iter()
            .map(|property| property.neighborhood.name.clone())
            .collect(),
        CategoryField::Ward => assessments
            .iter()
            .map(|property| property.neighborhood.ward.clone())
            .collect(),
        CategoryField::AssessmentClass => assessments
            .iter()
            .flat_map(|property| {
                property
                    .assessment_class
                    .class_names()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect(),
    };

    values.into_iter().collect()
}
