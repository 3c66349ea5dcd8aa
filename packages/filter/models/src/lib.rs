#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Filter criterion types for property queries.
//!
//! Criteria form a closed tagged-variant set rather than string-keyed
//! dispatch: every way the explorer can narrow the collection is one
//! [`FilterCriterion`] variant. The enums parse from the user-facing
//! tokens shown in prompts and CLI flags, and display as those same
//! tokens.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// Garage criterion: `All` matches every record and filtering by it is
/// the identity transform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum GarageFilter {
    /// Do not restrict by garage.
    #[strum(serialize = "All")]
    All,
    /// Only properties with a garage (`Y` in the source data).
    #[strum(serialize = "Y")]
    WithGarage,
    /// Only properties without a garage (`N` in the source data).
    #[strum(serialize = "N")]
    WithoutGarage,
}

impl fmt::Display for GarageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::WithGarage => write!(f, "Y"),
            Self::WithoutGarage => write!(f, "N"),
        }
    }
}

/// How an assessed value compares against a price threshold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum PriceComparison {
    /// Strictly less than the threshold.
    Under,
    /// Exactly equal to the threshold.
    Equal,
    /// Strictly greater than the threshold.
    Above,
}

impl PriceComparison {
    /// Every comparison, in prompt order.
    pub const ALL: &[Self] = &[Self::Under, Self::Equal, Self::Above];
}

impl fmt::Display for PriceComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Under => write!(f, "Under"),
            Self::Equal => write!(f, "Equal"),
            Self::Above => write!(f, "Above"),
        }
    }
}

/// The categorical fields a distinct-value query can target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum CategoryField {
    /// Neighborhood names.
    Neighborhood,
    /// Ward names.
    Ward,
    /// Assessment class names, across all class slots.
    #[strum(serialize = "Assessment Class", serialize = "assessment-class")]
    AssessmentClass,
}

impl CategoryField {
    /// Every field, in prompt order.
    pub const ALL: &[Self] = &[Self::Neighborhood, Self::AssessmentClass, Self::Ward];
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neighborhood => write!(f, "Neighborhood"),
            Self::Ward => write!(f, "Ward"),
            Self::AssessmentClass => write!(f, "Assessment Class"),
        }
    }
}

/// One way of narrowing a collection of assessments.
///
/// String criteria compare with exact, case-sensitive equality; no
/// normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterCriterion {
    /// Records in the named neighborhood.
    Neighborhood(String),
    /// Records in the named ward.
    Ward(String),
    /// Records with the named class anywhere in their class split.
    AssessmentClass(String),
    /// Records matching the garage flag.
    Garage(GarageFilter),
    /// Records whose assessed value compares against the threshold.
    Price {
        /// Direction of the comparison.
        comparison: PriceComparison,
        /// Threshold in whole dollars.
        threshold: u64,
    },
}

impl FilterCriterion {
    /// The category field this criterion targets, if it is a categorical
    /// (string-valued) criterion.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryField> {
        match self {
            Self::Neighborhood(_) => Some(CategoryField::Neighborhood),
            Self::Ward(_) => Some(CategoryField::Ward),
            Self::AssessmentClass(_) => Some(CategoryField::AssessmentClass),
            Self::Garage(_) | Self::Price { .. } => None,
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neighborhood(value) => write!(f, "Neighborhood = {value}"),
            Self::Ward(value) => write!(f, "Ward = {value}"),
            Self::AssessmentClass(value) => write!(f, "Assessment Class = {value}"),
            Self::Garage(garage) => write!(f, "Garage = {garage}"),
            Self::Price {
                comparison,
                threshold,
            } => write!(f, "Assessed Value {comparison} {threshold}"),
        }
    }
}
