#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The [`PropertyAssessments`] collection: an immutable, ordered snapshot
//! of assessment records with derived aggregate queries.
//!
//! The full collection is built once from the CSV at startup; filtering
//! produces new collections rather than mutating in place. Every aggregate
//! returns `Option`, with `None` for the empty collection, so callers are
//! forced to handle the "no data" state instead of reading an undefined
//! value.

use property_map_assessment_models::PropertyAssessment;
use serde::{Deserialize, Serialize};

/// An ordered, immutable collection of [`PropertyAssessment`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAssessments {
    properties: Vec<PropertyAssessment>,
}

impl PropertyAssessments {
    /// Creates a collection from records in source order.
    #[must_use]
    pub const fn new(properties: Vec<PropertyAssessment>) -> Self {
        Self { properties }
    }

    /// Returns the records in source order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyAssessment] {
        &self.properties
    }

    /// Iterates over the records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyAssessment> {
        self.properties.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Finds the record with the given account number.
    ///
    /// Account numbers are unique within a collection, so at most one
    /// record matches. An unknown account is `None`, never a panic.
    #[must_use]
    pub fn find_by_account_id(&self, account_id: u32) -> Option<&PropertyAssessment> {
        self.properties
            .iter()
            .find(|property| property.account_id == account_id)
    }

    /// Smallest assessed value, or `None` for an empty collection.
    #[must_use]
    pub fn min_value(&self) -> Option<u64> {
        self.properties
            .iter()
            .map(|property| property.assessed_value)
            .min()
    }

    /// Largest assessed value, or `None` for an empty collection.
    #[must_use]
    pub fn max_value(&self) -> Option<u64> {
        self.properties
            .iter()
            .map(|property| property.assessed_value)
            .max()
    }

    /// Spread between the largest and smallest assessed values.
    #[must_use]
    pub fn range(&self) -> Option<u64> {
        Some(self.max_value()? - self.min_value()?)
    }

    /// Integer-truncated arithmetic mean of the assessed values.
    #[must_use]
    pub fn mean_value(&self) -> Option<u64> {
        if self.properties.is_empty() {
            return None;
        }
        let sum: u64 = self
            .properties
            .iter()
            .map(|property| property.assessed_value)
            .sum();
        Some(sum / self.properties.len() as u64)
    }

    /// Median assessed value: the sorted middle value, or the
    /// integer-truncated average of the two middle values for even counts.
    #[must_use]
    pub fn median_value(&self) -> Option<u64> {
        if self.properties.is_empty() {
            return None;
        }
        let mut values: Vec<u64> = self
            .properties
            .iter()
            .map(|property| property.assessed_value)
            .collect();
        values.sort_unstable();

        let mid = values.len() / 2;
        if values.len() % 2 == 0 {
            Some((values[mid - 1] + values[mid]) / 2)
        } else {
            Some(values[mid])
        }
    }

    /// All aggregates in one summary, or `None` for an empty collection.
    #[must_use]
    pub fn statistics(&self) -> Option<ValueStatistics> {
        Some(ValueStatistics {
            count: self.len() as u64,
            min: self.min_value()?,
            max: self.max_value()?,
            range: self.range()?,
            mean: self.mean_value()?,
            median: self.median_value()?,
        })
    }
}

impl From<Vec<PropertyAssessment>> for PropertyAssessments {
    fn from(properties: Vec<PropertyAssessment>) -> Self {
        Self::new(properties)
    }
}

impl<'a> IntoIterator for &'a PropertyAssessments {
    type Item = &'a PropertyAssessment;
    type IntoIter = std::slice::Iter<'a, PropertyAssessment>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

/// Descriptive statistics over the assessed values of a non-empty
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueStatistics {
    /// Number of records.
    pub count: u64,
    /// Smallest assessed value.
    pub min: u64,
    /// Largest assessed value.
    pub max: u64,
    /// `max - min`.
    pub range: u64,
    /// Integer-truncated arithmetic mean.
    pub mean: u64,
    /// Sorted-middle median.
    pub median: u64,
}

#[cfg(test)]
mod tests {
    use property_map_assessment_models::{
        Address, AssessmentClassEntry, AssessmentClassSplit, Location, Neighborhood,
    };

    use super::*;

    fn record(account_id: u32, assessed_value: u64) -> PropertyAssessment {
        PropertyAssessment {
            account_id,
            address: Address {
                suite: None,
                house_number: Some(8340),
                street_name: "WHYTE AVENUE NW".to_string(),
            },
            has_garage: false,
            neighborhood: Neighborhood {
                id: 1070,
                name: "DONSDALE".to_string(),
                ward: "Ward 2".to_string(),
            },
            assessed_value,
            location: Location {
                lat: 53.551_112_01,
                lng: -113.409_312_1,
                point_wkt: "POINT (-113.4093121 53.55111201)".to_string(),
            },
            assessment_class: AssessmentClassSplit::new(vec![AssessmentClassEntry {
                name: "RESIDENTIAL".to_string(),
                percentage: 100,
            }]),
        }
    }

    fn collection(values: &[u64]) -> PropertyAssessments {
        PropertyAssessments::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| record(u32::try_from(i).unwrap() + 1, value))
                .collect(),
        )
    }

    #[test]
    fn empty_collection_has_no_aggregates() {
        let empty = PropertyAssessments::default();
        assert!(empty.is_empty());
        assert_eq!(empty.min_value(), None);
        assert_eq!(empty.max_value(), None);
        assert_eq!(empty.range(), None);
        assert_eq!(empty.mean_value(), None);
        assert_eq!(empty.median_value(), None);
        assert!(empty.statistics().is_none());
    }

    #[test]
    fn even_count_median_averages_the_middle_pair() {
        let pair = collection(&[500_001_111, 100_055]);
        assert_eq!(pair.median_value(), Some(250_050_583));
        assert_eq!(pair.min_value(), Some(100_055));
        assert_eq!(pair.max_value(), Some(500_001_111));
        assert_eq!(pair.range(), Some(499_901_056));
    }

    #[test]
    fn odd_count_median_is_the_middle_value() {
        let odd = collection(&[900, 100, 500]);
        assert_eq!(odd.median_value(), Some(500));
    }

    #[test]
    fn mean_truncates_toward_zero() {
        let pair = collection(&[1, 2]);
        assert_eq!(pair.mean_value(), Some(1));
    }

    #[test]
    fn statistics_are_consistently_ordered() {
        let stats = collection(&[250_000, 1_000, 730_500, 730_500, 98_000])
            .statistics()
            .unwrap();
        assert_eq!(stats.count, 5);
        assert!(stats.min <= stats.median);
        assert!(stats.median <= stats.max);
        assert_eq!(stats.range, stats.max - stats.min);
    }

    #[test]
    fn lookup_by_account_id() {
        let assessments = collection(&[100, 200, 300]);
        let found = assessments.find_by_account_id(2).unwrap();
        assert_eq!(found.assessed_value, 200);
        assert!(assessments.find_by_account_id(45_454).is_none());
    }

    #[test]
    fn records_keep_source_order() {
        let assessments = collection(&[300, 100, 200]);
        let values: Vec<u64> = assessments.iter().map(|p| p.assessed_value).collect();
        assert_eq!(values, vec![300, 100, 200]);
    }
}
