#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core record types for city property-assessment data.
//!
//! One [`PropertyAssessment`] corresponds to one row of the city's annual
//! assessment CSV: the account key, the civic address, the neighborhood and
//! ward it sits in, the assessed dollar value, the geographic location, and
//! the land-use classification split. Records are plain immutable values;
//! collection-level queries live in `property_map_assessment`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Civic address of an assessed property.
///
/// Any of the numeric parts may be missing in the source data; the street
/// name may be blank. The suite number is carried for completeness but
/// never participates in the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Suite or unit number, when present.
    pub suite: Option<u32>,
    /// House number, when present.
    pub house_number: Option<u32>,
    /// Street name, possibly empty.
    pub street_name: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.house_number {
            None => write!(f, "N/A"),
            Some(house) if self.street_name.is_empty() => write!(f, "{house}"),
            Some(house) => write!(f, "{house} {}", self.street_name),
        }
    }
}

/// Geographic location of an assessed property.
///
/// The WKT point string from the source is carried verbatim alongside the
/// parsed coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in decimal degrees (WGS84).
    pub lat: f64,
    /// Longitude in decimal degrees (WGS84).
    pub lng: f64,
    /// Source WKT representation, e.g. `POINT (-113.47 53.55)`.
    pub point_wkt: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A city neighborhood and the municipal ward it belongs to.
///
/// Many records reference the same neighborhood; each record carries its
/// own copy so that records stay self-contained after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    /// Numeric neighborhood identifier.
    pub id: u32,
    /// Neighborhood name, e.g. `"CROMDALE"`.
    pub name: String,
    /// Ward name, e.g. `"Ward 2"`.
    pub ward: String,
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ward)
    }
}

/// One land-use class and its share of the total assessed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentClassEntry {
    /// Class name, e.g. `"RESIDENTIAL"`.
    pub name: String,
    /// Share of the assessed value, in whole percent.
    pub percentage: u8,
}

/// The land-use classification split of a property: up to three
/// class/percentage pairs, in source order.
///
/// Blank class slots in the source are not represented. A complete record
/// has percentages summing to 100; incomplete records keep whatever the
/// source provided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentClassSplit {
    entries: Vec<AssessmentClassEntry>,
}

impl AssessmentClassSplit {
    /// Creates a split from the given entries, dropping any whose class
    /// name is blank.
    #[must_use]
    pub fn new(entries: Vec<AssessmentClassEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter(|entry| !entry.name.is_empty())
                .collect(),
        }
    }

    /// Returns the class entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[AssessmentClassEntry] {
        &self.entries
    }

    /// Iterates over the class names in source order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Returns whether any class entry name equals `name` exactly.
    #[must_use]
    pub fn contains_class(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Sum of the class percentages.
    #[must_use]
    pub fn total_percentage(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| u32::from(entry.percentage))
            .sum()
    }

    /// Whether the percentages account for the full assessed value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_percentage() == 100
    }
}

impl fmt::Display for AssessmentClassSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}%", entry.name, entry.percentage)?;
        }
        write!(f, "]")
    }
}

/// One tax-assessment record, immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAssessment {
    /// Account number, unique within a collection.
    pub account_id: u32,
    /// Civic address.
    pub address: Address,
    /// Whether the property has a garage.
    pub has_garage: bool,
    /// Neighborhood and ward.
    pub neighborhood: Neighborhood,
    /// Assessed value in whole dollars.
    pub assessed_value: u64,
    /// Geographic location.
    pub location: Location,
    /// Land-use classification split.
    pub assessment_class: AssessmentClassSplit,
}

impl PropertyAssessment {
    /// The garage flag as it appears in the source data.
    #[must_use]
    pub const fn garage_flag(&self) -> &'static str {
        if self.has_garage { "Y" } else { "N" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(entries: &[(&str, u8)]) -> AssessmentClassSplit {
        AssessmentClassSplit::new(
            entries
                .iter()
                .map(|&(name, percentage)| AssessmentClassEntry {
                    name: name.to_string(),
                    percentage,
                })
                .collect(),
        )
    }

    #[test]
    fn address_renders_house_and_street() {
        let address = Address {
            suite: Some(2015),
            house_number: Some(8340),
            street_name: "124 STREET NW".to_string(),
        };
        assert_eq!(address.to_string(), "8340 124 STREET NW");
    }

    #[test]
    fn address_renders_house_only_when_street_blank() {
        let address = Address {
            suite: Some(32),
            house_number: Some(9018),
            street_name: String::new(),
        };
        assert_eq!(address.to_string(), "9018");
    }

    #[test]
    fn address_renders_placeholder_without_house_number() {
        let address = Address {
            suite: Some(32),
            house_number: None,
            street_name: String::new(),
        };
        assert_eq!(address.to_string(), "N/A");
    }

    #[test]
    fn neighborhood_renders_name_and_ward() {
        let neighborhood = Neighborhood {
            id: 1004,
            name: "Mill Woods".to_string(),
            ward: "Ward 2".to_string(),
        };
        assert_eq!(neighborhood.to_string(), "Mill Woods (Ward 2)");
    }

    #[test]
    fn location_renders_coordinate_pair() {
        let location = Location {
            lat: 70.230271,
            lng: -13.421236,
            point_wkt: "POINT (-13.421236 70.230271)".to_string(),
        };
        assert_eq!(location.to_string(), "(70.230271, -13.421236)");
    }

    #[test]
    fn class_split_renders_present_entries() {
        let two = split(&[("COMMERCIAL", 75), ("RESIDENTIAL", 25)]);
        assert_eq!(two.to_string(), "[COMMERCIAL 75%, RESIDENTIAL 25%]");

        let three = split(&[("FARMLAND", 50), ("COMMERCIAL", 25), ("RESIDENTIAL", 25)]);
        assert_eq!(
            three.to_string(),
            "[FARMLAND 50%, COMMERCIAL 25%, RESIDENTIAL 25%]"
        );
    }

    #[test]
    fn class_split_drops_blank_slots() {
        let one = split(&[("RESIDENTIAL", 100), ("", 0), ("", 0)]);
        assert_eq!(one.entries().len(), 1);
        assert_eq!(one.to_string(), "[RESIDENTIAL 100%]");
    }

    #[test]
    fn class_split_membership_is_exact() {
        let class_split = split(&[("OTHER RESIDENTIAL", 100)]);
        assert!(class_split.contains_class("OTHER RESIDENTIAL"));
        assert!(!class_split.contains_class("RESIDENTIAL"));
    }

    #[test]
    fn class_split_percentage_total() {
        assert!(split(&[("COMMERCIAL", 75), ("RESIDENTIAL", 25)]).is_complete());
        assert!(!split(&[("COMMERCIAL", 75)]).is_complete());
        assert_eq!(split(&[]).total_percentage(), 0);
    }

    #[test]
    fn garage_flag_round_trips() {
        let neighborhood = Neighborhood {
            id: 1070,
            name: "DIMMADOME".to_string(),
            ward: "Ward 1".to_string(),
        };
        let record = PropertyAssessment {
            account_id: 1_000_002,
            address: Address {
                suite: None,
                house_number: Some(8340),
                street_name: "124 STREET NW".to_string(),
            },
            has_garage: false,
            neighborhood,
            assessed_value: 500_001,
            location: Location {
                lat: 53.555_912_01,
                lng: -113.470_311_1,
                point_wkt: "POINT (-113.4703111 53.55591201)".to_string(),
            },
            assessment_class: split(&[("RESIDENTIAL", 100)]),
        };
        assert_eq!(record.garage_flag(), "N");
        assert_eq!(record.assessed_value, 500_001);
    }
}
