#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Assessed-value color banding and dynamic legend generation.
//!
//! Markers are colored by where a property's assessed value falls relative
//! to a center value (normally the collection median). Classification is a
//! pure function over an ordered ladder of threshold ratios: a value lands
//! in the first band whose `value <= center * ratio` bound holds, with a
//! dedicated band for zero values and an open-ended top band above all
//! thresholds. Band order matches threshold order, so classification is
//! monotonic in the value for a fixed center.

use serde::{Deserialize, Serialize};

/// Marker color for a property highlighted by an account search.
pub const HIGHLIGHT_COLOR: &str = "#ff00ff";

/// Legend label for the highlight row.
pub const HIGHLIGHT_LABEL: &str = "Selected";

/// One of the twelve value bands, ordered from zero to furthest above
/// center.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ValueBand {
    /// Assessed value of exactly zero.
    Zero,
    /// At or below 50% of center.
    Below50,
    /// At or below 70% of center.
    Below30,
    /// At or below 85% of center.
    Below15,
    /// At or below 95% of center.
    Below5,
    /// At or below 98% of center.
    Below2,
    /// At or below center.
    Center,
    /// At or below 102% of center.
    Above2,
    /// At or below 105% of center.
    Above5,
    /// At or below 115% of center.
    Above15,
    /// At or below 130% of center.
    Above30,
    /// Above every threshold.
    Above50,
}

impl ValueBand {
    /// Every band, in classification order.
    pub const ALL: &[Self] = &[
        Self::Zero,
        Self::Below50,
        Self::Below30,
        Self::Below15,
        Self::Below5,
        Self::Below2,
        Self::Center,
        Self::Above2,
        Self::Above5,
        Self::Above15,
        Self::Above30,
        Self::Above50,
    ];

    /// Upper classification bound as a ratio of center. `None` for the
    /// zero band and the open-ended top band.
    #[must_use]
    pub const fn threshold_ratio(self) -> Option<f64> {
        match self {
            Self::Zero | Self::Above50 => None,
            Self::Below50 => Some(0.50),
            Self::Below30 => Some(0.70),
            Self::Below15 => Some(0.85),
            Self::Below5 => Some(0.95),
            Self::Below2 => Some(0.98),
            Self::Center => Some(1.00),
            Self::Above2 => Some(1.02),
            Self::Above5 => Some(1.05),
            Self::Above15 => Some(1.15),
            Self::Above30 => Some(1.30),
        }
    }

    /// Ratio of center used for the band's legend dollar figure. The top
    /// band has no classification bound but is displayed at 1.5x center.
    #[must_use]
    pub const fn display_ratio(self) -> Option<f64> {
        match self {
            Self::Zero => None,
            Self::Above50 => Some(1.5),
            other => other.threshold_ratio(),
        }
    }

    /// Fixed human label for the band.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Zero => "Zero Value",
            Self::Below50 => "50% Below Center",
            Self::Below30 => "30% Below Center",
            Self::Below15 => "15% Below Center",
            Self::Below5 => "5% Below Center",
            Self::Below2 => "2% Below Center",
            Self::Center => "Center",
            Self::Above2 => "2% Above Center",
            Self::Above5 => "5% Above Center",
            Self::Above15 => "15% Above Center",
            Self::Above30 => "30% Above Center",
            Self::Above50 => "50% Above Center",
        }
    }

    /// Fixed marker color for the band, as a `#rrggbb` hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Zero => "#000000",
            Self::Below50 => "#4b2ca3",
            Self::Below30 => "#0077bb",
            Self::Below15 => "#00b891",
            Self::Below5 => "#6ccc63",
            Self::Below2 => "#d9ed4c",
            Self::Center => "#ffff66",
            Self::Above2 => "#ffcc33",
            Self::Above5 => "#ff8c00",
            Self::Above15 => "#e64a19",
            Self::Above30 => "#c70039",
            Self::Above50 => "#800026",
        }
    }
}

/// Classifies an assessed value against a center value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn classify(center: u64, value: u64) -> ValueBand {
    if value == 0 {
        return ValueBand::Zero;
    }

    let value = value as f64;
    let center = center as f64;
    for band in ValueBand::ALL.iter().copied() {
        if let Some(ratio) = band.threshold_ratio() {
            if value <= center * ratio {
                return band;
            }
        }
    }

    ValueBand::Above50
}

/// Marker color for an assessed value relative to a center value.
#[must_use]
pub fn band_color(center: u64, value: u64) -> &'static str {
    classify(center, value).color()
}

/// One rendered legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Row text, including the band's dollar figure.
    pub label: String,
    /// Swatch color as a `#rrggbb` hex string.
    pub color: &'static str,
}

/// Builds the legend for the given center value: one row per band with
/// its dollar figure, plus the fixed highlight row.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn legend_entries(center: u64) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = ValueBand::ALL
        .iter()
        .copied()
        .map(|band| {
            let label = band.display_ratio().map_or_else(
                || format!("{}: $0", band.label()),
                |ratio| {
                    let amount = (center as f64 * ratio).round() as u64;
                    format!("{}: ${}", band.label(), format_grouped(amount))
                },
            );
            LegendEntry {
                label,
                color: band.color(),
            }
        })
        .collect();

    entries.push(LegendEntry {
        label: HIGHLIGHT_LABEL.to_string(),
        color: HIGHLIGHT_COLOR,
    });

    entries
}

/// Formats a dollar amount with thousands separators.
#[must_use]
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(char::from(*byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_value_is_its_own_band() {
        assert_eq!(classify(400_000, 0), ValueBand::Zero);
        assert_eq!(band_color(400_000, 0), "#000000");
    }

    #[test]
    fn values_land_in_their_band() {
        let center = 400_000;
        assert_eq!(classify(center, 100_000), ValueBand::Below50);
        assert_eq!(classify(center, 200_000), ValueBand::Below50);
        assert_eq!(classify(center, 250_000), ValueBand::Below30);
        assert_eq!(classify(center, 300_000), ValueBand::Below15);
        assert_eq!(classify(center, 350_000), ValueBand::Below5);
        assert_eq!(classify(center, 385_000), ValueBand::Below2);
        assert_eq!(classify(center, 395_000), ValueBand::Center);
        assert_eq!(classify(center, 400_000), ValueBand::Center);
        assert_eq!(classify(center, 405_000), ValueBand::Above2);
        assert_eq!(classify(center, 410_000), ValueBand::Above5);
        assert_eq!(classify(center, 430_000), ValueBand::Above15);
        assert_eq!(classify(center, 500_000), ValueBand::Above30);
        assert_eq!(classify(center, 700_000), ValueBand::Above50);
    }

    #[test]
    fn classification_is_monotonic_in_the_value() {
        let center = 333_333;
        let mut previous = ValueBand::Zero;
        for value in (0..=700_000).step_by(777) {
            let band = classify(center, value);
            assert!(
                band >= previous,
                "band regressed at value {value}: {band:?} < {previous:?}"
            );
            previous = band;
        }
    }

    #[test]
    fn zero_center_pushes_positive_values_to_the_top_band() {
        assert_eq!(classify(0, 1), ValueBand::Above50);
        assert_eq!(classify(0, 0), ValueBand::Zero);
    }

    #[test]
    fn legend_rows_cover_every_band_plus_highlight() {
        let entries = legend_entries(431_000);
        assert_eq!(entries.len(), ValueBand::ALL.len() + 1);
        assert_eq!(entries[0].label, "Zero Value: $0");
        assert_eq!(entries[0].color, "#000000");
        assert_eq!(entries[1].label, "50% Below Center: $215,500");
        assert_eq!(entries[6].label, "Center: $431,000");
        assert_eq!(entries[6].color, "#ffff66");
        assert_eq!(entries[11].label, "50% Above Center: $646,500");
        assert_eq!(entries[11].color, "#800026");
        assert_eq!(entries[12].label, HIGHLIGHT_LABEL);
        assert_eq!(entries[12].color, HIGHLIGHT_COLOR);
    }

    #[test]
    fn grouped_formatting_inserts_separators() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(431_000), "431,000");
        assert_eq!(format_grouped(1_237_751_000), "1,237,751,000");
    }
}
