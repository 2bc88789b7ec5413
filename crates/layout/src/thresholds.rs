//! Ordered step-function tables.
//!
//! Both the title wrap width and the font size are chosen by comparing a
//! character count against a handful of cutoffs. A [`ThresholdTable`] holds
//! those cutoffs as data: each band starts at `min_len` and extends up to the
//! next band's `min_len` (exclusive); the last band is unbounded.

use serde::{Deserialize, Serialize};

use crate::LayoutConfigError;

/// A single band of a [`ThresholdTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBand<T> {
    /// Inclusive lower bound, in characters.
    pub min_len: usize,
    /// Value selected for lengths inside this band.
    pub value: T,
}

/// Range-to-value lookup over character counts.
///
/// Construction guarantees at least one band, a first band starting at
/// zero, and strictly increasing lower bounds, so every length maps to
/// exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<ThresholdBand<T>>",
    into = "Vec<ThresholdBand<T>>",
    bound(
        serialize = "T: Clone + Serialize",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub struct ThresholdTable<T> {
    bands: Vec<ThresholdBand<T>>,
}

impl<T> ThresholdTable<T> {
    /// Build a table from `(min_len, value)` bands in ascending order.
    pub fn new(bands: Vec<ThresholdBand<T>>) -> Result<Self, LayoutConfigError> {
        let first = bands.first().ok_or(LayoutConfigError::EmptyTable)?;
        if first.min_len != 0 {
            return Err(LayoutConfigError::FirstBandNotZero {
                min_len: first.min_len,
            });
        }
        for pair in bands.windows(2) {
            if pair[1].min_len <= pair[0].min_len {
                return Err(LayoutConfigError::UnorderedBands {
                    previous: pair[0].min_len,
                    next: pair[1].min_len,
                });
            }
        }
        Ok(Self { bands })
    }

    /// Convenience constructor from `(min_len, value)` pairs.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (usize, T)>,
    ) -> Result<Self, LayoutConfigError> {
        Self::new(
            pairs
                .into_iter()
                .map(|(min_len, value)| ThresholdBand { min_len, value })
                .collect(),
        )
    }

    /// Value of the band containing `len`.
    pub fn lookup(&self, len: usize) -> &T {
        let mut selected = &self.bands[0].value;
        for band in &self.bands[1..] {
            if band.min_len > len {
                break;
            }
            selected = &band.value;
        }
        selected
    }

    /// Iterate over the selectable values in band order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.bands.iter().map(|band| &band.value)
    }
}

impl<T> TryFrom<Vec<ThresholdBand<T>>> for ThresholdTable<T> {
    type Error = LayoutConfigError;

    fn try_from(bands: Vec<ThresholdBand<T>>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl<T> From<ThresholdTable<T>> for Vec<ThresholdBand<T>> {
    fn from(table: ThresholdTable<T>) -> Self {
        table.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_picks_band_by_lower_bound() {
        let table = ThresholdTable::from_pairs([(0, 15), (40, 18), (80, 24)]).unwrap();
        assert_eq!(*table.lookup(0), 15);
        assert_eq!(*table.lookup(39), 15);
        assert_eq!(*table.lookup(40), 18);
        assert_eq!(*table.lookup(79), 18);
        assert_eq!(*table.lookup(80), 24);
        assert_eq!(*table.lookup(10_000), 24);
    }

    #[test]
    fn test_single_band_covers_everything() {
        let table = ThresholdTable::from_pairs([(0, "only")]).unwrap();
        assert_eq!(*table.lookup(0), "only");
        assert_eq!(*table.lookup(usize::MAX), "only");
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = ThresholdTable::<u32>::new(vec![]).unwrap_err();
        assert!(matches!(err, LayoutConfigError::EmptyTable));
    }

    #[test]
    fn test_rejects_gap_at_start() {
        let err = ThresholdTable::from_pairs([(10, 1u32)]).unwrap_err();
        assert!(matches!(err, LayoutConfigError::FirstBandNotZero { min_len: 10 }));
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let err = ThresholdTable::from_pairs([(0, 1u32), (80, 2), (40, 3)]).unwrap_err();
        assert!(matches!(
            err,
            LayoutConfigError::UnorderedBands {
                previous: 80,
                next: 40
            }
        ));
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: ThresholdTable<u32> =
            serde_json::from_str(r#"[{"min_len":0,"value":60},{"min_len":80,"value":50}]"#)
                .unwrap();
        assert_eq!(*ok.lookup(100), 50);

        let bad = serde_json::from_str::<ThresholdTable<u32>>(
            r#"[{"min_len":5,"value":60}]"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serializes_as_plain_band_list() {
        let table = ThresholdTable::from_pairs([(0, 60u32), (80, 50)]).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[1]["min_len"], 80);
        assert_eq!(json[1]["value"], 50);
    }
}
