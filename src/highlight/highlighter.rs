use serde::{Serialize, Deserialize};

use crate::config::HighlightColors;
use crate::error::{DashboardError, Result};

/// Style tag for one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    None,
    Min,
    Max,
}

impl CellStyle {
    /// CSS declaration for this cell, empty for `None`.
    pub fn css(self, colors: &HighlightColors) -> String {
        match self {
            CellStyle::None => String::new(),
            CellStyle::Min  => format!("background-color: {}", colors.min),
            CellStyle::Max  => format!("background-color: {}", colors.max),
        }
    }
}

/// Tags every position holding the column minimum as `Min` and every
/// position holding the maximum as `Max`.
///
/// All tied positions are tagged. When a position is both (one row, or a
/// constant column) `Min` wins.
pub fn highlight_min_max(column: &[f64]) -> Result<Vec<CellStyle>> {
    let first = *column.first().ok_or(DashboardError::EmptyColumn)?;

    let (min, max) = column.iter().skip(1)
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    Ok(column.iter()
        .map(|&v| {
            if v == min {
                CellStyle::Min
            } else if v == max {
                CellStyle::Max
            } else {
                CellStyle::None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use CellStyle::{Max, Min, None as Plain};

    #[test]
    fn tags_min_and_max() {
        let styles = highlight_min_max(&[0.5, 0.2, 0.9, 0.4]).unwrap();
        assert_eq!(styles, vec![Plain, Min, Max, Plain]);
    }

    #[test]
    fn single_row_is_min() {
        assert_eq!(highlight_min_max(&[3.0]).unwrap(), vec![Min]);
    }

    #[test]
    fn constant_column_is_all_min() {
        assert_eq!(highlight_min_max(&[1.0, 1.0, 1.0]).unwrap(), vec![Min, Min, Min]);
    }

    #[test]
    fn ties_are_all_tagged() {
        let styles = highlight_min_max(&[0.1, 0.7, 0.1, 0.7, 0.3]).unwrap();
        assert_eq!(styles, vec![Min, Max, Min, Max, Plain]);
    }

    #[test]
    fn empty_column_fails() {
        assert!(matches!(highlight_min_max(&[]), Err(DashboardError::EmptyColumn)));
    }

    #[test]
    fn css_uses_configured_colors() {
        let colors = HighlightColors::default();
        assert_eq!(Min.css(&colors), "background-color: #5fba7d");
        assert_eq!(Max.css(&colors), "background-color: #e67575");
        assert_eq!(Plain.css(&colors), "");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_min_and_max_are_tagged(column in prop::collection::vec(-100.0f64..100.0, 1..40)) {
            let styles = highlight_min_max(&column).unwrap();
            prop_assert_eq!(styles.len(), column.len());

            let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            for (v, style) in column.iter().zip(&styles) {
                match style {
                    Min   => prop_assert_eq!(*v, min),
                    Max   => { prop_assert_eq!(*v, max); prop_assert!(min != max); }
                    Plain => prop_assert!(*v != min && *v != max),
                }
            }
            prop_assert!(styles.contains(&Min));
            if min != max {
                prop_assert!(styles.contains(&Max));
            }
        }
    }
}
