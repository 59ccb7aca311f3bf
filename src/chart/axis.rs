use serde::{Serialize, Deserialize};

/// How an axis maps values onto the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scale {
    /// Evenly spaced categories, in insertion order.
    Ordinal,
    /// Continuous range; an absent bound is derived from the data.
    Linear { min: Option<f64>, max: Option<f64> },
}

impl Scale {
    pub fn linear(min: Option<f64>, max: Option<f64>) -> Scale {
        Scale::Linear { min, max }
    }

    /// Resolves the drawn range for `values`.
    ///
    /// Auto-scaled ends get 5% headroom; with no data and no bounds the range
    /// is `[0, 1]`. A degenerate range is widened so it can be drawn.
    pub fn resolve(&self, values: &[f64]) -> (f64, f64) {
        let (min, max) = match *self {
            Scale::Ordinal => (None, None),
            Scale::Linear { min, max } => (min, max),
        };

        let finite = || values.iter().copied().filter(|v| v.is_finite());
        let data_lo = finite().fold(f64::INFINITY, f64::min);
        let data_hi = finite().fold(f64::NEG_INFINITY, f64::max);
        let has_data = data_lo.is_finite();
        let pad = if !has_data {
            0.0
        } else if data_hi > data_lo {
            (data_hi - data_lo) * 0.05
        } else {
            (data_lo.abs() * 0.05).max(0.5)
        };

        let lo = min.unwrap_or(if has_data { data_lo - pad } else { 0.0 });
        let hi = max.unwrap_or(if has_data { data_hi + pad } else { 1.0 });

        if hi > lo {
            (lo, hi)
        } else {
            (lo - 0.5, lo + 0.5)
        }
    }
}

/// Which edge of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridLines {
    Solid,
    Dashed,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    pub scale: Scale,
    pub side: Side,
    pub grid_lines: GridLines,
}

impl Axis {
    pub fn new(label: impl Into<String>, scale: Scale, side: Side, grid_lines: GridLines) -> Axis {
        Axis { label: label.into(), scale, side, grid_lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_bounds_win_over_data() {
        let scale = Scale::linear(Some(0.0), Some(1.0));
        assert_eq!(scale.resolve(&[5.0, 7.0]), (0.0, 1.0));
    }

    #[test]
    fn empty_auto_scale_is_unit_range() {
        assert_eq!(Scale::linear(None, None).resolve(&[]), (0.0, 1.0));
    }

    #[test]
    fn auto_scale_pads_data() {
        let (lo, hi) = Scale::linear(None, None).resolve(&[0.0, 10.0]);
        assert!((lo + 0.5).abs() < 1e-9);
        assert!((hi - 10.5).abs() < 1e-9);
    }

    #[test]
    fn one_sided_bound_keeps_pin() {
        let (lo, hi) = Scale::linear(Some(0.0), None).resolve(&[2.0, 4.0]);
        assert_eq!(lo, 0.0);
        assert!(hi > 4.0);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let (lo, hi) = Scale::linear(Some(2.0), Some(2.0)).resolve(&[]);
        assert!(hi > lo);
    }
}
