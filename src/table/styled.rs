use std::fmt;

use serde::{Serialize, Deserialize};

use crate::config::HighlightColors;
use crate::highlight::CellStyle;
use crate::render::html_escape;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledColumn {
    pub name: String,
    pub values: Vec<f64>,
    /// Parallel to `values`.
    pub styles: Vec<CellStyle>,
}

/// A snapshot table with a style tag on every cell, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledTable {
    pub columns: Vec<StyledColumn>,
    pub colors: HighlightColors,
}

impl StyledTable {
    pub fn rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Renders an HTML `<table>`; the first column is the epoch index.
    pub fn to_html(&self) -> String {
        let header: String = self.columns.iter()
            .map(|c| format!("<th>{}</th>", html_escape(&c.name)))
            .collect();

        let rows: String = (0..self.rows()).map(|r| {
            let cells: String = self.columns.iter().map(|c| {
                let css = c.styles.get(r).copied().unwrap_or(CellStyle::None).css(&self.colors);
                let style = if css.is_empty() { String::new() } else { format!(" style=\"{}\"", css) };
                format!("<td{}>{:.6}</td>", style, c.values[r])
            }).collect();
            format!("<tr><th>{}</th>{}</tr>", r, cells)
        }).collect();

        format!(
            "<table class=\"history-table\">\n  <thead><tr><th></th>{}</tr></thead>\n  <tbody>{}</tbody>\n</table>",
            header, rows
        )
    }
}

/// Plain-text rendering for logs and terminals; min cells are marked with
/// `v`, max cells with `^`.
impl fmt::Display for StyledTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}", "epoch")?;
        for c in &self.columns {
            write!(f, " {:>14}", c.name)?;
        }
        writeln!(f)?;

        for r in 0..self.rows() {
            write!(f, "{:>5}", r)?;
            for c in &self.columns {
                let mark = match c.styles.get(r) {
                    Some(CellStyle::Min) => 'v',
                    Some(CellStyle::Max) => '^',
                    _ => ' ',
                };
                write!(f, " {:>13.6}{}", c.values[r], mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
