//! Expense Trends
//!
//! The cumulative spending curve, drawn as horizontal text bars.

use super::aggregate::{daily_cumulative, DailyTotal};
use crate::config::Settings;
use crate::display::{format_bar, format_title, separator};
use crate::error::{TrackerError, TrackerResult};
use crate::models::ExpenseEntry;

/// Cumulative daily spending
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub points: Vec<DailyTotal>,
}

impl TrendReport {
    /// Build the curve; fails with `EmptyData` when there is nothing to plot
    pub fn generate(entries: &[ExpenseEntry]) -> TrackerResult<Self> {
        if entries.is_empty() {
            return Err(TrackerError::EmptyData("no expenses to plot".into()));
        }
        Ok(Self {
            points: daily_cumulative(entries),
        })
    }

    /// Format the curve for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = &settings.currency_symbol;
        let mut output = format_title("Cumulative Expense Trends");

        let max = self
            .points
            .last()
            .map(|p| p.cumulative.cents() as f64)
            .unwrap_or(0.0);

        output.push_str(&format!(
            "{:<10} {:>12} {:>14}  {}\n",
            "Date", "Day", "Cumulative", ""
        ));
        output.push_str(&separator(40 + settings.chart_width));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>12} {:>14}  {}\n",
                point.date,
                point.amount.format_with_symbol(symbol),
                point.cumulative.format_with_symbol(symbol),
                format_bar(point.cumulative.cents() as f64, max, settings.chart_width)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::aggregate::tests::{entry, household};

    #[test]
    fn test_generate_trends() {
        let report = TrendReport::generate(&household()).unwrap();
        assert_eq!(report.points.len(), 2);
        assert_eq!(report.points[1].cumulative.cents(), 3500);
    }

    #[test]
    fn test_nothing_to_plot() {
        assert!(matches!(
            TrendReport::generate(&[]).unwrap_err(),
            TrackerError::EmptyData(_)
        ));
    }

    #[test]
    fn test_last_bar_is_full() {
        let entries = vec![
            entry("Alice", "2024-01-01", 100, "food"),
            entry("Alice", "2024-01-02", 100, "food"),
        ];
        let settings = Settings {
            chart_width: 10,
            ..Settings::default()
        };
        let output = TrendReport::generate(&entries)
            .unwrap()
            .format_terminal(&settings);

        let last_line = output.lines().last().unwrap();
        assert!(last_line.ends_with(&"█".repeat(10)));
        assert!(output.contains("2024-01-01"));
    }
}
