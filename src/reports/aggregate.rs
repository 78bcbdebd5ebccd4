//! Pure aggregations over loaded ledger entries
//!
//! None of these touch storage. Mappings are `BTreeMap`s so output order is
//! stable and sorted by key.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseEntry, Money, Month};

/// One point of the cumulative spending curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    /// Sum of all entries on this date
    pub amount: Money,
    /// Running total up to and including this date
    pub cumulative: Money,
}

/// Total spent per household member
pub fn total_by_member(entries: &[ExpenseEntry]) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.name.clone()).or_default() += entry.amount;
    }
    totals
}

/// Average spend per day over the inclusive span of dates present
pub fn average_daily_spend(entries: &[ExpenseEntry]) -> TrackerResult<Money> {
    let (first, last) = date_range(entries)
        .ok_or_else(|| TrackerError::EmptyData("no expenses logged yet".into()))?;

    let days = (last - first).num_days() + 1;
    let total: Money = entries.iter().map(|e| e.amount).sum();

    Ok(total.div_round(days))
}

/// Per-date totals in ascending date order with a running sum
pub fn daily_cumulative(entries: &[ExpenseEntry]) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for entry in entries {
        *by_date.entry(entry.date).or_default() += entry.amount;
    }

    let mut running = Money::zero();
    by_date
        .into_iter()
        .map(|(date, amount)| {
            running += amount;
            DailyTotal {
                date,
                amount,
                cumulative: running,
            }
        })
        .collect()
}

/// Month of the most recent date in the ledger
pub fn latest_month(entries: &[ExpenseEntry]) -> TrackerResult<Month> {
    entries
        .iter()
        .map(|e| e.date)
        .max()
        .map(Month::of)
        .ok_or_else(|| TrackerError::EmptyData("no expenses logged yet".into()))
}

/// Entries dated within `month`, in ledger order
pub fn entries_in_month(entries: &[ExpenseEntry], month: Month) -> Vec<&ExpenseEntry> {
    entries.iter().filter(|e| month.contains(e.date)).collect()
}

/// Total spent per category within `month`
pub fn spend_by_category(entries: &[ExpenseEntry], month: Month) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for entry in entries_in_month(entries, month) {
        *totals.entry(entry.category.clone()).or_default() += entry.amount;
    }
    totals
}

/// Total spent per calendar month, oldest first
pub fn monthly_totals(entries: &[ExpenseEntry]) -> BTreeMap<Month, Money> {
    let mut totals: BTreeMap<Month, Money> = BTreeMap::new();
    for entry in entries {
        *totals.entry(Month::of(entry.date)).or_default() += entry.amount;
    }
    totals
}

fn date_range(entries: &[ExpenseEntry]) -> Option<(NaiveDate, NaiveDate)> {
    let first = entries.iter().map(|e| e.date).min()?;
    let last = entries.iter().map(|e| e.date).max()?;
    Some((first, last))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn entry(name: &str, date: &str, cents: i64, category: &str) -> ExpenseEntry {
        ExpenseEntry::new(
            name,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            "",
            Money::from_cents(cents),
            category,
        )
        .unwrap()
    }

    pub(crate) fn household() -> Vec<ExpenseEntry> {
        vec![
            entry("Alice", "2024-01-01", 1000, "food"),
            entry("Bob", "2024-01-01", 2000, "food"),
            entry("Alice", "2024-01-02", 500, "fuel"),
        ]
    }

    #[test]
    fn test_total_by_member() {
        let totals = total_by_member(&household());
        assert_eq!(totals["Alice"], Money::from_cents(1500));
        assert_eq!(totals["Bob"], Money::from_cents(2000));
        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_average_daily_spend() {
        // 35.00 over 2 days
        assert_eq!(
            average_daily_spend(&household()).unwrap(),
            Money::from_cents(1750)
        );
    }

    #[test]
    fn test_average_single_entry_is_its_amount() {
        let entries = vec![entry("Alice", "2024-06-30", 4321, "food")];
        assert_eq!(
            average_daily_spend(&entries).unwrap(),
            Money::from_cents(4321)
        );
    }

    #[test]
    fn test_average_counts_days_without_spending() {
        let entries = vec![
            entry("Alice", "2024-01-01", 1000, "food"),
            entry("Alice", "2024-01-10", 1000, "food"),
        ];
        assert_eq!(average_daily_spend(&entries).unwrap(), Money::from_cents(200));
    }

    #[test]
    fn test_average_of_nothing_is_empty_data() {
        let err = average_daily_spend(&[]).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyData(_)));
    }

    #[test]
    fn test_daily_cumulative_groups_and_sorts() {
        let entries = vec![
            entry("Alice", "2024-01-03", 300, "food"),
            entry("Bob", "2024-01-01", 100, "food"),
            entry("Carol", "2024-01-03", 50, "fuel"),
            entry("Alice", "2024-01-02", 0, "misc"),
        ];

        let points = daily_cumulative(&entries);
        let summary: Vec<_> = points
            .iter()
            .map(|p| (p.date.to_string(), p.amount.cents(), p.cumulative.cents()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2024-01-01".to_string(), 100, 100),
                ("2024-01-02".to_string(), 0, 100),
                ("2024-01-03".to_string(), 350, 450),
            ]
        );
        assert!(points.windows(2).all(|w| w[0].cumulative <= w[1].cumulative));
    }

    #[test]
    fn test_latest_month() {
        let entries = vec![
            entry("Alice", "2024-03-31", 100, "food"),
            entry("Alice", "2023-12-01", 100, "food"),
            entry("Alice", "2024-02-10", 100, "food"),
        ];
        assert_eq!(latest_month(&entries).unwrap(), Month::new(2024, 3).unwrap());
        assert!(matches!(
            latest_month(&[]).unwrap_err(),
            TrackerError::EmptyData(_)
        ));
    }

    #[test]
    fn test_spend_by_category_is_windowed() {
        let mut entries = household();
        entries.push(entry("Bob", "2024-02-01", 9900, "food"));

        let jan = spend_by_category(&entries, Month::new(2024, 1).unwrap());
        assert_eq!(jan["food"], Money::from_cents(3000));
        assert_eq!(jan["fuel"], Money::from_cents(500));
    }

    #[test]
    fn test_monthly_totals() {
        let mut entries = household();
        entries.push(entry("Bob", "2023-12-24", 4000, "gifts"));

        let totals: Vec<_> = monthly_totals(&entries)
            .into_iter()
            .map(|(m, t)| (m.to_string(), t.cents()))
            .collect();
        assert_eq!(
            totals,
            vec![("2023-12".to_string(), 4000), ("2024-01".to_string(), 3500)]
        );
    }
}
