use crate::domain::model::Quote;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Revenue figures over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub revenue: f64,
    pub count: usize,
    pub average_ticket: f64,
    pub by_status: BTreeMap<String, f64>,
    /// Keyed by `YYYY-MM`.
    pub by_month: BTreeMap<String, f64>,
}

impl FinancialSummary {
    /// Missing bounds default to the earliest and latest quote dates.
    pub fn compute(quotes: &[Quote], from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let from = from.or_else(|| quotes.iter().map(|q| q.date).min());
        let to = to.or_else(|| quotes.iter().map(|q| q.date).max());

        let selected: Vec<&Quote> = quotes
            .iter()
            .filter(|q| from.map_or(true, |f| q.date >= f) && to.map_or(true, |t| q.date <= t))
            .collect();

        let amount = |q: &Quote| if q.total.is_finite() { q.total } else { 0.0 };

        let mut by_status = BTreeMap::new();
        let mut by_month = BTreeMap::new();
        for quote in &selected {
            *by_status
                .entry(quote.status.label().to_string())
                .or_insert(0.0) += amount(quote);
            *by_month
                .entry(quote.date.format("%Y-%m").to_string())
                .or_insert(0.0) += amount(quote);
        }

        let revenue: f64 = selected.iter().map(|q| amount(q)).sum();
        let count = selected.len();
        let average_ticket = if count > 0 {
            revenue / count as f64
        } else {
            0.0
        };

        Self {
            from,
            to,
            revenue,
            count,
            average_ticket,
            by_status,
            by_month,
        }
    }
}
