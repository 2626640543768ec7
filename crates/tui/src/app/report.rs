use api_types::stats::Stats;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// The three headline figures, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCards {
    pub total_income: String,
    pub total_expense: String,
    pub net: String,
}

impl SummaryCards {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            total_income: fixed2(stats.total_income),
            total_expense: fixed2(stats.total_expense),
            net: fixed2(stats.net),
        }
    }
}

/// Income and expense per month, months in ascending key order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthChart {
    pub months: Vec<String>,
    pub income: Vec<Decimal>,
    pub expense: Vec<Decimal>,
}

impl MonthChart {
    pub fn from_stats(stats: &Stats) -> Self {
        let months = stats.by_month.keys().cloned().collect::<Vec<_>>();
        let income = months
            .iter()
            .map(|month| stats.by_month[month].income)
            .collect();
        let expense = months
            .iter()
            .map(|month| stats.by_month[month].expense)
            .collect();
        Self {
            months,
            income,
            expense,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub label: String,
    pub value: Decimal,
    /// Percentage of the sum of absolute values, 0..=100.
    pub share: f64,
}

/// The category pie, one slice per category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    pub slices: Vec<CategorySlice>,
}

impl CategoryChart {
    pub fn from_stats(stats: &Stats) -> Self {
        let total: Decimal = stats.by_category.values().map(|value| value.abs()).sum();
        let total = total.to_f64().unwrap_or(0.0);

        let slices = stats
            .by_category
            .iter()
            .map(|(label, value)| {
                let share = if total > 0.0 {
                    value.abs().to_f64().unwrap_or(0.0) / total * 100.0
                } else {
                    0.0
                };
                CategorySlice {
                    label: label.clone(),
                    value: *value,
                    share,
                }
            })
            .collect();

        Self { slices }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Chart instances. Rebuilt from scratch on every load, never patched.
#[derive(Debug, Default)]
pub struct Charts {
    pub month: Option<MonthChart>,
    pub category: Option<CategoryChart>,
}

impl Charts {
    pub fn rebuild(&mut self, stats: &Stats) {
        self.destroy();
        self.month = Some(MonthChart::from_stats(stats));
        self.category = Some(CategoryChart::from_stats(stats));
    }

    pub fn destroy(&mut self) {
        self.month = None;
        self.category = None;
    }
}

/// Two decimals, halves rounded away from zero.
pub fn fixed2(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// Bar height in whole currency units.
pub fn whole_units(value: Decimal) -> u64 {
    value
        .abs()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}
