use api_types::transaction::Transaction;
use chrono::{DateTime, Local, NaiveDate};

use super::{report::fixed2, store::TransactionStore};

#[derive(Debug, Default)]
pub struct TableState {
    pub store: TransactionStore,
    pub query: String,
    pub selected: usize,
    /// Id of the row waiting for delete confirmation.
    pub pending_delete: Option<String>,
}

impl TableState {
    /// Rows currently shown: the store filtered by the search query.
    pub fn visible(&self) -> Vec<&Transaction> {
        self.store.filtered(&self.query)
    }

    pub fn replace(&mut self, items: Vec<Transaction>) {
        self.store.replace(items);
        self.clamp_selection();
    }

    pub fn push_query(&mut self, ch: char) {
        self.query.push(ch);
        self.clamp_selection();
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.clamp_selection();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.visible().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Cells of one table row: date, category, description, amount, type.
pub fn row_cells(tx: &Transaction) -> [String; 5] {
    [
        display_date(&tx.date),
        tx.category.clone(),
        tx.description.clone(),
        fixed2(tx.amount),
        tx.kind.map(|kind| kind.as_str()).unwrap_or("").to_string(),
    ]
}

/// Sheets hand dates back either as `YYYY-MM-DD` or as a UTC timestamp of
/// local midnight; both are shown as a local calendar date.
pub fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant
            .with_timezone(&Local)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
    }
    raw.to_string()
}
