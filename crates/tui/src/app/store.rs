use api_types::transaction::Transaction;

/// Last list fetched from the server, kept only for local filtering.
#[derive(Debug, Default)]
pub struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    /// Swaps in a freshly fetched list; nothing is merged.
    pub fn replace(&mut self, items: Vec<Transaction>) {
        self.items = items;
    }

    pub fn all(&self) -> &[Transaction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records whose description or category contain `query`, ignoring case.
    ///
    /// An empty query yields the whole list in server order.
    pub fn filtered(&self, query: &str) -> Vec<&Transaction> {
        let needle = query.to_lowercase();
        self.items.iter().filter(|tx| tx.matches(&needle)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, category: &str, description: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            ..Transaction::default()
        }
    }

    fn store() -> TransactionStore {
        let mut store = TransactionStore::default();
        store.replace(vec![
            tx("1", "Food", "Bakery"),
            tx("2", "Rent", "March rent"),
            tx("3", "Salary", "ACME payroll"),
        ]);
        store
    }

    #[test]
    fn filter_matches_category_or_description() {
        let store = store();
        let ids = |list: Vec<&Transaction>| list.iter().map(|tx| tx.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(store.filtered("RENT")), vec!["2"]);
        assert_eq!(ids(store.filtered("acme")), vec!["3"]);
        assert_eq!(ids(store.filtered("a")), vec!["1", "2", "3"]);
        assert!(store.filtered("zzz").is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_non_destructive() {
        let store = store();
        let once = store.filtered("food");
        let twice = store.filtered("food");
        assert_eq!(once, twice);
        assert_eq!(store.len(), 3);
        assert_eq!(store.filtered("").len(), 3);
    }

    #[test]
    fn replace_drops_previous_records() {
        let mut store = store();
        store.replace(vec![tx("9", "Misc", "")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id, "9");
    }
}
