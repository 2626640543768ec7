use api_types::transaction::{
    Transaction, TransactionDraft, TransactionFields, TransactionType, parse_decimal,
};
use chrono::{Local, NaiveDate};

use super::table::display_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Category,
    Description,
    Amount,
    Type,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Date,
        Self::Category,
        Self::Description,
        Self::Amount,
        Self::Type,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Type => "Type",
        }
    }

    /// `None` past the last field.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Date => Some(Self::Category),
            Self::Category => Some(Self::Description),
            Self::Description => Some(Self::Amount),
            Self::Amount => Some(Self::Type),
            Self::Type => None,
        }
    }

    /// `None` before the first field.
    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Date => None,
            Self::Category => Some(Self::Date),
            Self::Description => Some(Self::Category),
            Self::Amount => Some(Self::Description),
            Self::Type => Some(Self::Amount),
        }
    }
}

/// Create/edit form. `id` is hidden and only set while editing a row.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub id: Option<String>,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub kind: TransactionType,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Self {
            id: None,
            date: String::new(),
            category: String::new(),
            description: String::new(),
            amount: String::new(),
            kind: TransactionType::default(),
        };
        form.reset(today);
        form
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.id = None;
        self.date = today.format("%Y-%m-%d").to_string();
        self.category.clear();
        self.description.clear();
        self.amount.clear();
        self.kind = TransactionType::Expense;
    }

    /// Copies a row into the form for editing.
    pub fn load(&mut self, tx: &Transaction) {
        self.id = Some(tx.id.clone()).filter(|id| !id.is_empty());
        self.date = display_date(&tx.date);
        self.category = tx.category.clone();
        self.description = tx.description.clone();
        self.amount = tx.amount.normalize().to_string();
        self.kind = tx.kind.unwrap_or_default();
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Text buffer behind a field; the type field is a toggle and has none.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Date => Some(&mut self.date),
            FormField::Category => Some(&mut self.category),
            FormField::Description => Some(&mut self.description),
            FormField::Amount => Some(&mut self.amount),
            FormField::Type => None,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Category => &self.category,
            FormField::Description => &self.description,
            FormField::Amount => &self.amount,
            FormField::Type => self.kind.as_str(),
        }
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    /// Builds the payload, coercing the amount to a decimal.
    pub fn to_draft(&self) -> Result<TransactionDraft, String> {
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err("Amount is required.".to_string());
        }
        let amount = parse_decimal(amount)?;

        let fields = TransactionFields {
            date: self.date.trim().to_string(),
            category: self.category.clone(),
            description: self.description.clone(),
            amount,
            kind: self.kind,
        };

        Ok(match &self.id {
            Some(id) => TransactionDraft::Existing {
                id: id.clone(),
                fields,
            },
            None => TransactionDraft::New(fields),
        })
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
