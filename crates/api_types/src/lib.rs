use std::{collections::BTreeMap, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Message used when the server rejects a request without saying why.
pub const DEFAULT_ERROR: &str = "API error";

pub mod envelope {
    use super::*;

    /// Wrapper around every response of the endpoint.
    ///
    /// `{ok: true, data: ...}` on success, `{ok: false, error: "..."}` otherwise.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Envelope<T> {
        pub ok: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub data: Option<T>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }

    impl<T> Envelope<T> {
        pub fn success(data: T) -> Self {
            Self {
                ok: true,
                data: Some(data),
                error: None,
            }
        }

        pub fn failure(message: impl Into<String>) -> Self {
            Self {
                ok: false,
                data: None,
                error: Some(message.into()),
            }
        }

        /// Splits the envelope into its payload or the server message.
        ///
        /// A rejection without a usable message falls back to [`DEFAULT_ERROR`].
        pub fn into_result(self) -> Result<Option<T>, String> {
            if self.ok {
                return Ok(self.data);
            }
            Err(self
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ERROR.to_string()))
        }
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TransactionType {
        Income,
        #[default]
        Expense,
    }

    impl TransactionType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "Income",
                Self::Expense => "Expense",
            }
        }

        pub fn toggled(self) -> Self {
            match self {
                Self::Income => Self::Expense,
                Self::Expense => Self::Income,
            }
        }
    }

    /// A spreadsheet row as returned by `?action=list`.
    ///
    /// Sheets are loosely typed, so every column decodes leniently: numeric
    /// ids become strings, blank amounts become zero and unknown types are
    /// kept as `None`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        #[serde(rename = "ID", default, deserialize_with = "lenient_text")]
        pub id: String,
        #[serde(rename = "Date", default, deserialize_with = "lenient_text")]
        pub date: String,
        #[serde(rename = "Category", default, deserialize_with = "lenient_text")]
        pub category: String,
        #[serde(rename = "Description", default, deserialize_with = "lenient_text")]
        pub description: String,
        #[serde(rename = "Amount", default, deserialize_with = "lenient_amount")]
        pub amount: Decimal,
        #[serde(rename = "Type", default, deserialize_with = "lenient_type")]
        pub kind: Option<TransactionType>,
    }

    /// Editable columns of a row, as sent in `create`/`update` payloads.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionFields {
        #[serde(rename = "Date")]
        pub date: String,
        #[serde(rename = "Category")]
        pub category: String,
        #[serde(rename = "Description")]
        pub description: String,
        #[serde(rename = "Amount")]
        pub amount: Decimal,
        #[serde(rename = "Type")]
        pub kind: TransactionType,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExistingTransaction {
        #[serde(rename = "ID")]
        pub id: String,
        #[serde(flatten)]
        pub fields: TransactionFields,
    }

    /// What the form is about to save.
    ///
    /// Ids are assigned by the remote store, so a draft without one can only
    /// be created and a draft with one can only be updated.
    #[derive(Clone, Debug, PartialEq)]
    pub enum TransactionDraft {
        New(TransactionFields),
        Existing { id: String, fields: TransactionFields },
    }

    impl TransactionDraft {
        pub fn into_command(self) -> super::command::Command {
            use super::command::Command;

            match self {
                Self::New(payload) => Command::Create { payload },
                Self::Existing { id, fields } => Command::Update {
                    payload: ExistingTransaction { id, fields },
                },
            }
        }
    }

    impl Transaction {
        /// Case-insensitive substring match on description and category.
        ///
        /// `needle` must already be lowercase.
        pub fn matches(&self, needle: &str) -> bool {
            self.description.to_lowercase().contains(needle)
                || self.category.to_lowercase().contains(needle)
        }
    }

    fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
        })
    }

    fn lenient_type<'de, D>(deserializer: D) -> Result<Option<TransactionType>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }))
    }

    pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        match value {
            None | Some(serde_json::Value::Null) => Ok(Decimal::ZERO),
            Some(serde_json::Value::Number(number)) => {
                parse_decimal(&number.to_string()).map_err(serde::de::Error::custom)
            }
            Some(serde_json::Value::String(text)) if text.trim().is_empty() => Ok(Decimal::ZERO),
            Some(serde_json::Value::String(text)) => {
                parse_decimal(text.trim()).map_err(serde::de::Error::custom)
            }
            Some(other) => Err(serde::de::Error::custom(format!(
                "invalid amount: {other}"
            ))),
        }
    }

    /// Per-key amounts, each decoded like a single cell.
    pub(crate) fn lenient_amount_map<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
        raw.unwrap_or_default()
            .into_iter()
            .map(|(key, value)| {
                lenient_amount(value)
                    .map(|amount| (key, amount))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }

    /// Parses plain (`12.50`) and scientific (`1e3`) decimal notation.
    pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|err| format!("invalid amount {raw:?}: {err}"))
    }
}

pub mod command {
    use super::*;
    use transaction::{ExistingTransaction, TransactionFields};

    /// Mutating requests, tagged by `action` on the wire.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "action", rename_all = "snake_case")]
    pub enum Command {
        Create { payload: TransactionFields },
        Update { payload: ExistingTransaction },
        Delete { id: String },
    }

    impl Command {
        pub fn name(&self) -> &'static str {
            match self {
                Self::Create { .. } => "create",
                Self::Update { .. } => "update",
                Self::Delete { .. } => "delete",
            }
        }
    }

    /// POST body: the command plus the cached password.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CommandRequest {
        #[serde(flatten)]
        pub command: Command,
        pub password: String,
    }
}

pub mod query {
    /// Read requests, sent as `?action=<name>`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum ReadAction {
        List,
        Stats,
    }

    impl ReadAction {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::List => "list",
                Self::Stats => "stats",
            }
        }
    }
}

pub mod stats {
    use super::*;
    use transaction::{lenient_amount, lenient_amount_map};

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct MonthTotals {
        #[serde(default, deserialize_with = "lenient_amount")]
        pub income: Decimal,
        #[serde(default, deserialize_with = "lenient_amount")]
        pub expense: Decimal,
    }

    /// Aggregates computed by the server from the whole sheet.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Stats {
        #[serde(default, deserialize_with = "lenient_amount")]
        pub total_income: Decimal,
        #[serde(default, deserialize_with = "lenient_amount")]
        pub total_expense: Decimal,
        #[serde(default, deserialize_with = "lenient_amount")]
        pub net: Decimal,
        /// Keyed by month (`YYYY-MM`); the map keeps keys sorted.
        #[serde(default)]
        pub by_month: BTreeMap<String, MonthTotals>,
        #[serde(default, deserialize_with = "lenient_amount_map")]
        pub by_category: BTreeMap<String, Decimal>,
    }
}
