//! In-process stand-in for the spreadsheet web app.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use api_types::{
    command::{Command, CommandRequest},
    envelope::Envelope,
    stats::{MonthTotals, Stats},
    transaction::{Transaction, TransactionFields, TransactionType},
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};

pub const PASSWORD: &str = "letmein";

#[derive(Debug, Default)]
struct Sheet {
    rows: Vec<Transaction>,
    next_id: u64,
    list_calls: usize,
    stats_calls: usize,
    commands: Vec<String>,
    stats_without_data: bool,
    list_error: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockSheet {
    inner: Arc<Mutex<Sheet>>,
}

impl MockSheet {
    /// Binds to an ephemeral port and returns the endpoint URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/exec", get(read).post(write))
            .route("/broken", get(broken))
            .route("/html", get(html_page).post(html_page))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/exec")
    }

    pub fn seed(&self, rows: Vec<(&str, &str, &str, TransactionType)>) {
        let mut sheet = self.inner.lock().unwrap();
        for (date, category, amount, kind) in rows {
            sheet.next_id += 1;
            let id = sheet.next_id.to_string();
            sheet.rows.push(Transaction {
                id,
                date: date.to_string(),
                category: category.to_string(),
                description: format!("{category} seed"),
                amount: amount.parse().unwrap(),
                kind: Some(kind),
            });
        }
    }

    pub fn rows(&self) -> Vec<Transaction> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.inner.lock().unwrap().list_calls
    }

    pub fn stats_calls(&self) -> usize {
        self.inner.lock().unwrap().stats_calls
    }

    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().unwrap().commands.clone()
    }

    pub fn answer_stats_without_data(&self) {
        self.inner.lock().unwrap().stats_without_data = true;
    }

    /// Makes every `list` answer `{ok: false, error: message}`.
    pub fn fail_list(&self, message: &str) {
        self.inner.lock().unwrap().list_error = Some(message.to_string());
    }
}

async fn read(
    State(mock): State<MockSheet>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut sheet = mock.inner.lock().unwrap();
    let body = match params.get("action").map(String::as_str) {
        Some("list") => {
            sheet.list_calls += 1;
            match &sheet.list_error {
                Some(message) => serde_json::to_value(Envelope::<()>::failure(message.clone())),
                None => serde_json::to_value(Envelope::success(sheet.rows.clone())),
            }
        }
        Some("stats") if sheet.stats_without_data => {
            sheet.stats_calls += 1;
            Ok(json!({"ok": true}))
        }
        Some("stats") => {
            sheet.stats_calls += 1;
            serde_json::to_value(Envelope::success(compute_stats(&sheet.rows)))
        }
        _ => serde_json::to_value(Envelope::<()>::failure("unknown action")),
    };
    Json(body.unwrap())
}

async fn write(State(mock): State<MockSheet>, Json(request): Json<CommandRequest>) -> Json<Value> {
    let mut sheet = mock.inner.lock().unwrap();
    if request.password != PASSWORD {
        return Json(json!({"ok": false, "error": "bad password"}));
    }
    sheet.commands.push(request.command.name().to_string());

    match request.command {
        Command::Create { payload } => {
            sheet.next_id += 1;
            let id = sheet.next_id.to_string();
            sheet.rows.push(row(id.clone(), payload));
            Json(json!({"ok": true, "data": {"id": id}}))
        }
        Command::Update { payload } => {
            let Some(existing) = sheet.rows.iter_mut().find(|tx| tx.id == payload.id) else {
                return Json(json!({"ok": false, "error": "ID not found"}));
            };
            *existing = row(payload.id, payload.fields);
            Json(json!({"ok": true}))
        }
        Command::Delete { id } => {
            sheet.rows.retain(|tx| tx.id != id);
            Json(json!({"ok": true}))
        }
    }
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

/// Script hosts report failures as an HTML page with status 200.
async fn html_page() -> Html<&'static str> {
    Html("<html><body>Exception: sheet not found</body></html>")
}

fn row(id: String, fields: TransactionFields) -> Transaction {
    Transaction {
        id,
        date: fields.date,
        category: fields.category,
        description: fields.description,
        amount: fields.amount,
        kind: Some(fields.kind),
    }
}

fn compute_stats(rows: &[Transaction]) -> Stats {
    let mut stats = Stats::default();
    for tx in rows {
        let amount = tx.amount.abs();
        let month = tx.date.chars().take(7).collect::<String>();
        let totals = stats
            .by_month
            .entry(month)
            .or_insert_with(MonthTotals::default);
        match tx.kind {
            Some(TransactionType::Income) => {
                stats.total_income += amount;
                totals.income += amount;
            }
            _ => {
                stats.total_expense += amount;
                totals.expense += amount;
                *stats
                    .by_category
                    .entry(tx.category.clone())
                    .or_insert(Decimal::ZERO) += amount;
            }
        }
    }
    stats.net = stats.total_income - stats.total_expense;
    stats
}
