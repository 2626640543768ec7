mod common;

use api_types::transaction::TransactionType;
use common::{MockSheet, PASSWORD};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sheetbook_tui::{
    app::{App, Focus, Screen},
    config::AppConfig,
    session::{SESSION_KEY, SessionGate, SessionStore},
};

async fn logged_in_app(mock: &MockSheet, password: &str) -> App {
    let config = AppConfig {
        api_url: mock.spawn().await,
        ..AppConfig::default()
    };
    let mut store = SessionStore::in_memory();
    store.set(SESSION_KEY, password).unwrap();
    let mut app = App::with_session(&config, SessionGate::new(store)).unwrap();
    app.start();
    app.settle().await;
    app
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

#[tokio::test]
async fn cached_session_boots_straight_into_dashboard() {
    let mock = MockSheet::default();
    mock.seed(vec![("2025-01-10", "Salary", "100", TransactionType::Income)]);
    let app = logged_in_app(&mock, PASSWORD).await;

    assert_eq!(app.state.screen, Screen::Dashboard);
    assert_eq!(app.state.table.store.len(), 1);
    assert_eq!(mock.list_calls(), 1);
    assert_eq!(mock.stats_calls(), 1);
    assert_eq!(app.in_flight(), 0);
}

#[tokio::test]
async fn login_prompt_gates_until_a_password_is_entered() {
    let mock = MockSheet::default();
    let config = AppConfig {
        api_url: mock.spawn().await,
        ..AppConfig::default()
    };
    let mut app = App::with_session(&config, SessionGate::new(SessionStore::in_memory())).unwrap();
    app.start();
    assert_eq!(app.state.screen, Screen::Login);

    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state.screen, Screen::Login);
    assert!(app.state.login.message.is_some());
    assert_eq!(mock.list_calls(), 0);

    type_text(&mut app, PASSWORD);
    press(&mut app, KeyCode::Enter);
    app.settle().await;
    assert_eq!(app.state.screen, Screen::Dashboard);
    assert!(app.state.login.password.is_empty());
    assert_eq!(mock.list_calls(), 1);
}

#[tokio::test]
async fn submit_without_id_creates_and_reloads() {
    let mock = MockSheet::default();
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.state.form.category = "Food".to_string();
    app.state.form.description = "Bakery".to_string();
    app.state.form.amount = "4.20".to_string();
    app.submit_form();
    app.settle().await;

    assert_eq!(mock.commands(), vec!["create"]);
    assert_eq!(mock.list_calls(), 2);
    let rows = app.state.table.store.all();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "1");
    assert_eq!(rows[0].description, "Bakery");
    assert!(app.state.form.amount.is_empty());
    assert!(!app.state.form.is_editing());
}

#[tokio::test]
async fn editing_a_row_submits_an_update() {
    let mock = MockSheet::default();
    mock.seed(vec![("2025-01-10", "Food", "5", TransactionType::Expense)]);
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.state.focus = Focus::Table;
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.state.form.id.as_deref(), Some("1"));
    assert_eq!(app.state.focus, Focus::Form(sheetbook_tui::app::form::FormField::Date));

    app.state.form.amount = "7.25".to_string();
    press(&mut app, KeyCode::Enter);
    app.settle().await;

    assert_eq!(mock.commands(), vec!["update"]);
    let rows = app.state.table.store.all();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "7.25".parse().unwrap());
    assert!(!app.state.form.is_editing());
}

#[tokio::test]
async fn confirmed_delete_removes_row_from_next_list() {
    let mock = MockSheet::default();
    mock.seed(vec![
        ("2025-01-10", "Food", "5", TransactionType::Expense),
        ("2025-01-11", "Rent", "500", TransactionType::Expense),
    ]);
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.state.focus = Focus::Table;
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.state.table.pending_delete.as_deref(), Some("1"));

    press(&mut app, KeyCode::Char('n'));
    assert!(app.state.table.pending_delete.is_none());
    assert!(mock.commands().is_empty());

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    app.settle().await;

    assert_eq!(mock.commands(), vec!["delete"]);
    let ids = app
        .state
        .table
        .store
        .all()
        .iter()
        .map(|tx| tx.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["2"]);
}

#[tokio::test]
async fn rejected_command_alerts_and_skips_reload() {
    let mock = MockSheet::default();
    let mut app = logged_in_app(&mock, "wrong").await;
    assert_eq!(mock.list_calls(), 1);

    app.state.form.category = "Food".to_string();
    app.state.form.amount = "3".to_string();
    app.submit_form();
    app.settle().await;

    assert_eq!(app.state.alerts.front().map(String::as_str), Some("bad password"));
    assert_eq!(mock.list_calls(), 1);
    assert_eq!(app.state.form.amount, "3");
    assert_eq!(app.state.form.category, "Food");

    // Other keys are swallowed until the alert is dismissed.
    app.state.focus = Focus::Form(sheetbook_tui::app::form::FormField::Category);
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.state.form.category, "Food");
    press(&mut app, KeyCode::Enter);
    assert!(app.state.alerts.is_empty());
}

#[tokio::test]
async fn invalid_amount_never_reaches_the_server() {
    let mock = MockSheet::default();
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.state.form.amount = "abc".to_string();
    app.submit_form();
    app.settle().await;

    assert!(mock.commands().is_empty());
    assert_eq!(app.state.alerts.len(), 1);
}

#[tokio::test]
async fn search_filters_locally_and_clears_without_network() {
    let mock = MockSheet::default();
    mock.seed(vec![
        ("2025-01-10", "Food", "5", TransactionType::Expense),
        ("2025-01-11", "Rent", "500", TransactionType::Expense),
        ("2025-01-12", "Salary", "900", TransactionType::Income),
    ]);
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.state.focus = Focus::Search;
    type_text(&mut app, "RENT");
    assert_eq!(app.state.table.visible().len(), 1);
    assert_eq!(app.state.table.store.len(), 3);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state.table.visible().len(), 3);
    assert_eq!(mock.list_calls(), 1);
    assert_eq!(app.in_flight(), 0);
}

#[tokio::test]
async fn summary_and_charts_follow_server_stats() {
    let mock = MockSheet::default();
    mock.seed(vec![
        ("2025-02-01", "Salary", "100", TransactionType::Income),
        ("2025-01-15", "Food", "40", TransactionType::Expense),
    ]);
    let app = logged_in_app(&mock, PASSWORD).await;

    let summary = app.state.summary.as_ref().unwrap();
    assert_eq!(summary.total_income, "100.00");
    assert_eq!(summary.total_expense, "40.00");
    assert_eq!(summary.net, "60.00");

    let month = app.state.charts.month.as_ref().unwrap();
    assert_eq!(month.months, vec!["2025-01", "2025-02"]);
    let category = app.state.charts.category.as_ref().unwrap();
    assert_eq!(category.slices.len(), 1);
    assert_eq!(category.slices[0].label, "Food");
}

#[tokio::test]
async fn logout_clears_session_and_state() {
    let mock = MockSheet::default();
    mock.seed(vec![("2025-01-10", "Food", "5", TransactionType::Expense)]);
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL))
        .unwrap();

    assert_eq!(app.state.screen, Screen::Login);
    assert!(app.state.table.store.is_empty());
    assert!(app.state.summary.is_none());
    assert!(app.state.charts.month.is_none());
}

#[tokio::test]
async fn responses_for_a_closed_session_are_dropped() {
    let mock = MockSheet::default();
    mock.seed(vec![("2025-01-10", "Food", "5", TransactionType::Expense)]);
    let mut app = logged_in_app(&mock, PASSWORD).await;

    app.reload();
    app.logout().unwrap();
    app.settle().await;

    assert_eq!(app.state.screen, Screen::Login);
    assert!(app.state.table.store.is_empty());
    assert_eq!(app.in_flight(), 0);
}

#[tokio::test]
async fn failed_list_skips_stats_and_alerts() {
    let mock = MockSheet::default();
    mock.seed(vec![("2025-01-10", "Food", "5", TransactionType::Expense)]);
    mock.fail_list("sheet gone");
    let app = logged_in_app(&mock, PASSWORD).await;

    assert_eq!(mock.list_calls(), 1);
    assert_eq!(mock.stats_calls(), 0);
    assert_eq!(app.state.alerts.len(), 1);
    assert_eq!(app.state.alerts.front().map(String::as_str), Some("sheet gone"));
    assert!(app.state.summary.is_none());
    assert!(app.state.table.store.is_empty());
}

#[tokio::test]
async fn rejected_delete_alerts_and_skips_reload() {
    let mock = MockSheet::default();
    mock.seed(vec![("2025-01-10", "Food", "5", TransactionType::Expense)]);
    let mut app = logged_in_app(&mock, "wrong").await;
    assert_eq!(mock.list_calls(), 1);

    app.state.focus = Focus::Table;
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    app.settle().await;

    assert_eq!(app.state.alerts.front().map(String::as_str), Some("bad password"));
    assert_eq!(mock.list_calls(), 1);
    assert_eq!(mock.rows().len(), 1);
    assert_eq!(app.state.table.store.len(), 1);
}
