//! End-to-end CSV import and export against an in-memory project store.
//!
//! Run with: `cargo test --test import_export_test`
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use portfolio_admin::error::ApiError;
use portfolio_admin::models::projects::{self, NewProject, StringList};
use portfolio_admin::transfer::{ProjectStore, SkippedRow, export_csv, import_csv};

/// Records every create call; names listed in `fail_with` are rejected with
/// the given error instead of being stored. `listing_error` makes the
/// existing-names lookup fail.
#[derive(Default)]
struct MemoryStore {
    existing: Vec<String>,
    listing_error: Option<fn() -> ApiError>,
    created: Mutex<Vec<NewProject>>,
    fail_with: HashMap<String, fn() -> ApiError>,
}

impl MemoryStore {
    fn with_existing(names: &[&str]) -> Self {
        Self {
            existing: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn created_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .created
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.project_name.clone())
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn project_names(&self) -> Result<Vec<String>, ApiError> {
        if let Some(make_err) = self.listing_error {
            return Err(make_err());
        }
        Ok(self.existing.clone())
    }

    async fn create_project(&self, project: NewProject) -> Result<Uuid, ApiError> {
        if let Some(make_err) = self.fail_with.get(&project.project_name) {
            return Err(make_err());
        }
        self.created.lock().unwrap().push(project);
        Ok(Uuid::new_v4())
    }
}

fn skipped(name: &str, reason: &str) -> SkippedRow {
    SkippedRow {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[tokio::test]
async fn duplicate_within_batch_keeps_first_occurrence() {
    let store = MemoryStore::default();
    let csv = "Title,Tech\nFoo,React\nFoo,Vue\n";

    let outcome = import_csv(&store, csv, 4).await;

    assert_eq!(outcome.inserted, vec!["Foo"]);
    assert_eq!(outcome.skipped, vec![skipped("Foo", "Already exists")]);

    let created = store.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].technology, "React");
}

#[tokio::test]
async fn rows_matching_stored_names_are_never_created() {
    let store = MemoryStore::with_existing(&["  Acme Store "]);
    let csv = "Project Name,Technology\nACME STORE,Shopify\nBlog,WordPress\n";

    let outcome = import_csv(&store, csv, 2).await;

    assert_eq!(outcome.inserted, vec!["Blog"]);
    assert_eq!(outcome.skipped, vec![skipped("ACME STORE", "Already exists")]);
    assert_eq!(store.created_names(), vec!["Blog"]);
}

#[tokio::test]
async fn missing_required_columns_reject_the_file() {
    let store = MemoryStore::default();
    let csv = "Client,Notes\nAcme,hello\n";

    let outcome = import_csv(&store, csv, 4).await;

    assert!(outcome.inserted.is_empty());
    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.skipped[0].reason.contains("Project Name"));
    assert!(outcome.skipped[0].reason.contains("Technology"));
    assert!(store.created_names().is_empty());
}

#[tokio::test]
async fn empty_file_is_reported_not_errored() {
    let store = MemoryStore::default();
    let outcome = import_csv(&store, "", 4).await;

    assert!(outcome.inserted.is_empty());
    assert_eq!(outcome.skipped, vec![skipped("CSV file", "CSV file is empty")]);
}

#[tokio::test]
async fn failures_are_classified_and_do_not_stop_the_batch() {
    let mut store = MemoryStore::default();
    store
        .fail_with
        .insert("Taken".to_string(), || ApiError::Conflict("dupe".into()));
    store
        .fail_with
        .insert("Flaky".to_string(), || ApiError::Internal("connection reset".into()));

    let csv = "\
Project Name,Technology,Start Date,Invoice Amount
Good One,Rust,2024-01-15,100
Bad Date,Rust,someday,
Negative,Rust,,-5
Taken,Rust,,
Flaky,Rust,,
No Tech,,,
Good Two,Go,15/02/2024,\"1,000\"
";

    let outcome = import_csv(&store, csv, 3).await;

    assert_eq!(outcome.inserted, vec!["Good One", "Good Two"]);
    assert_eq!(
        outcome.skipped,
        vec![
            skipped("Bad Date", "Invalid data format"),
            skipped("Negative", "Validation error"),
            skipped("Taken", "Project already exists"),
            skipped("Flaky", "connection reset"),
            skipped("No Tech", "Missing required field: Technology"),
        ]
    );

    let created = store.created.lock().unwrap();
    let two = created
        .iter()
        .find(|p| p.project_name == "Good Two")
        .unwrap();
    assert_eq!(two.invoice_amount, Some(1000.0));
    assert_eq!(two.start_date, chrono::NaiveDate::from_ymd_opt(2024, 2, 15));
}

#[tokio::test]
async fn unavailable_storage_still_yields_an_outcome() {
    let store = MemoryStore {
        listing_error: Some(|| ApiError::Internal("connection refused".into())),
        ..Default::default()
    };

    let outcome = import_csv(&store, "Title,Tech\nFoo,React\n", 4).await;

    assert!(outcome.inserted.is_empty());
    assert_eq!(
        outcome.skipped,
        vec![skipped(
            "CSV file",
            "Could not load existing projects: connection refused"
        )]
    );
    assert!(store.created_names().is_empty());
}

#[tokio::test]
async fn nameless_row_is_labelled_with_its_file_line() {
    let store = MemoryStore::default();
    let csv = "Title,Tech\n\n\nA,\"multi\nline\"\n,React\n";

    let outcome = import_csv(&store, csv, 4).await;

    assert_eq!(outcome.inserted, vec!["A"]);
    assert_eq!(
        outcome.skipped,
        vec![skipped("Line 6", "Missing required field: Project Name")]
    );
}

#[tokio::test]
async fn every_row_fails_without_aborting() {
    let store = MemoryStore::default();
    let csv = "Title,Tech,Start\nA,Rust,bad\nB,Rust,worse\n";

    let outcome = import_csv(&store, csv, 1).await;

    assert!(outcome.inserted.is_empty());
    assert_eq!(outcome.skipped.len(), 2);
}

fn stored(name: &str, tech: &str) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        project_name: name.to_string(),
        technology: tech.to_string(),
        category: Some("E-commerce".to_string()),
        industry: Some("Retail".to_string()),
        description: Some("A long\n\nmulti-line   description, with commas".to_string()),
        page_builder: None,
        client_name: Some("Jane \"JJ\" Doe".to_string()),
        website_link: Some("https://example.com".to_string()),
        bid_platform: Some("Upwork".to_string()),
        bid_platform_url: None,
        invoice_amount: Some(2500.0),
        start_date: chrono::NaiveDate::from_ymd_opt(2023, 11, 2),
        completion_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 20),
        testimonials: None,
        tag: StringList(vec!["shop".to_string(), "b2b".to_string()]),
        client_invoices: StringList(vec!["https://files.example.com/inv-1.pdf".to_string()]),
        created_at: chrono::Utc::now(),
        updated_at: None,
    }
}

#[tokio::test]
async fn export_then_import_reproduces_names_and_technologies() {
    let originals = vec![
        stored("Acme, Inc. Storefront", "Shopify"),
        stored("Portfolio Site", "React"),
        stored("Clinic Booking", "Laravel"),
    ];

    let csv = export_csv(&originals).unwrap();
    assert!(csv.starts_with('\u{feff}'));

    let store = MemoryStore::default();
    let outcome = import_csv(&store, &csv, 4).await;

    assert!(outcome.skipped.is_empty(), "{:?}", outcome.skipped);

    let mut expected: Vec<(String, String)> = originals
        .iter()
        .map(|p| (p.project_name.clone(), p.technology.clone()))
        .collect();
    let mut actual: Vec<(String, String)> = store
        .created
        .lock()
        .unwrap()
        .iter()
        .map(|p| (p.project_name.clone(), p.technology.clone()))
        .collect();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);

    let created = store.created.lock().unwrap();
    let acme = created
        .iter()
        .find(|p| p.project_name.starts_with("Acme"))
        .unwrap();
    assert_eq!(acme.client_name.as_deref(), Some("Jane \"JJ\" Doe"));
    assert_eq!(acme.tag, vec!["shop", "b2b"]);
    assert_eq!(acme.client_invoices, vec!["https://files.example.com/inv-1.pdf"]);
    assert_eq!(acme.invoice_amount, Some(2500.0));
    assert_eq!(acme.start_date, chrono::NaiveDate::from_ymd_opt(2023, 11, 2));
}
