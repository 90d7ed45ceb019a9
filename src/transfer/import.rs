use actix_web::ResponseError;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::projects::CreateProject;
use crate::transfer::dedupe::DuplicateDetector;
use crate::transfer::headers::{Field, HeaderMap};
use crate::transfer::parser::{Row, parse_rows};
use crate::transfer::store::ProjectStore;

pub const ALREADY_EXISTS: &str = "Already exists";
const GENERIC_FAILURE: &str = "Failed to create project";
/// Name used for the single skipped entry of a rejected file.
const FILE_ENTRY: &str = "CSV file";

/// What an import did, row by row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub inserted: Vec<String>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub name: String,
    pub reason: String,
}

impl SkippedRow {
    fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Problems with the file as a whole; any of these ends the import before
/// a single row is looked at.
#[derive(Debug, Error, PartialEq)]
pub enum StructuralError {
    #[error("CSV file is empty")]
    Empty,

    #[error("CSV file has no data rows")]
    NoDataRows,

    #[error("Missing required columns: {}", join_labels(.0))]
    MissingColumns(Vec<Field>),
}

fn join_labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decision for one data row, made before anything is written.
#[derive(Debug)]
enum Planned {
    Skip(SkippedRow),
    Create { name: String, request: CreateProject },
}

/// Reason recorded for a create that failed, keyed on its HTTP status.
pub fn classify_failure(err: &ApiError) -> String {
    match err.status_code().as_u16() {
        400 => "Invalid data format".to_string(),
        409 => "Project already exists".to_string(),
        422 => "Validation error".to_string(),
        _ => {
            let message = err.to_string();
            if message.trim().is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                message
            }
        }
    }
}

/// Import every row of `text` into `store`.
///
/// Duplicates (against storage and against earlier rows of the same file)
/// and rows missing a required value are settled in one sequential pass, so
/// the first occurrence of a name always wins. The remaining creates are
/// then issued with at most `concurrency` in flight and reported in file
/// order. Nothing past the structural check stops the batch: a failed
/// create, or failing to list stored names, becomes a skipped entry.
pub async fn import_csv<S>(
    store: &S,
    text: &str,
    concurrency: usize,
) -> ImportOutcome
where
    S: ProjectStore + ?Sized,
{
    let rows = parse_rows(text);
    let (header, data) = match check_structure(&rows) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::info!("Rejected CSV import: {e}");
            return ImportOutcome {
                inserted: Vec::new(),
                skipped: vec![SkippedRow::new(FILE_ENTRY, e.to_string())],
            };
        }
    };

    let existing = match store.project_names().await {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!("Could not list existing projects for import: {e}");
            return ImportOutcome {
                inserted: Vec::new(),
                skipped: vec![SkippedRow::new(
                    FILE_ENTRY,
                    format!("Could not load existing projects: {e}"),
                )],
            };
        }
    };
    let plans = plan_rows(&header, data, DuplicateDetector::new(existing));

    let results = stream::iter(plans)
        .map(move |plan| async move {
            match plan {
                Planned::Skip(skipped) => Err(skipped),
                Planned::Create { name, request } => match persist(store, request).await {
                    Ok(()) => Ok(name),
                    Err(e) => {
                        tracing::debug!("Import of '{name}' failed: {e}");
                        Err(SkippedRow::new(name, classify_failure(&e)))
                    }
                },
            }
        })
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut outcome = ImportOutcome::default();
    for result in results {
        match result {
            Ok(name) => outcome.inserted.push(name),
            Err(skipped) => outcome.skipped.push(skipped),
        }
    }

    tracing::info!(
        inserted = outcome.inserted.len(),
        skipped = outcome.skipped.len(),
        "CSV import finished"
    );
    outcome
}

fn check_structure(rows: &[Row]) -> Result<(HeaderMap, &[Row]), StructuralError> {
    let (header_row, data) = rows.split_first().ok_or(StructuralError::Empty)?;
    let header = HeaderMap::new(&header_row.fields);

    let missing = header.missing_required();
    if !missing.is_empty() {
        return Err(StructuralError::MissingColumns(missing));
    }
    if data.is_empty() {
        return Err(StructuralError::NoDataRows);
    }
    Ok((header, data))
}

fn plan_rows(
    header: &HeaderMap,
    rows: &[Row],
    mut detector: DuplicateDetector,
) -> Vec<Planned> {
    rows.iter()
        .map(|Row { line, fields: row }| {
            let name = header.value(row, Field::ProjectName);
            let technology = header.value(row, Field::Technology);

            let Some(name) = name else {
                return Planned::Skip(SkippedRow::new(
                    format!("Line {line}"),
                    format!("Missing required field: {}", Field::ProjectName),
                ));
            };
            if technology.is_none() {
                return Planned::Skip(SkippedRow::new(
                    name,
                    format!("Missing required field: {}", Field::Technology),
                ));
            }
            if !detector.claim(name) {
                return Planned::Skip(SkippedRow::new(name, ALREADY_EXISTS));
            }

            Planned::Create {
                name: name.to_string(),
                request: build_request(header, row),
            }
        })
        .collect()
}

async fn persist<S>(store: &S, request: CreateProject) -> Result<(), ApiError>
where
    S: ProjectStore + ?Sized,
{
    let project = request.validate()?;
    store.create_project(project).await.map(|_| ())
}

/// Create request for one data row.
fn build_request(header: &HeaderMap, row: &[String]) -> CreateProject {
    let text = |field| header.value(row, field).map(str::to_string);

    CreateProject {
        project_name: text(Field::ProjectName).unwrap_or_default(),
        technology: text(Field::Technology).unwrap_or_default(),
        category: text(Field::Category),
        industry: text(Field::Industry),
        description: text(Field::Description),
        page_builder: text(Field::PageBuilder),
        client_name: text(Field::ClientName),
        website_link: text(Field::WebsiteLink),
        bid_platform: text(Field::BidPlatform),
        bid_platform_url: text(Field::BidPlatformUrl),
        invoice_amount: header
            .value(row, Field::InvoiceAmount)
            .and_then(parse_amount),
        start_date: text(Field::StartDate),
        completion_date: text(Field::CompletionDate),
        testimonials: text(Field::Testimonials),
        tag: split_list(header.value(row, Field::Tag), &[',']),
        client_invoices: split_list(header.value(row, Field::ClientInvoices), &[',', '|']),
    }
}

/// Parse an amount such as `1200`, `$1,200.50` or ` 99.9 `; anything else
/// is treated as absent.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

fn split_list(raw: Option<&str>, separators: &[char]) -> Vec<String> {
    raw.map(|value| {
        value
            .split(separators)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> HeaderMap {
        HeaderMap::new(&names.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn row(line: u64, values: &[&str]) -> Row {
        Row {
            line,
            fields: cells(values),
        }
    }

    #[test]
    fn classification_by_status() {
        assert_eq!(
            classify_failure(&ApiError::BadRequest("bad date".into())),
            "Invalid data format"
        );
        assert_eq!(
            classify_failure(&ApiError::Conflict("dupe".into())),
            "Project already exists"
        );
        assert_eq!(
            classify_failure(&ApiError::Unprocessable("negative".into())),
            "Validation error"
        );
        assert_eq!(
            classify_failure(&ApiError::Internal("disk full".into())),
            "disk full"
        );
        assert_eq!(
            classify_failure(&ApiError::Internal("  ".into())),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn structure_checks() {
        assert_eq!(check_structure(&[]).unwrap_err(), StructuralError::Empty);
        assert_eq!(
            check_structure(&[row(1, &["Title", "Tech"])]).unwrap_err(),
            StructuralError::NoDataRows
        );
        let err =
            check_structure(&[row(1, &["Client", "Notes"]), row(2, &["a", "b"])]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required columns: Project Name, Technology"
        );
    }

    #[test]
    fn planning_skips_missing_fields_before_claiming_names() {
        let map = header(&["Title", "Tech"]);
        let rows = vec![
            row(4, &["", "React"]),
            row(5, &["Foo", ""]),
            row(6, &["Foo", "Vue"]),
            row(7, &["FOO ", "Svelte"]),
        ];

        let plans = plan_rows(&map, &rows, DuplicateDetector::default());

        assert!(matches!(&plans[0], Planned::Skip(s) if s.name == "Line 4"
            && s.reason == "Missing required field: Project Name"));
        assert!(matches!(&plans[1], Planned::Skip(s) if s.name == "Foo"
            && s.reason == "Missing required field: Technology"));
        assert!(matches!(&plans[2], Planned::Create { name, .. } if name == "Foo"));
        assert!(matches!(&plans[3], Planned::Skip(s) if s.reason == ALREADY_EXISTS));
    }

    #[test]
    fn request_splits_lists_and_parses_amounts() {
        let map = header(&["Project Name", "Technology", "Tags", "Invoices", "Amount"]);
        let data = cells(&[
            "Shop",
            "Shopify",
            "ecommerce, retail,,",
            "https://a.example/1.pdf | https://a.example/2.png",
            "$1,250.50",
        ]);

        let request = build_request(&map, &data);
        assert_eq!(request.tag, vec!["ecommerce", "retail"]);
        assert_eq!(
            request.client_invoices,
            vec!["https://a.example/1.pdf", "https://a.example/2.png"]
        );
        assert_eq!(request.invoice_amount, Some(1250.5));
    }

    #[test]
    fn unparsable_amount_is_absent() {
        assert_eq!(parse_amount("tbd"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount(" 42 "), Some(42.0));
    }
}
