use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::error::ApiError;
use crate::models::projects;
use crate::transfer::headers::Field;

/// Prefix that makes spreadsheet apps read the file as UTF-8.
pub const UTF8_BOM: &str = "\u{feff}";
/// Values starting with this are inline images, not text.
const IMAGE_MARKER: &str = "data:image";
const IMAGE_PLACEHOLDER: &str = "[IMAGE]";
const ELLIPSIS: &str = "...";
const ERROR_CELL: &str = "ERROR";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invoice amount of '{project}' is not a finite number")]
    InvalidAmount { project: String },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV flush error: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Internal(format!("Failed to export projects: {err}"))
    }
}

/// Longest text kept per column; longer values end in "...".
fn max_len(field: Field) -> usize {
    match field {
        Field::ProjectName | Field::Category | Field::Industry => 50,
        Field::PageBuilder | Field::BidPlatform => 50,
        Field::Technology | Field::ClientName => 100,
        Field::Description | Field::WebsiteLink | Field::BidPlatformUrl | Field::Tag => 200,
        Field::Testimonials => 150,
        Field::InvoiceAmount => 20,
        Field::StartDate | Field::CompletionDate => 10,
        Field::ClientInvoices => 1000,
    }
}

/// Render `projects` as a BOM-prefixed CSV document with one header row.
///
/// A project whose row cannot be built is written as a row of `ERROR`
/// cells so the rest of the export still goes out.
pub fn export_csv(projects: &[projects::Model]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(Field::ALL.iter().map(|f| f.label()))?;

    let mut failed = 0usize;
    for project in projects {
        match project_row(project) {
            Ok(row) => writer.write_record(&row)?,
            Err(e) => {
                tracing::warn!(project_id = %project.id, "Exporting placeholder row: {e}");
                failed += 1;
                writer.write_record(vec![ERROR_CELL; Field::ALL.len()])?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    let body = String::from_utf8(bytes)?;

    tracing::info!(rows = projects.len(), failed, "CSV export built");
    Ok(format!("{UTF8_BOM}{body}"))
}

fn project_row(project: &projects::Model) -> Result<Vec<String>, ExportError> {
    Field::ALL
        .iter()
        .map(|field| cell(project, *field))
        .collect()
}

fn cell(p: &projects::Model, field: Field) -> Result<String, ExportError> {
    let text = |value: &Option<String>| sanitize(value.as_deref().unwrap_or(""), max_len(field));

    Ok(match field {
        Field::ProjectName => sanitize(&p.project_name, max_len(field)),
        Field::Technology => sanitize(&p.technology, max_len(field)),
        Field::Category => text(&p.category),
        Field::Industry => text(&p.industry),
        Field::Description => text(&p.description),
        Field::PageBuilder => text(&p.page_builder),
        Field::ClientName => text(&p.client_name),
        Field::WebsiteLink => text(&p.website_link),
        Field::BidPlatform => text(&p.bid_platform),
        Field::BidPlatformUrl => text(&p.bid_platform_url),
        Field::InvoiceAmount => format_amount(p)?,
        Field::StartDate => format_date(p.start_date),
        Field::CompletionDate => format_date(p.completion_date),
        Field::Testimonials => text(&p.testimonials),
        Field::Tag => sanitize(&p.tag.0.join(", "), max_len(field)),
        Field::ClientInvoices => {
            let invoices = p
                .client_invoices
                .0
                .iter()
                .map(|url| sanitize(url, usize::MAX))
                .collect::<Vec<_>>()
                .join(" | ");
            truncate(&invoices, max_len(field))
        }
    })
}

/// Collapse whitespace runs, replace inline images, cap the length.
pub fn sanitize(value: &str, max_len: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if is_embedded_image(&collapsed) {
        return IMAGE_PLACEHOLDER.to_string();
    }
    truncate(&collapsed, max_len)
}

fn is_embedded_image(value: &str) -> bool {
    value
        .get(..IMAGE_MARKER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MARKER))
}

fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let head: String = value.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", head.trim_end())
}

/// Day/month/year, or empty when unset.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn format_amount(p: &projects::Model) -> Result<String, ExportError> {
    match p.invoice_amount {
        None => Ok(String::new()),
        Some(amount) if !amount.is_finite() => Err(ExportError::InvalidAmount {
            project: p.project_name.clone(),
        }),
        Some(amount) if amount.fract() == 0.0 => Ok(format!("{amount:.0}")),
        Some(amount) => Ok(format!("{amount:.2}")),
    }
}
