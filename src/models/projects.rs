use chrono::NaiveDate;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A list of strings stored as a JSONB array.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

/// SeaORM entity for the `projects` table: one client project in the portfolio.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_name: String,
    pub technology: String,
    pub category: Option<String>,
    pub industry: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub page_builder: Option<String>,
    pub client_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub website_link: Option<String>,
    pub bid_platform: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bid_platform_url: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub invoice_amount: Option<f64>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub testimonials: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tag: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub client_invoices: StringList,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/projects`, also built row by row by the CSV import.
///
/// Dates arrive as strings so that a malformed one is reported as a 400
/// rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    pub project_name: String,
    pub technology: String,
    pub category: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub page_builder: Option<String>,
    pub client_name: Option<String>,
    pub website_link: Option<String>,
    pub bid_platform: Option<String>,
    pub bid_platform_url: Option<String>,
    pub invoice_amount: Option<f64>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    pub testimonials: Option<String>,
    #[serde(default)]
    pub tag: Vec<String>,
    #[serde(default)]
    pub client_invoices: Vec<String>,
}

/// Body of `PUT /api/projects/{id}`; absent fields are left untouched,
/// empty strings clear optional ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub project_name: Option<String>,
    pub technology: Option<String>,
    pub category: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub page_builder: Option<String>,
    pub client_name: Option<String>,
    pub website_link: Option<String>,
    pub bid_platform: Option<String>,
    pub bid_platform_url: Option<String>,
    pub invoice_amount: Option<f64>,
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    pub testimonials: Option<String>,
    pub tag: Option<Vec<String>>,
    pub client_invoices: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkDelete {
    pub ids: Vec<Uuid>,
}

/// A create request that passed validation: trimmed, dates parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub project_name: String,
    pub technology: String,
    pub category: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub page_builder: Option<String>,
    pub client_name: Option<String>,
    pub website_link: Option<String>,
    pub bid_platform: Option<String>,
    pub bid_platform_url: Option<String>,
    pub invoice_amount: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub testimonials: Option<String>,
    pub tag: Vec<String>,
    pub client_invoices: Vec<String>,
}

impl CreateProject {
    pub fn validate(self) -> Result<NewProject, ApiError> {
        let project_name = self.project_name.trim().to_string();
        if project_name.is_empty() {
            return Err(ApiError::Unprocessable("Project name is required".into()));
        }
        let technology = self.technology.trim().to_string();
        if technology.is_empty() {
            return Err(ApiError::Unprocessable("Technology is required".into()));
        }

        if let Some(amount) = self.invoice_amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ApiError::Unprocessable(
                    "Invoice amount must be a non-negative number".into(),
                ));
            }
        }

        let start_date = optional_date("start date", self.start_date.as_deref())?;
        let completion_date = optional_date("completion date", self.completion_date.as_deref())?;
        if let (Some(start), Some(end)) = (start_date, completion_date) {
            if end < start {
                return Err(ApiError::Unprocessable(
                    "Completion date cannot be before start date".into(),
                ));
            }
        }

        Ok(NewProject {
            project_name,
            technology,
            category: non_blank(self.category),
            industry: non_blank(self.industry),
            description: non_blank(self.description),
            page_builder: non_blank(self.page_builder),
            client_name: non_blank(self.client_name),
            website_link: non_blank(self.website_link),
            bid_platform: non_blank(self.bid_platform),
            bid_platform_url: non_blank(self.bid_platform_url),
            invoice_amount: self.invoice_amount,
            start_date,
            completion_date,
            testimonials: non_blank(self.testimonials),
            tag: clean_list(self.tag),
            client_invoices: clean_list(self.client_invoices),
        })
    }

    /// Overlay an update on top of this request. Used to re-validate the
    /// merged record before an edit is written.
    pub fn apply(mut self, update: UpdateProject) -> Self {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if let Some(v) = update.$field { self.$field = Some(v); })*
            };
        }
        if let Some(name) = update.project_name {
            self.project_name = name;
        }
        if let Some(tech) = update.technology {
            self.technology = tech;
        }
        overlay!(
            category,
            industry,
            description,
            page_builder,
            client_name,
            website_link,
            bid_platform,
            bid_platform_url,
            invoice_amount,
            start_date,
            completion_date,
            testimonials
        );
        if let Some(tag) = update.tag {
            self.tag = tag;
        }
        if let Some(invoices) = update.client_invoices {
            self.client_invoices = invoices;
        }
        self
    }
}

impl From<Model> for CreateProject {
    fn from(m: Model) -> Self {
        Self {
            project_name: m.project_name,
            technology: m.technology,
            category: m.category,
            industry: m.industry,
            description: m.description,
            page_builder: m.page_builder,
            client_name: m.client_name,
            website_link: m.website_link,
            bid_platform: m.bid_platform,
            bid_platform_url: m.bid_platform_url,
            invoice_amount: m.invoice_amount,
            start_date: m.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            completion_date: m.completion_date.map(|d| d.format("%Y-%m-%d").to_string()),
            testimonials: m.testimonials,
            tag: m.tag.0,
            client_invoices: m.client_invoices.0,
        }
    }
}

/// Accepts ISO dates, day-first slashed dates and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn optional_date(label: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid {label}: {value}"))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
