use std::fmt;

/// Canonical project fields, in export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProjectName,
    Technology,
    Category,
    Industry,
    Description,
    PageBuilder,
    ClientName,
    WebsiteLink,
    BidPlatform,
    BidPlatformUrl,
    InvoiceAmount,
    StartDate,
    CompletionDate,
    Testimonials,
    Tag,
    ClientInvoices,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::ProjectName,
        Field::Technology,
        Field::Category,
        Field::Industry,
        Field::Description,
        Field::PageBuilder,
        Field::ClientName,
        Field::WebsiteLink,
        Field::BidPlatform,
        Field::BidPlatformUrl,
        Field::InvoiceAmount,
        Field::StartDate,
        Field::CompletionDate,
        Field::Testimonials,
        Field::Tag,
        Field::ClientInvoices,
    ];

    /// Columns an import cannot do without.
    pub const REQUIRED: [Field; 2] = [Field::ProjectName, Field::Technology];

    /// Header text used on export.
    pub fn label(self) -> &'static str {
        match self {
            Field::ProjectName => "Project Name",
            Field::Technology => "Technology",
            Field::Category => "Category",
            Field::Industry => "Industry",
            Field::Description => "Description",
            Field::PageBuilder => "Page Builder",
            Field::ClientName => "Client Name",
            Field::WebsiteLink => "Website Link",
            Field::BidPlatform => "Bid Platform",
            Field::BidPlatformUrl => "Bid Platform URL",
            Field::InvoiceAmount => "Invoice Amount",
            Field::StartDate => "Start Date",
            Field::CompletionDate => "Completion Date",
            Field::Testimonials => "Testimonials",
            Field::Tag => "Tag",
            Field::ClientInvoices => "Client Invoices",
        }
    }

    /// Other header spellings accepted on import (lowercase).
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::ProjectName => &[
                "projectname",
                "project_name",
                "project",
                "project title",
                "name",
                "title",
            ],
            Field::Technology => &["tech", "technologies", "tech stack", "stack", "framework"],
            Field::Category => &["categories", "type", "project type"],
            Field::Industry => &["industries", "sector", "niche"],
            Field::Description => &["desc", "details", "summary", "about"],
            Field::PageBuilder => &["pagebuilder", "page_builder", "builder", "cms"],
            Field::ClientName => &["client", "clientname", "client_name", "customer"],
            Field::WebsiteLink => &["website", "website url", "site", "url", "link", "live link"],
            Field::BidPlatform => &["platform", "bidplatform", "bid_platform", "source"],
            Field::BidPlatformUrl => &[
                "bid platform link",
                "bidplatformurl",
                "bid_platform_url",
                "platform url",
                "bid url",
            ],
            Field::InvoiceAmount => &[
                "invoiceamount",
                "invoice_amount",
                "invoice",
                "amount",
                "price",
                "budget",
            ],
            Field::StartDate => &["startdate", "start_date", "start", "started"],
            Field::CompletionDate => &[
                "completiondate",
                "completion_date",
                "end date",
                "end",
                "completed",
                "finished",
            ],
            Field::Testimonials => &["testimonial", "review", "reviews", "feedback"],
            Field::Tag => &["tags", "keywords", "labels"],
            Field::ClientInvoices => &[
                "clientinvoices",
                "client_invoices",
                "invoices",
                "invoice links",
                "invoice files",
            ],
        }
    }

    /// Resolve a header cell: trimmed, case-insensitive exact match against
    /// the label and the aliases.
    pub fn from_header(header: &str) -> Option<Field> {
        let wanted = header.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        Field::ALL.into_iter().find(|field| {
            field.label().to_lowercase() == wanted || field.aliases().contains(&wanted.as_str())
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column index → canonical field, built from an import's header row.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: Vec<(String, Option<Field>)>,
}

impl HeaderMap {
    pub fn new(headers: &[String]) -> Self {
        let columns = headers
            .iter()
            .map(|h| (h.clone(), Field::from_header(h)))
            .collect::<Vec<_>>();

        for (header, _) in columns.iter().filter(|(_, field)| field.is_none()) {
            tracing::debug!("Ignoring unrecognised CSV column '{header}'");
        }

        Self { columns }
    }

    /// Original header text paired with the field it maps to.
    pub fn mapping(&self) -> impl Iterator<Item = (&str, Field)> {
        self.columns
            .iter()
            .filter_map(|(header, field)| field.map(|f| (header.as_str(), f)))
    }

    pub fn contains(&self, field: Field) -> bool {
        self.mapping().any(|(_, f)| f == field)
    }

    /// Required fields with no column, in canonical order.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// Value of `field` in `row`: the first non-empty cell among the columns
    /// mapped to it.
    pub fn value<'a>(&self, row: &'a [String], field: Field) -> Option<&'a str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, (_, f))| *f == Some(field))
            .filter_map(|(idx, _)| row.get(idx))
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> HeaderMap {
        HeaderMap::new(&names.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn labels_and_aliases_match_case_insensitively() {
        assert_eq!(Field::from_header("  PROJECT NAME "), Some(Field::ProjectName));
        assert_eq!(Field::from_header("Title"), Some(Field::ProjectName));
        assert_eq!(Field::from_header("tech"), Some(Field::Technology));
        assert_eq!(Field::from_header("Bid Platform URL"), Some(Field::BidPlatformUrl));
        assert_eq!(Field::from_header("Invoice"), Some(Field::InvoiceAmount));
        assert_eq!(Field::from_header("Invoices"), Some(Field::ClientInvoices));
        assert_eq!(Field::from_header("Project Name Extra"), None);
        assert_eq!(Field::from_header(""), None);
    }

    #[test]
    fn no_alias_is_shared_between_fields() {
        let mut seen = std::collections::HashSet::new();
        for field in Field::ALL {
            assert!(seen.insert(field.label().to_lowercase()));
            for alias in field.aliases() {
                assert_eq!(*alias, alias.to_lowercase());
                assert!(seen.insert(alias.to_string()), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn missing_required_lists_both_columns() {
        let map = headers(&["Client", "Notes"]);
        assert_eq!(
            map.missing_required(),
            vec![Field::ProjectName, Field::Technology]
        );

        let map = headers(&["Title", "Tech"]);
        assert!(map.missing_required().is_empty());
    }

    #[test]
    fn value_takes_first_non_empty_mapped_cell() {
        let map = headers(&["Name", "Title", "Tech"]);
        let row = vec!["".to_string(), " Foo ".to_string(), "React".to_string()];

        assert_eq!(map.value(&row, Field::ProjectName), Some("Foo"));
        assert_eq!(map.value(&row, Field::Technology), Some("React"));
        assert_eq!(map.value(&row, Field::Category), None);
    }

    #[test]
    fn short_rows_yield_none() {
        let map = headers(&["Title", "Tech"]);
        let row = vec!["Foo".to_string()];
        assert_eq!(map.value(&row, Field::Technology), None);
    }

    #[test]
    fn mapping_keeps_original_header_text() {
        let map = headers(&["Title", "Whatever", "Tech Stack"]);
        let pairs: Vec<_> = map.mapping().collect();
        assert_eq!(
            pairs,
            vec![("Title", Field::ProjectName), ("Tech Stack", Field::Technology)]
        );
    }
}
