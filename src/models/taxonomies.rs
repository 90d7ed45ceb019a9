use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The four lookup lists the dashboard offers when editing a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    #[sea_orm(string_value = "category")]
    Category,
    #[sea_orm(string_value = "technology")]
    Technology,
    #[sea_orm(string_value = "tag")]
    Tag,
    #[sea_orm(string_value = "industry")]
    Industry,
}

impl TaxonomyKind {
    /// Parse the plural URL segment used by `/api/taxonomies/{kind}`.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "categories" => Some(Self::Category),
            "technologies" => Some(Self::Technology),
            "tags" => Some(Self::Tag),
            "industries" => Some(Self::Industry),
            _ => None,
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Technology => "technologies",
            Self::Tag => "tags",
            Self::Industry => "industries",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Technology => "Technology",
            Self::Tag => "Tag",
            Self::Industry => "Industry",
        }
    }
}

/// SeaORM entity for the `taxonomies` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "taxonomies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: TaxonomyKind,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of both create and rename requests.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyInput {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn segments_round_trip() {
        for kind in TaxonomyKind::iter() {
            assert_eq!(TaxonomyKind::from_segment(kind.segment()), Some(kind));
        }
        assert_eq!(TaxonomyKind::from_segment("category"), None);
    }
}
