use serde::{Deserialize, Serialize};

use crate::domain::{Expense, ExpenseDraft, SortPreset};

pub const CREATED_AT_ATTRIBUTE: &str = "$createdAt";
pub const AMOUNT_ATTRIBUTE: &str = "amount";
pub const CATEGORY_ATTRIBUTE: &str = "category";

/// Document id that asks the store to generate one.
pub const UNIQUE_DOCUMENT_ID: &str = "unique()";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub attribute: &'static str,
    pub direction: SortDirection,
}

impl SortClause {
    pub fn for_preset(preset: SortPreset) -> Self {
        let (attribute, direction) = match preset {
            SortPreset::MostRecent => (CREATED_AT_ATTRIBUTE, SortDirection::Descending),
            SortPreset::Oldest => (CREATED_AT_ATTRIBUTE, SortDirection::Ascending),
            SortPreset::HighestPrice => (AMOUNT_ATTRIBUTE, SortDirection::Descending),
            SortPreset::LowestPrice => (AMOUNT_ATTRIBUTE, SortDirection::Ascending),
        };
        Self {
            attribute,
            direction,
        }
    }
}

/// One clause of a list query, in the store's JSON query syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum QueryClause {
    OrderAsc { attribute: String },
    OrderDesc { attribute: String },
    Equal { attribute: String, values: Vec<String> },
}

impl QueryClause {
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&SortClause> for QueryClause {
    fn from(clause: &SortClause) -> Self {
        let attribute = clause.attribute.to_string();
        match clause.direction {
            SortDirection::Ascending => QueryClause::OrderAsc { attribute },
            SortDirection::Descending => QueryClause::OrderDesc { attribute },
        }
    }
}

/// Sort clause plus an optional category equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub sort: SortClause,
    pub category: Option<String>,
}

impl QueryDescriptor {
    /// An empty `category_filter` means no equality clause.
    pub fn new(preset: SortPreset, category_filter: &str) -> Self {
        Self {
            sort: SortClause::for_preset(preset),
            category: (!category_filter.is_empty()).then(|| category_filter.to_string()),
        }
    }

    pub fn clauses(&self) -> Vec<QueryClause> {
        let mut clauses = vec![QueryClause::from(&self.sort)];
        if let Some(category) = &self.category {
            clauses.push(QueryClause::Equal {
                attribute: CATEGORY_ATTRIBUTE.to_string(),
                values: vec![category.clone()],
            });
        }
        clauses
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest<'a> {
    pub document_id: &'a str,
    pub data: &'a ExpenseDraft,
}

impl<'a> CreateDocumentRequest<'a> {
    pub fn unique(data: &'a ExpenseDraft) -> Self {
        Self {
            document_id: UNIQUE_DOCUMENT_ID,
            data,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_maps_to_its_declared_field_and_direction() {
        let expected = [
            (SortPreset::MostRecent, "$createdAt", SortDirection::Descending),
            (SortPreset::Oldest, "$createdAt", SortDirection::Ascending),
            (SortPreset::HighestPrice, "amount", SortDirection::Descending),
            (SortPreset::LowestPrice, "amount", SortDirection::Ascending),
        ];
        for (preset, attribute, direction) in expected {
            let clause = SortClause::for_preset(preset);
            assert_eq!(clause.attribute, attribute, "{preset}");
            assert_eq!(clause.direction, direction, "{preset}");
        }
    }

    #[test]
    fn empty_filter_produces_only_the_sort_clause() {
        let descriptor = QueryDescriptor::new(SortPreset::MostRecent, "");
        assert_eq!(descriptor.category, None);
        assert_eq!(
            descriptor.clauses(),
            vec![QueryClause::OrderDesc {
                attribute: "$createdAt".to_string()
            }]
        );
    }

    #[test]
    fn lowest_price_with_travel_filter_sorts_then_filters() {
        let descriptor = QueryDescriptor::new(SortPreset::LowestPrice, "Travel");
        assert_eq!(
            descriptor.clauses(),
            vec![
                QueryClause::OrderAsc {
                    attribute: "amount".to_string()
                },
                QueryClause::Equal {
                    attribute: "category".to_string(),
                    values: vec!["Travel".to_string()],
                },
            ]
        );
    }

    #[test]
    fn clauses_encode_as_store_query_json() {
        let descriptor = QueryDescriptor::new(SortPreset::Oldest, "Food");
        let encoded: Vec<String> = descriptor
            .clauses()
            .iter()
            .map(|clause| clause.encode().expect("encode"))
            .collect();
        assert_eq!(
            encoded,
            vec![
                r#"{"method":"orderAsc","attribute":"$createdAt"}"#.to_string(),
                r#"{"method":"equal","attribute":"category","values":["Food"]}"#.to_string(),
            ]
        );
    }

    #[test]
    fn create_request_asks_the_store_for_a_unique_id() {
        let draft = ExpenseDraft::new("Movies", "500", "Entertainment");
        let body = serde_json::to_value(CreateDocumentRequest::unique(&draft)).expect("json");
        assert_eq!(
            body,
            serde_json::json!({
                "documentId": "unique()",
                "data": {
                    "description": "Movies",
                    "amount": "500",
                    "category": "Entertainment"
                }
            })
        );
    }
}
