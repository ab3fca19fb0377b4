use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ExpenseId);

/// A recorded expense as returned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "$id")]
    pub id: ExpenseId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "amount_as_text")]
    pub amount: String,
    /// Empty means uncategorized.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
}

/// The pending form fields, sent to the store exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.amount.is_empty() && self.category.is_empty()
    }

    pub fn clear(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.category.clear();
    }
}

/// Named sort configurations selectable from the preset buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPreset {
    #[default]
    MostRecent,
    Oldest,
    HighestPrice,
    LowestPrice,
}

impl SortPreset {
    pub const ALL: [SortPreset; 4] = [
        SortPreset::MostRecent,
        SortPreset::Oldest,
        SortPreset::HighestPrice,
        SortPreset::LowestPrice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortPreset::MostRecent => "Most Recent",
            SortPreset::Oldest => "Oldest",
            SortPreset::HighestPrice => "Highest Price",
            SortPreset::LowestPrice => "Lowest Price",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.label() == label)
    }
}

impl fmt::Display for SortPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Collects the distinct categories seen across `expenses`.
///
/// The result does not depend on input order; it is returned sorted so that
/// selectors render it stably. The empty (uncategorized) value is kept.
pub fn distinct_categories<'a, I>(expenses: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .map(|expense| expense.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn amount_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!(
            "expected amount as number or string, got {other}"
        ))),
    }
}
