use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown priority '{0}', expected high, medium or low")]
pub struct ParsePriorityError(pub String);

/// Accepts level names, the Portuguese button labels and the old color tags.
impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "alta" | "red" => Ok(Priority::High),
            "medium" | "média" | "media" | "yellow" => Ok(Priority::Medium),
            "low" | "baixa" | "green" => Ok(Priority::Low),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartEntry {
    pub id: EntryId,
    pub name: String,
    pub unit_value: Decimal,
    pub priority: Priority,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    pub(crate) fn new(id: EntryId, name: String, unit_value: Decimal, priority: Priority) -> Self {
        Self {
            id,
            name,
            unit_value,
            priority,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_value * Decimal::from(self.quantity)
    }
}

// request dto
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct AddEntryRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Product value is required"))]
    pub display_value: String,

    #[validate(required(message = "Priority is required"))]
    pub priority: Option<Priority>,
}

impl AddEntryRequest {
    pub fn new(
        name: impl Into<String>,
        display_value: impl Into<String>,
        priority: Option<Priority>,
    ) -> Self {
        Self {
            name: name.into(),
            display_value: display_value.into(),
            priority,
        }
    }

    /// Names of the required fields that were left empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => {
                let failed = errors.field_errors();
                ["name", "display_value", "priority"]
                    .into_iter()
                    .filter(|field| failed.contains_key(field))
                    .collect()
            }
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required, including the priority (missing: {})", .fields.join(", "))]
    MissingField { fields: Vec<&'static str> },

    #[error("Enter a valid value for the product: '{input}'")]
    InvalidValue { input: String },
}
