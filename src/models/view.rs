use serde::Serialize;

use crate::models::entry::{CartEntry, EntryId, Priority};
use crate::utils::currency::format_amount;

/// Display-ready snapshot of one cart line.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EntryView {
    pub id: EntryId,
    pub name: String,
    pub priority: Priority,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartEntry> for EntryView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            priority: entry.priority,
            quantity: entry.quantity,
            unit_price: format_amount(entry.unit_value),
            line_total: format_amount(entry.line_total()),
        }
    }
}

/// Display-ready snapshot of the whole cart, in insertion order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CartView {
    pub entries: Vec<EntryView>,
    pub total: String,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
