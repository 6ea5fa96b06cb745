use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::{
    models::{AddEntryRequest, CartEntry, CartView, EntryId, EntryView, ValidationError},
    utils::currency::{format_amount, max_input_amount, parse_currency_display},
};

/// Owns the cart entries and the running total.
///
/// The total is kept incrementally by each operation and always equals the
/// sum of every entry's `unit_value * quantity`.
#[derive(Debug, Default)]
pub struct CartLedger {
    entries: Vec<CartEntry>,
    total: Decimal,
    next_id: u64,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new entry with quantity 1.
    ///
    /// Either exactly one entry is added and the total grows by its unit
    /// value, or an error is returned and nothing changes.
    pub fn add_entry(&mut self, request: AddEntryRequest) -> Result<CartEntry, ValidationError> {
        debug!("Adding entry with name: '{}'", request.name);

        if request.validate().is_err() {
            let fields = request.missing_fields();
            warn!("Rejected entry, missing fields: {:?}", fields);
            return Err(ValidationError::MissingField { fields });
        }

        let unit_value = match parse_currency_display(&request.display_value) {
            Some(value) if value > Decimal::ZERO && value <= max_input_amount() => value,
            _ => {
                warn!("Rejected entry, invalid value: '{}'", request.display_value);
                return Err(ValidationError::InvalidValue {
                    input: request.display_value,
                });
            }
        };

        let priority = request
            .priority
            .ok_or_else(|| ValidationError::MissingField {
                fields: vec!["priority"],
            })?;

        let Some(total) = self.total.checked_add(unit_value) else {
            warn!("Rejected entry, total would overflow: '{}'", request.display_value);
            return Err(ValidationError::InvalidValue {
                input: request.display_value,
            });
        };

        self.next_id += 1;
        let entry = CartEntry::new(EntryId::new(self.next_id), request.name, unit_value, priority);

        self.total = total;
        self.entries.push(entry.clone());

        info!(
            "Added entry {} '{}' at {}, total now {}",
            entry.id,
            entry.name,
            format_amount(entry.unit_value),
            format_amount(self.total)
        );
        Ok(entry)
    }

    /// Shift an entry's quantity by `delta`, never going below 1.
    ///
    /// Returns the resulting quantity, or `None` when the id is unknown.
    pub fn update_quantity(&mut self, id: EntryId, delta: i64) -> Option<u32> {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            warn!("Quantity update ignored, entry not found: {}", id);
            return None;
        };

        let old_quantity = entry.quantity;
        let new_quantity = i64::from(old_quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX)) as u32;

        if new_quantity != old_quantity {
            let change = i64::from(new_quantity) - i64::from(old_quantity);
            let Some(total) = Decimal::from(change)
                .checked_mul(entry.unit_value)
                .and_then(|difference| self.total.checked_add(difference))
            else {
                warn!("Entry {} quantity kept at {}, total would overflow", id, old_quantity);
                return Some(old_quantity);
            };
            self.total = total;
            entry.quantity = new_quantity;

            info!(
                "Entry {} quantity {} -> {}, total now {}",
                id,
                old_quantity,
                new_quantity,
                format_amount(self.total)
            );
        } else {
            debug!("Entry {} quantity unchanged at {}", id, old_quantity);
        }

        Some(new_quantity)
    }

    /// Remove an entry and retract its line total.
    ///
    /// Returns the removed entry, or `None` when the id is unknown.
    pub fn delete_entry(&mut self, id: EntryId) -> Option<CartEntry> {
        let Some(position) = self.entries.iter().position(|entry| entry.id == id) else {
            warn!("Delete ignored, entry not found: {}", id);
            return None;
        };

        let removed = self.entries.remove(position);
        self.total -= removed.line_total();

        info!(
            "Deleted entry {} '{}', total now {}",
            removed.id,
            removed.name,
            format_amount(self.total)
        );
        Some(removed)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The incrementally maintained running total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Display-ready snapshot in insertion order.
    pub fn view(&self) -> CartView {
        CartView {
            entries: self.entries.iter().map(EntryView::from).collect(),
            total: format_amount(self.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn recomputed_total(ledger: &CartLedger) -> Decimal {
        ledger.entries().iter().map(CartEntry::line_total).sum()
    }

    fn add(ledger: &mut CartLedger, name: &str, value: &str, priority: Priority) -> CartEntry {
        ledger
            .add_entry(AddEntryRequest::new(name, value, Some(priority)))
            .unwrap()
    }

    #[test]
    fn test_add_entry_success() {
        let mut ledger = CartLedger::new();
        let entry = add(&mut ledger, "Milk", "R$ 5,00", Priority::Low);

        assert_eq!(entry.name, "Milk");
        assert_eq!(entry.unit_value, Decimal::new(5, 0));
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.priority, Priority::Low);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), Decimal::new(500, 2));
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut ledger = CartLedger::new();
        let first = add(&mut ledger, "Bread", "R$ 7,50", Priority::Medium);
        let second = add(&mut ledger, "Bread", "R$ 7,50", Priority::Medium);
        ledger.delete_entry(second.id);
        let third = add(&mut ledger, "Eggs", "R$ 12,00", Priority::High);

        assert_ne!(first.id, second.id);
        assert!(third.id > second.id);
    }

    #[test]
    fn test_missing_field_checked_before_value() {
        let mut ledger = CartLedger::new();
        let result = ledger.add_entry(AddEntryRequest::new("", "not a price", None));

        assert_eq!(
            result,
            Err(ValidationError::MissingField {
                fields: vec!["name", "priority"]
            })
        );
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut ledger = CartLedger::new();
        for value in ["R$ 0,00", "abc", "1,2,3"] {
            let result = ledger.add_entry(AddEntryRequest::new("Salt", value, Some(Priority::High)));
            assert!(matches!(result, Err(ValidationError::InvalidValue { .. })));
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_clamps_at_one() {
        let mut ledger = CartLedger::new();
        let entry = add(&mut ledger, "Coffee", "R$ 18,90", Priority::High);

        assert_eq!(ledger.update_quantity(entry.id, 4), Some(5));
        assert_eq!(ledger.total(), Decimal::new(9450, 2));

        assert_eq!(ledger.update_quantity(entry.id, i64::MIN), Some(1));
        assert_eq!(ledger.total(), Decimal::new(1890, 2));

        assert_eq!(ledger.update_quantity(entry.id, -1), Some(1));
        assert_eq!(ledger.total(), Decimal::new(1890, 2));
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let mut ledger = CartLedger::new();
        let result = ledger.add_entry(AddEntryRequest::new(
            "Gold",
            "50000000000000000000000000000",
            Some(Priority::High),
        ));
        assert!(matches!(result, Err(ValidationError::InvalidValue { .. })));

        let result = ledger.add_entry(AddEntryRequest::new("Gold", "R$ 10.000.000.000.000,00", Some(Priority::High)));
        assert!(matches!(result, Err(ValidationError::InvalidValue { .. })));
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Decimal::ZERO);
    }

    #[test]
    fn test_largest_value_survives_max_quantity() {
        let mut ledger = CartLedger::new();
        let display = crate::utils::currency::format_currency_input(&"9".repeat(15));
        let entry = add(&mut ledger, "Gold", &display, Priority::High);
        assert_eq!(entry.unit_value, max_input_amount());

        assert_eq!(ledger.update_quantity(entry.id, i64::MAX), Some(u32::MAX));
        assert_eq!(ledger.update_quantity(entry.id, -1), Some(u32::MAX - 1));
        assert_eq!(ledger.total(), recomputed_total(&ledger));

        ledger.delete_entry(entry.id);
        assert_eq!(ledger.total(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_saturates_at_max() {
        let mut ledger = CartLedger::new();
        let entry = add(&mut ledger, "Gum", "R$ 0,01", Priority::Low);

        assert_eq!(ledger.update_quantity(entry.id, i64::MAX), Some(u32::MAX));
        assert_eq!(ledger.total(), recomputed_total(&ledger));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut ledger = CartLedger::new();
        add(&mut ledger, "Tea", "R$ 9,99", Priority::Medium);
        let before = ledger.view();

        assert_eq!(ledger.update_quantity(EntryId::new(42), 1), None);
        assert_eq!(ledger.delete_entry(EntryId::new(42)), None);
        assert_eq!(ledger.view(), before);
    }

    #[test]
    fn test_delete_uses_current_quantity_and_keeps_order() {
        let mut ledger = CartLedger::new();
        let a = add(&mut ledger, "Apples", "R$ 3,00", Priority::Low);
        let b = add(&mut ledger, "Beans", "R$ 8,40", Priority::Medium);
        let c = add(&mut ledger, "Cheese", "R$ 25,00", Priority::High);
        ledger.update_quantity(b.id, 2);

        let removed = ledger.delete_entry(b.id).unwrap();
        assert_eq!(removed.quantity, 3);
        assert_eq!(ledger.total(), Decimal::new(2800, 2));

        let ids: Vec<EntryId> = ledger.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert!(ledger.get(b.id).is_none());
    }

    #[test]
    fn test_view_formats_amounts() {
        let mut ledger = CartLedger::new();
        let entry = add(&mut ledger, "Olive oil", "R$ 1.234,50", Priority::High);
        ledger.update_quantity(entry.id, 1);

        let view = ledger.view();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].unit_price, "R$ 1.234,50");
        assert_eq!(view.entries[0].line_total, "R$ 2.469,00");
        assert_eq!(view.entries[0].quantity, 2);
        assert_eq!(view.total, "R$ 2.469,00");
    }
}
