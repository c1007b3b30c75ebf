//! Availability Calculator
//!
//! Remaining capacity per table size: configured quantity minus active
//! (pending/accepted) reservation count, floored at zero.
//!
//! Duplicate configuration rows for the same size are summed before the
//! subtraction, so two "Table for 2" rows of quantity 3 and 2 expose a
//! combined capacity of 5.

use std::collections::{BTreeMap, HashMap};

use crate::db::models::{TableAvailability, TableType};

/// Compute remaining availability per distinct table size.
///
/// `active_counts` maps a table size label to the number of reservations
/// currently occupying it; labels without configured rows are ignored.
pub fn compute_availability(
    table_types: &[TableType],
    active_counts: &HashMap<String, i64>,
) -> Vec<TableAvailability> {
    // Sum configured capacity per size (duplicate rows are additive)
    let mut configured: BTreeMap<&str, i64> = BTreeMap::new();
    for table_type in table_types {
        *configured.entry(table_type.size.as_str()).or_insert(0) += table_type.quantity;
    }

    configured
        .into_iter()
        .map(|(size, total)| {
            let taken = active_counts.get(size).copied().unwrap_or(0);
            TableAvailability {
                size: size.to_string(),
                quantity: (total - taken).max(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_type(size: &str, quantity: i64) -> TableType {
        TableType {
            id: None,
            size: size.to_string(),
            quantity,
        }
    }

    fn counts(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(size, n)| (size.to_string(), *n))
            .collect()
    }

    #[test]
    fn subtracts_active_reservations() {
        let types = vec![table_type("Table for 2", 5), table_type("Table for 4", 3)];
        let result = compute_availability(&types, &counts(&[("Table for 2", 2)]));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].size, "Table for 2");
        assert_eq!(result[0].quantity, 3);
        assert_eq!(result[1].quantity, 3);
    }

    #[test]
    fn never_goes_negative() {
        let types = vec![table_type("Table for 2", 1)];
        let result = compute_availability(&types, &counts(&[("Table for 2", 4)]));
        assert_eq!(result[0].quantity, 0);
    }

    #[test]
    fn duplicate_sizes_sum_before_subtraction() {
        let types = vec![
            table_type("Table for 6", 3),
            table_type("Table for 6", 2),
        ];
        let result = compute_availability(&types, &counts(&[("Table for 6", 4)]));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, 1);
    }

    #[test]
    fn counts_for_unconfigured_sizes_are_ignored() {
        let types = vec![table_type("Table for 2", 2)];
        let result = compute_availability(&types, &counts(&[("Patio Table", 9)]));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, 2);
    }

    #[test]
    fn empty_configuration_yields_nothing() {
        let result = compute_availability(&[], &counts(&[("Table for 2", 1)]));
        assert!(result.is_empty());
    }
}
