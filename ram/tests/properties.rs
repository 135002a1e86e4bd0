//! Property tests for memory invariants

use proptest::prelude::*;
use ram::{Ram, Value};
use std::collections::HashMap;

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        (-1.0e9..1.0e9f64).prop_map(Value::Real),
        "[a-z]{0,8}".prop_map(Value::Str),
        any::<i64>().prop_map(Value::Ptr),
        (0..2i64).prop_map(Value::Boolean),
        Just(Value::None),
    ]
}

fn writes_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(("[a-f]{0,3}", value_strategy()), 0..64)
}

proptest! {
    #[test]
    fn size_counts_distinct_names(writes in writes_strategy()) {
        let mut memory = Ram::new();
        let mut latest = HashMap::new();
        for (name, value) in &writes {
            prop_assert!(memory.write_cell_by_name(value, name));
            latest.insert(name.clone(), value.clone());
        }
        prop_assert_eq!(memory.size(), latest.len());
        prop_assert!(memory.capacity() >= memory.size());
        for (name, value) in &latest {
            let stored = memory.read_cell_by_name(name);
            prop_assert_eq!(stored.as_ref(), Some(value));
        }
    }

    #[test]
    fn map_is_sorted_after_every_write(writes in writes_strategy()) {
        let mut memory = Ram::new();
        for (name, value) in &writes {
            memory.write_cell_by_name(value, name);
            let names: Vec<_> = memory.map().names().collect();
            prop_assert!(names.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn addresses_never_change(writes in writes_strategy()) {
        let mut memory = Ram::new();
        let mut addresses: HashMap<String, usize> = HashMap::new();
        for (name, value) in &writes {
            memory.write_cell_by_name(value, name);
            let address = memory.get_addr(name).unwrap();
            let first = *addresses.entry(name.clone()).or_insert(address);
            prop_assert_eq!(first, address);
            for (other, expected) in &addresses {
                prop_assert_eq!(memory.get_addr(other), Some(*expected));
            }
        }
        // addresses are dense and handed out in first-write order
        let mut assigned: Vec<_> = addresses.values().copied().collect();
        assigned.sort_unstable();
        prop_assert_eq!(assigned, (0..memory.size()).collect::<Vec<_>>());
    }

    #[test]
    fn capacity_is_initial_times_power_of_two(count in 0usize..100) {
        let mut memory = Ram::new();
        for i in 0..count {
            memory.write_cell_by_name(&Value::Int(i as i64), &format!("v{i:03}"));
        }
        let mut expected = 4;
        while expected < count {
            expected *= 2;
        }
        prop_assert_eq!(memory.capacity(), expected);
    }

    #[test]
    fn out_of_range_reads_are_not_found(writes in writes_strategy(), extra in 0usize..32) {
        let mut memory = Ram::new();
        for (name, value) in &writes {
            memory.write_cell_by_name(value, name);
        }
        prop_assert_eq!(memory.read_cell_by_addr(memory.size() + extra), None);
        prop_assert!(!memory.write_cell_by_addr(&Value::None, memory.capacity() + extra));
    }
}
