//! Property tests: ordering invariant, event stream fidelity, constraint bypass.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use xsect_table::{MutationResult, TableConfig, TableEvent, YzPolicy, YzTable, ZwTable};

#[derive(Debug, Clone)]
enum Op {
	Insert(f64, f64),
	SetKey(usize, f64),
	SetValue(usize, f64),
	Remove(usize),
}

fn arb_key() -> impl Strategy<Value = f64> {
	// Small integer range so ties are common.
	(-20i32..20).prop_map(f64::from)
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => (arb_key(), arb_key()).prop_map(|(y, z)| Op::Insert(y, z)),
		3 => (any::<usize>(), arb_key()).prop_map(|(i, y)| Op::SetKey(i, y)),
		1 => (any::<usize>(), arb_key()).prop_map(|(i, z)| Op::SetValue(i, z)),
		1 => any::<usize>().prop_map(Op::Remove),
	]
}

/// Replays `events` onto a mirror of the key column.
///
/// `key` is the key value the operation introduced, if any.
fn replay(mirror: &mut Vec<f64>, events: &[TableEvent], key: Option<f64>) {
	for event in events {
		match *event {
			TableEvent::Insert { index } => mirror.insert(index, key.unwrap_or(f64::NAN)),
			TableEvent::Remove { index } => {
				mirror.remove(index);
			}
			TableEvent::Move { from, to } => {
				let moved = mirror.remove(from);
				mirror.insert(to, moved);
				if let Some(key) = key {
					mirror[to] = key;
				}
			}
			TableEvent::ValueChanged { index, field } => {
				if field == YzPolicy::Y
					&& let Some(key) = key
				{
					mirror[index] = key;
				}
			}
			TableEvent::Reset => panic!("no bulk operations in this test"),
		}
	}
}

fn is_ascending(keys: &[f64]) -> bool {
	keys.windows(2).all(|pair| pair[0] <= pair[1])
}

proptest! {
	/// Every edit keeps the table ascending, and replaying the events an
	/// observer saw reproduces the key column exactly.
	#[test]
	fn prop_order_and_event_fidelity(ops in prop::collection::vec(arb_op(), 1..64)) {
		let mut table = YzTable::new();
		let log: Rc<RefCell<Vec<TableEvent>>> = Rc::default();
		let sink = Rc::clone(&log);
		table.subscribe(move |event| sink.borrow_mut().push(*event));
		let mut mirror: Vec<f64> = Vec::new();

		for op in ops {
			log.borrow_mut().clear();
			let key = match op {
				Op::Insert(y, z) => {
					table.add_point(y, z).unwrap();
					let events = log.borrow();
					prop_assert!(matches!(events[0], TableEvent::Insert { .. }), "expected TableEvent::Insert");
					prop_assert!(events.len() <= 2);
					Some(y)
				}
				Op::SetKey(seed, y) => {
					if table.is_empty() {
						continue;
					}
					let result = table.update_field(seed % table.len(), YzPolicy::Y, y).unwrap();
					let events = log.borrow();
					prop_assert_eq!(events.len(), 1);
					match result {
						MutationResult::InPlace { index } => {
							prop_assert_eq!(events[0], TableEvent::ValueChanged { index, field: YzPolicy::Y });
						}
						MutationResult::Moved { from, to } => {
							prop_assert_eq!(events[0], TableEvent::Move { from, to });
						}
					}
					Some(y)
				}
				Op::SetValue(seed, z) => {
					if table.is_empty() {
						continue;
					}
					let result = table.update_field(seed % table.len(), YzPolicy::Z, z).unwrap();
					prop_assert!(matches!(result, MutationResult::InPlace { .. }), "expected MutationResult::InPlace");
					None
				}
				Op::Remove(seed) => {
					if table.is_empty() {
						continue;
					}
					table.remove(seed % table.len()).unwrap();
					None
				}
			};

			replay(&mut mirror, &log.borrow(), key);
			let keys: Vec<f64> = table.keys().collect();
			prop_assert!(is_ascending(&keys), "not ascending: {:?}", keys);
			prop_assert_eq!(&mirror, &keys);
		}
	}

	/// A key edit that keeps the row between its neighbours never moves it.
	#[test]
	fn prop_order_preserving_key_edit_is_value_change(
		mut keys in prop::collection::vec(-1000i32..1000, 2..32),
		seed in any::<usize>(),
		t in 0.0f64..=1.0,
	) {
		keys.sort_unstable();
		keys.dedup();
		prop_assume!(keys.len() >= 3);
		let table_keys: Vec<f64> = keys.iter().map(|&k| f64::from(k)).collect();
		let mut table = YzTable::from_rows(table_keys.iter().map(|&k| [k, 0.0]), TableConfig::default()).unwrap();
		let index = 1 + seed % (table_keys.len() - 2);
		let (lo, hi) = (table_keys[index - 1], table_keys[index + 1]);
		let value = lo + (hi - lo) * t;

		let result = table.update_field(index, YzPolicy::Y, value).unwrap();
		prop_assert_eq!(result, MutationResult::InPlace { index });
	}

	/// With enforcement off, nothing is ever rejected.
	#[test]
	fn prop_trusted_tables_accept_anything(
		rows in prop::collection::vec((any::<f64>(), any::<f64>(), any::<f64>()), 1..16),
		edits in prop::collection::vec((any::<usize>(), 0usize..3, any::<f64>()), 0..16),
	) {
		let mut table = ZwTable::with_config(TableConfig::trusted());
		for (z, total, storage) in rows {
			prop_assert!(table.add_level(z, total, storage).is_ok());
		}
		for (seed, field, value) in edits {
			let index = seed % table.len();
			prop_assert!(table.update_field(index, field, value).is_ok());
		}
	}
}
