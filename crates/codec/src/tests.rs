use xsect_table::{TableError, YzTable, ZwTable};

use super::*;

fn sample() -> YzTable {
	let mut table = YzTable::new();
	for (y, z) in [(0.0, 0.0), (22.5, -10.0), (50.0, -0.0), (100.0, 0.1)] {
		table.add_point(y, z).unwrap();
	}
	table
}

#[test]
fn layout_is_version_arity_values() {
	let bytes = encode(&sample()).unwrap();
	assert_eq!(bytes[0], FORMAT_VERSION);
	assert_eq!(bytes[1], 2, "arity");
	assert_eq!(bytes[2], 8, "value count");
	assert_eq!(bytes.len(), 3 + 8 * 8);
	assert_eq!(&bytes[3..11], &0.0f64.to_le_bytes());
}

#[test]
fn round_trip_is_bit_exact() {
	let table = sample();
	let decoded: YzTable = decode(&encode(&table).unwrap(), TableConfig::default()).unwrap();
	assert_eq!(decoded.len(), table.len());
	for (a, b) in table.iter().zip(decoded.iter()) {
		assert!(a.bits_eq(&b), "{a:?} != {b:?}");
	}
}

#[test]
fn empty_table_round_trips() {
	let bytes = encode(&ZwTable::new()).unwrap();
	let decoded: ZwTable = decode(&bytes, TableConfig::default()).unwrap();
	assert!(decoded.is_empty());
}

#[test]
fn truncated_input_is_malformed() {
	let bytes = encode(&sample()).unwrap();
	for cut in [0, 1, 2, 10, bytes.len() - 1] {
		let err = decode_rows::<2>(&bytes[..cut]).unwrap_err();
		assert!(matches!(err, CodecError::Malformed(_)), "cut {cut}: {err}");
	}
}

#[test]
fn wrong_version_is_rejected() {
	let mut bytes = encode(&sample()).unwrap();
	bytes[0] = FORMAT_VERSION + 1;
	assert!(matches!(
		decode_rows::<2>(&bytes),
		Err(CodecError::Version { found, .. }) if found == FORMAT_VERSION + 1
	));
}

#[test]
fn wrong_arity_is_rejected() {
	let bytes = encode(&sample()).unwrap();
	assert!(matches!(
		decode_rows::<3>(&bytes),
		Err(CodecError::Arity { found: 2, expected: 3 })
	));
}

#[test]
fn ragged_values_are_rejected() {
	let values = [1.0f64, 2.0, 3.0];
	let mut bytes = vec![FORMAT_VERSION, 2, 3];
	for v in values {
		bytes.extend_from_slice(&v.to_le_bytes());
	}
	assert!(matches!(
		decode_rows::<2>(&bytes),
		Err(CodecError::Ragged { values: 3, arity: 2 })
	));
}

#[test]
fn trailing_bytes_are_rejected() {
	let mut bytes = encode(&sample()).unwrap();
	bytes.push(0);
	assert!(matches!(decode_rows::<2>(&bytes), Err(CodecError::TrailingBytes(1))));
}

#[test]
fn invalid_rows_fail_validation_but_load_when_trusted() {
	let bytes = encode_rows(&[Row::new([0.0, 5.0, 9.0])]).unwrap();
	let err = decode::<xsect_table::ZwPolicy, 3>(&bytes, TableConfig::default()).unwrap_err();
	assert!(matches!(err, CodecError::Rejected(TableError::Constraint(_))));
	let table: ZwTable = decode(&bytes, TableConfig::trusted()).unwrap();
	assert_eq!(table.len(), 1);
}

#[test]
fn source_config_round_trips_relaxed_tables() {
	let config = TableConfig {
		reject_duplicate_keys: Some(false),
		..TableConfig::default()
	};
	let mut source = ZwTable::with_config(config);
	source.add_level(2.0, 30.0, 2.0).unwrap();
	source.add_level(2.0, 40.0, 0.0).unwrap();
	let bytes = encode(&source).unwrap();

	let err = decode::<xsect_table::ZwPolicy, 3>(&bytes, TableConfig::default()).unwrap_err();
	assert!(matches!(err, CodecError::Rejected(TableError::Constraint(_))));

	let copy: ZwTable = decode(&bytes, source.config()).unwrap();
	assert_eq!(copy.to_vec(), source.to_vec());
	assert_eq!(copy.config(), source.config());
}

#[test]
fn decode_into_failure_leaves_table_untouched() {
	let mut table = sample();
	let before = table.to_vec();
	let fired = std::rc::Rc::new(std::cell::Cell::new(false));
	let sink = std::rc::Rc::clone(&fired);
	table.subscribe(move |_| sink.set(true));

	assert!(decode_into(&mut table, &[FORMAT_VERSION, 2]).is_err());
	assert_eq!(table.to_vec(), before);
	assert!(!fired.get());
}

#[test]
fn appended_envelopes_decode_in_sequence() {
	let mut buf = Vec::new();
	let first = sample();
	let mut second = YzTable::new();
	second.add_point(7.0, 7.0).unwrap();
	encode_append(&first, &mut buf).unwrap();
	encode_append(&second, &mut buf).unwrap();

	let (rows, rest) = decode_rows_prefix::<2>(&buf).unwrap();
	assert_eq!(rows.len(), 4);
	let (rows, rest) = decode_rows_prefix::<2>(rest).unwrap();
	assert_eq!(rows, vec![Row::new([7.0, 7.0])]);
	assert!(rest.is_empty());
}
