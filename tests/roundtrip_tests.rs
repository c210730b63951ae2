mod common;

use std::fs::{self, OpenOptions};

use huffcomp::bitio::{stream_len, HEADER_LEN};
use huffcomp::{CodeBook, Decoder, Error, FrequencyTable, TreeBuilder};
use rstest::*;

use crate::common::*;

#[rstest]
#[case::empty(b"".to_vec())]
#[case::single_repeated_symbol(b"aaaa".to_vec())]
#[case::two_symbols(b"ab".to_vec())]
#[case::abracadabra(b"abracadabra".to_vec())]
#[case::skewed(b"aaaaaaaaaaaaaaaabbbbbbbbccccddeefghijk".to_vec())]
#[case::every_byte((0..=255).collect())]
#[case::zipf(get_symbols(0))]
fn session_restores_the_input(#[case] input: Vec<u8>) {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let (session, report) = run_session(&dir, &input);

    assert_eq!(fs::read(&session.outputs().decompressed).unwrap(), input);
    assert_eq!(report.input_bytes, input.len() as u64);
    assert_eq!(report.decompressed_bytes, input.len() as u64);
    assert_eq!(
        file_len(&session.outputs().compressed),
        stream_len(report.compressed_bits)
    );
}

#[test]
fn empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let (session, report) = run_session(&dir, b"");

    assert_eq!(report.distinct_symbols, 0);
    assert_eq!(report.tree_size, 0);
    assert_eq!(report.compressed_bits, 0);
    assert_eq!(file_len(&session.outputs().compressed), HEADER_LEN as u64);
    assert_eq!(file_len(&session.outputs().decompressed), 0);
}

#[test]
fn single_repeated_symbol_costs_one_bit_each() {
    let dir = tempfile::tempdir().unwrap();
    let (session, report) = run_session(&dir, b"aaaa");

    assert_eq!(report.distinct_symbols, 1);
    assert_eq!(report.tree_size, 1);
    assert_eq!(report.compressed_bits, 4);

    let compressed = fs::read(&session.outputs().compressed).unwrap();
    assert_eq!(compressed[HEADER_LEN..], [0b0000_0000]);
}

#[test]
fn two_symbols_cost_one_bit_each() {
    let dir = tempfile::tempdir().unwrap();
    let (_, report) = run_session(&dir, b"ab");

    assert_eq!(report.tree_size, 3);
    assert_eq!(report.compressed_bits, 2);
}

#[test]
fn frequent_symbols_get_shorter_codewords() {
    let table: FrequencyTable = b"abracadabra".iter().copied().collect();
    let tree = TreeBuilder::new(&table).build().unwrap();
    let codebook = CodeBook::from_tree(&tree);

    assert_eq!(tree.leaf_count(), 5);
    let len = |symbol: u8| codebook.get(symbol).unwrap().len();
    assert!(len(b'a') < len(b'c'));
    assert!(len(b'a') < len(b'd'));
}

#[test]
fn thousand_identical_bytes_do_not_grow() {
    let dir = tempfile::tempdir().unwrap();
    let input = vec![b'z'; 1_000];
    let (session, report) = run_session(&dir, &input);

    assert_eq!(report.compressed_bits, 1_000);
    assert!(file_len(&session.outputs().compressed) <= 1_001);
}

#[test]
fn truncated_stream_is_detected() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let input = b"abracadabra, abracadabra!".to_vec();
    let (session, _) = run_session(&dir, &input);

    let compressed = &session.outputs().compressed;
    let len = file_len(compressed);
    OpenOptions::new()
        .write(true)
        .open(compressed)
        .unwrap()
        .set_len(len - 1)
        .unwrap();

    let table = FrequencyTable::from_path(session.input()).unwrap();
    let tree = TreeBuilder::new(&table).build();
    let output = dir.path().join("truncated_output");
    let err = Decoder::new(tree.as_ref())
        .decode_file(compressed, &output)
        .unwrap_err();

    assert!(matches!(err, Error::StreamTruncated { .. }));
    assert!(file_len(&output) < input.len() as u64);
}

#[test]
fn truncated_header_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let (session, _) = run_session(&dir, b"");

    let compressed = &session.outputs().compressed;
    OpenOptions::new()
        .write(true)
        .open(compressed)
        .unwrap()
        .set_len(HEADER_LEN as u64 - 1)
        .unwrap();

    let err = Decoder::new(None)
        .decode_file(compressed, dir.path().join("out"))
        .unwrap_err();
    assert!(matches!(err, Error::StreamTruncated { bits_read: 0 }));
}
