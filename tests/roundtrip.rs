use std::fs;

use ascii_huffman::bit_vec;
use ascii_huffman::{HuffmanCodec, HuffmanError};
use proptest::prelude::*;
use test_case::test_case;

fn round_trip(text: &[u8]) -> Vec<u8> {
    let codec = HuffmanCodec::from_reader(text).unwrap();
    let encoded = codec.encode(text).unwrap();
    codec.decode(&encoded).unwrap()
}

#[test_case(b"aaab"; "worked example")]
#[test_case(b"a"; "single symbol")]
#[test_case(b"\x7f\x7f\x7f"; "last symbol of the alphabet")]
#[test_case(b"\0\0"; "nul symbol")]
#[test_case(b"abcd"; "equal weights")]
#[test_case(b"The quick brown fox jumps over the lazy dog.\nAnd again!\n"; "pangram")]
fn round_trips(text: &[u8]) {
    assert_eq!(round_trip(text), text);
}

#[test_case(1; "one symbol")]
#[test_case(1000; "one thousand symbols")]
fn singleton_alphabet(k: usize) {
    let text = vec![b'q'; k];
    let codec = HuffmanCodec::from_reader(&text[..]).unwrap();
    let encoded = codec.encode(&text[..]).unwrap();

    // every symbol takes one bit
    assert_eq!(encoded.len(), k / 8 + 1);
    assert_eq!(codec.decode(&encoded).unwrap(), text);
}

#[test]
fn byte_aligned_payload_gets_a_full_pad_byte() {
    // four symbols with 2-bit codes: 4 symbols -> 8 payload bits
    let text = b"abcd";
    let codec = HuffmanCodec::from_reader(&text[..]).unwrap();
    let bits = codec.encode_bits(&text[..]).unwrap();
    assert_eq!(bits, "00011011");

    let encoded = codec.encode(&text[..]).unwrap();
    assert_eq!(encoded.len(), bits.len() / 8 + 1);
    assert_eq!(encoded, vec![0b0000_0001, 0b0001_1011]);
}

#[test]
fn equal_weight_code_table() {
    let codec = HuffmanCodec::from_reader(&b"dcbaabcd"[..]).unwrap();
    let table: Vec<(u8, &str)> = codec.table().iter().collect();
    assert_eq!(
        table,
        vec![(b'a', "00"), (b'b', "01"), (b'c', "10"), (b'd', "11")]
    );
}

#[test]
fn encoding_is_deterministic() {
    let text = b"mississippi river banks";
    let first = HuffmanCodec::from_reader(&text[..])
        .unwrap()
        .encode(&text[..])
        .unwrap();
    let second = HuffmanCodec::from_reader(&text[..])
        .unwrap()
        .encode(&text[..])
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn non_ascii_source_is_rejected() {
    let err = HuffmanCodec::from_reader("caf\u{e9}".as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        HuffmanError::SymbolOutOfRange { offset: 3, .. }
    ));
}

#[test]
fn files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("input.txt");
    let encoded = dir.path().join("input.huff");
    let decoded = dir.path().join("output.txt");
    let text = "To be, or not to be, that is the question:\n\
                Whether 'tis nobler in the mind to suffer\n";
    fs::write(&source, text).unwrap();

    let codec = HuffmanCodec::from_file(&source).unwrap();
    codec.encode_file(&source, &encoded).unwrap();

    // a second run overwrites with identical bytes
    let first = fs::read(&encoded).unwrap();
    codec.encode_file(&source, &encoded).unwrap();
    assert_eq!(first, fs::read(&encoded).unwrap());

    codec.decode_file(&encoded, &decoded).unwrap();
    assert_eq!(fs::read_to_string(&decoded).unwrap(), text);
}

#[test]
fn invalid_bit_string_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bits.huff");
    let err = bit_vec::write_bit_string(&path, "0110a").unwrap_err();
    assert!(matches!(
        err,
        HuffmanError::InvalidBitCharacter {
            character: 'a',
            position: 4
        }
    ));
    assert!(!path.exists());
}

#[test]
fn partial_code_is_truncated() {
    let codec = HuffmanCodec::from_reader(&b"abcd"[..]).unwrap();
    // marker 0000001 then one payload bit: half of a two-bit code
    let err = codec.decode(&[0b0000_0011]).unwrap_err();
    assert!(matches!(
        err,
        HuffmanError::TruncatedStream {
            consumed_bits: 1,
            depth: 1
        }
    ));
}

proptest! {
    #[test]
    fn ascii_round_trip(text in proptest::collection::vec(0u8..128, 0..512)) {
        prop_assert_eq!(round_trip(&text), text);
    }

    #[test]
    fn encoded_length_follows_payload(text in proptest::collection::vec(0u8..128, 1..256)) {
        let codec = HuffmanCodec::from_reader(&text[..]).unwrap();
        let bits = codec.encode_bits(&text[..]).unwrap();
        let encoded = codec.encode(&text[..]).unwrap();
        prop_assert_eq!(encoded.len(), bits.len() / 8 + 1);
        prop_assert_eq!(bit_vec::unpack(&encoded), bits);
    }

    #[test]
    fn pack_unpack_any_bits(bits in "[01]{0,64}") {
        let packed = bit_vec::pack(&bits).unwrap();
        prop_assert_eq!(bit_vec::unpack(&packed), bits);
    }
}
