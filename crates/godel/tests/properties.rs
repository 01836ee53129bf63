//! Bijection properties checked over generated inputs.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

use godel::codec::{integers, naturals, Enumeration};
use godel::pairing::{
    f_to_flist, flist_to_f, i_to_ilist, ilist_to_i, merge, unmerge, PairingStrategy,
};
use godel::{
    standard_registry, verify_codes, AlphabetString, Bijectable, Codec, CodecOptions, Fraction,
    HostType, ListCodec, Product, Rational, Record, Union, Value,
};

fn n(v: u64) -> BigUint {
    BigUint::from(v)
}

fn arb_strategy() -> impl Strategy<Value = PairingStrategy> {
    prop_oneof![Just(PairingStrategy::Block), Just(PairingStrategy::Diagonal)]
}

fn arb_big() -> impl Strategy<Value = BigUint> {
    prop::collection::vec(any::<u32>(), 0..6).prop_map(BigUint::new)
}

fn record() -> Product {
    Product::builder("Sample")
        .field("flag", HostType::Bool)
        .field("count", naturals())
        .field("small", HostType::I8)
        .field("offset", integers())
        .field("ratio", HostType::Fraction)
        .build(standard_registry())
        .unwrap()
}

fn enumeration(name: &str, variants: &[&str]) -> Codec {
    Arc::new(Enumeration::new(name, variants.iter().copied()).unwrap())
}

// =============================================================================
// PAIRING
// =============================================================================

proptest! {
    #[test]
    fn prop_pair_unpair(strategy in arb_strategy(), x in arb_big(), y in arb_big()) {
        let z = strategy.pair(&x, &y);
        prop_assert_eq!(strategy.unpair(&z), (x, y));
    }

    #[test]
    fn prop_unpair_pair(strategy in arb_strategy(), z in arb_big()) {
        let (x, y) = strategy.unpair(&z);
        prop_assert_eq!(strategy.pair(&x, &y), z);
    }

    #[test]
    fn prop_merge(m in 1u64..64, tag_seed in any::<u64>(), payload in arb_big()) {
        let m = n(m);
        let tag = n(tag_seed) % &m;
        let code = merge(&tag, &payload, &m);
        prop_assert_eq!(unmerge(&code, &m), (tag, payload));
    }

    #[test]
    fn prop_mixed_radix(digits in prop::collection::vec((1u64..1000, any::<u64>()), 0..8)) {
        let maxes: Vec<BigUint> = digits.iter().map(|&(max, _)| n(max)).collect();
        let values: Vec<BigUint> = digits.iter().map(|&(max, seed)| n(seed % max)).collect();
        let code = flist_to_f(&values, &maxes);
        prop_assert_eq!(f_to_flist(&code, &maxes, maxes.len()), values);
    }

    #[test]
    fn prop_list_numbering_small(tuple in prop::collection::vec(0u64..=50, 0..=5)) {
        let tuple: Vec<BigUint> = tuple.into_iter().map(n).collect();
        let code = ilist_to_i(&tuple);
        prop_assert_eq!(i_to_ilist(&code, tuple.len()), tuple);
    }

    #[test]
    fn prop_list_numbering_large(tuple in prop::collection::vec(arb_big(), 1..=6)) {
        let code = ilist_to_i(&tuple);
        prop_assert_eq!(i_to_ilist(&code, tuple.len()), tuple);
    }

    #[test]
    fn prop_list_unranking(length in 1usize..=5, code in arb_big()) {
        let tuple = i_to_ilist(&code, length);
        prop_assert_eq!(tuple.len(), length);
        prop_assert_eq!(ilist_to_i(&tuple), code);
    }
}

// =============================================================================
// CODECS
// =============================================================================

proptest! {
    #[test]
    fn prop_integers(z in any::<i128>()) {
        let codec = integers();
        let value = Value::Int(BigInt::from(z));
        let code = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode(&code).unwrap(), value);
    }

    #[test]
    fn prop_machine_integers(v in any::<i64>(), w in any::<u16>()) {
        let registry = standard_registry();
        let signed = registry.lookup(HostType::I64).unwrap();
        let code = signed.encode(&Value::I64(v)).unwrap();
        prop_assert_eq!(signed.decode(&code).unwrap(), Value::I64(v));

        let unsigned = registry.lookup(HostType::U16).unwrap();
        prop_assert_eq!(unsigned.encode(&Value::U16(w)).unwrap(), n(u64::from(w)));
    }

    #[test]
    fn prop_rationals(a in -10_000i64..=10_000, b in 1i64..=10_000) {
        let fraction = Fraction::reduced(a, b).unwrap();
        let codec = Rational::new();
        let value = Value::Fraction(fraction);
        let code = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode(&code).unwrap(), value);
    }

    #[test]
    fn prop_rational_codes(code in 0u64..1_000_000) {
        let codec = Rational::new();
        let value = codec.decode(&n(code)).unwrap();
        prop_assert_eq!(codec.encode(&value).unwrap(), n(code));
    }

    #[test]
    fn prop_product_codes(code in arb_big()) {
        let codec = record();
        let value = codec.decode(&code).unwrap();
        prop_assert_eq!(codec.encode(&value).unwrap(), code);
    }

    #[test]
    fn prop_product_values(flag in any::<bool>(), count in any::<u64>(), small in any::<i8>(), offset in any::<i64>(), a in -100i64..100, b in 1i64..100) {
        let codec = record();
        let value: Value = Record::new("Sample")
            .with("ratio", Fraction::reduced(a, b).unwrap())
            .with("offset", BigInt::from(offset))
            .with("small", small)
            .with("count", n(count))
            .with("flag", flag)
            .into();
        let code = codec.encode(&value).unwrap();
        let Value::Record(decoded) = codec.decode(&code).unwrap() else {
            panic!("expected a record");
        };
        for (name, field) in &decoded.fields {
            prop_assert_eq!(Some(field), value.as_record().unwrap().get(name));
        }
        prop_assert_eq!(decoded.fields.len(), 5);
    }

    #[test]
    fn prop_union_codes(code in arb_big()) {
        let codec = Union::builder()
            .member(enumeration("A", &["a0", "a1", "a2"]))
            .member(enumeration("B", &["b0", "b1", "b2", "b3"]))
            .member(integers())
            .member(naturals())
            .member(HostType::Fraction)
            .build(standard_registry())
            .unwrap();
        let value = codec.decode(&code).unwrap();
        prop_assert_eq!(codec.encode(&value).unwrap(), code);
    }

    #[test]
    fn prop_nested_union_codes(code in arb_big()) {
        let inner = Union::builder()
            .member(enumeration("A", &["a0", "a1", "a2"]))
            .member(integers())
            .build(standard_registry())
            .unwrap();
        let codec = Union::builder()
            .member(inner.into_codec())
            .member(enumeration("B", &["b0", "b1"]))
            .member(naturals())
            .build(standard_registry())
            .unwrap();
        let value = codec.decode(&code).unwrap();
        prop_assert_eq!(codec.encode(&value).unwrap(), code);
    }

    #[test]
    fn prop_lists(strategy in arb_strategy(), elements in prop::collection::vec(any::<u64>(), 0..10)) {
        let codec = ListCodec::with_options(naturals(), CodecOptions::new().with_pairing(strategy));
        let value = codec.list(elements.into_iter().map(|e| Value::Nat(n(e))).collect());
        let code = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode(&code).unwrap(), value);
    }

    #[test]
    fn prop_bounded_lists(code in arb_big()) {
        let codec = ListCodec::new(standard_registry().lookup(HostType::I8).unwrap().clone());
        let value = codec.decode(&code).unwrap();
        prop_assert_eq!(codec.encode(&value).unwrap(), code);
    }

    #[test]
    fn prop_alphabet_strings(text in "[a-f]{0,24}") {
        let codec = AlphabetString::new("abcdef").unwrap();
        let value = codec.text(text);
        let code = codec.encode(&value).unwrap();
        prop_assert_eq!(codec.decode(&code).unwrap(), value);
    }
}

// =============================================================================
// EXHAUSTIVE PREFIXES
// =============================================================================

#[test]
fn test_every_finite_codec_is_exhaustive() {
    let registry = standard_registry();
    for host in [HostType::Bool, HostType::U8, HostType::I8, HostType::U16, HostType::I16] {
        let codec = registry.lookup(host).unwrap();
        let size = codec.size().as_finite().unwrap().clone();
        let checked = verify_codes(&**codec, u64::MAX).unwrap();
        assert_eq!(n(checked), size, "{}", host);
    }

    let flags = Product::builder("Flags")
        .field("a", HostType::Bool)
        .field("b", HostType::I8)
        .field("c", enumeration("Color", &["red", "green", "blue"]))
        .build(standard_registry())
        .unwrap();
    assert_eq!(verify_codes(&flags, u64::MAX).unwrap(), 2 * 256 * 3);
}

#[test]
fn test_infinite_codecs_over_a_prefix() {
    let codecs: Vec<Codec> = vec![
        naturals(),
        integers(),
        Rational::codec(),
        record().into_codec(),
        ListCodec::new(naturals()).into_codec(),
        ListCodec::new(standard_registry().lookup(HostType::Bool).unwrap().clone()).into_codec(),
        Arc::new(AlphabetString::new("xyz").unwrap()) as Codec,
    ];
    for codec in &codecs {
        assert_eq!(verify_codes(&**codec, 5000).unwrap(), 5000, "{}", codec.type_name());
    }
}

#[test]
fn test_documented_examples() {
    // naturals are the identity
    let nat = naturals();
    assert_eq!(nat.encode(&Value::Nat(n(5))).unwrap(), n(5));
    assert_eq!(nat.decode(&n(5)).unwrap(), Value::Nat(n(5)));

    // integers fold 0, -1, 1 onto 0, 1, 2
    let z = integers();
    assert_eq!(z.encode(&Value::Int(BigInt::from(0))).unwrap(), n(0));
    assert_eq!(z.encode(&Value::Int(BigInt::from(-1))).unwrap(), n(1));
    assert_eq!(z.encode(&Value::Int(BigInt::from(1))).unwrap(), n(2));

    // rationals
    let q = Rational::new();
    assert_eq!(q.decode(&n(0)).unwrap(), Value::Fraction(Fraction::zero()));
    assert_eq!(q.decode(&n(1)).unwrap(), Value::Fraction(Fraction::from_integer(1)));
    assert_eq!(q.decode(&n(2)).unwrap(), Value::Fraction(Fraction::from_integer(-1)));
    assert_eq!(verify_codes(&q, 10_000).unwrap(), 10_000);

    // union of A (3), B (4) and one infinite member
    let union = Union::builder()
        .member(enumeration("A", &["a0", "a1", "a2"]))
        .member(enumeration("B", &["b0", "b1", "b2", "b3"]))
        .member(naturals())
        .build(standard_registry())
        .unwrap();
    for code in 0u64..3 {
        assert_eq!(union.decode(&n(code)).unwrap().type_name(), "A");
    }
    for code in 3u64..7 {
        assert_eq!(union.decode(&n(code)).unwrap().type_name(), "B");
    }
    for code in 7u64..40 {
        assert_eq!(union.decode(&n(code)).unwrap(), Value::Nat(n(code - 7)));
    }
}

#[test]
fn test_codecs_are_shareable_across_threads() {
    let codec: Codec = record().into_codec();
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let codec = Arc::clone(&codec);
            std::thread::spawn(move || {
                for code in (t * 1000)..((t + 1) * 1000) {
                    let value = codec.decode(&n(code)).unwrap();
                    assert_eq!(codec.encode(&value).unwrap(), n(code));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
