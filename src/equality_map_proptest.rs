#![cfg(test)]

// Property tests kept inside the crate so they can reach `find_index`.

use crate::equality_map::EqualityMap;
use crate::{deep_equals, KeyOrder, StructuralEq, Value};
use proptest::prelude::*;
use serde_json::Value as Json;

const CLASSES: i32 = 4;

fn class(k: i32) -> i32 {
    k.rem_euclid(CLASSES)
}

fn same_class(a: &i32, b: &i32) -> bool {
    class(*a) == class(*b)
}

#[derive(Clone, Debug)]
enum Op {
    Set(i32, i32),
    Insert(i32, i32),
    Get(i32),
    Has(i32),
    Mutate(i32, i32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let key = -20i32..20;
    prop_oneof![
        (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        key.clone().prop_map(Op::Get),
        key.clone().prop_map(Op::Has),
        (key, -100i32..100).prop_map(|(k, d)| Op::Mutate(k, d)),
    ]
}

// Model: one slot per equivalence class, ordered by first insertion.
#[derive(Default)]
struct Model {
    slots: Vec<(i32, i32, i32)>, // (class, latest key, latest value)
}

impl Model {
    fn position(&self, k: i32) -> Option<usize> {
        self.slots.iter().position(|(c, _, _)| *c == class(k))
    }

    fn set(&mut self, k: i32, v: i32) -> Option<i32> {
        match self.position(k) {
            Some(i) => {
                let old = self.slots[i].2;
                self.slots[i] = (class(k), k, v);
                Some(old)
            }
            None => {
                self.slots.push((class(k), k, v));
                None
            }
        }
    }
}

// Property: state-machine equivalence against a per-class model.
// Invariants exercised across random operation sequences:
// - At most one entry per equivalence class (no duplicates under the predicate).
// - Overwrites land at the index of the class's first insertion and replace the key.
// - `get`/`has` parity; `insert` returns exactly the displaced value.
// - `len` equals the number of distinct classes seen.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut sut: EqualityMap<i32, i32, _> = EqualityMap::new(same_class);
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    sut.set(k, v);
                    model.set(k, v);
                }
                Op::Insert(k, v) => {
                    prop_assert_eq!(sut.insert(k, v), model.set(k, v));
                }
                Op::Get(k) => {
                    let expected = model.position(k).map(|i| model.slots[i].2);
                    prop_assert_eq!(sut.get(&k).copied(), expected);
                    prop_assert_eq!(sut.has(&k), expected.is_some());
                }
                Op::Has(k) => {
                    prop_assert_eq!(sut.has(&k), model.position(k).is_some());
                }
                Op::Mutate(k, d) => {
                    if let Some(v) = sut.get_mut(&k) {
                        *v = v.wrapping_add(d);
                    }
                    if let Some(i) = model.position(k) {
                        model.slots[i].2 = model.slots[i].2.wrapping_add(d);
                    }
                }
            }

            prop_assert_eq!(sut.len(), model.slots.len());
            for (i, (_, key, value)) in model.slots.iter().enumerate() {
                prop_assert_eq!(sut.find_index(key), Some(i));
                let (k, v) = sut.get_key_value(key).unwrap();
                prop_assert_eq!((*k, *v), (*key, *value));
            }
        }
    }
}

// Acyclic JSON shallow enough that every container sits above the default ceiling.
fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        (-3i32..3).prop_map(Json::from),
        "[a-c]{0,2}".prop_map(Json::String),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..3).prop_map(Json::Array),
            proptest::collection::btree_map("[a-c]", inner, 0..3)
                .prop_map(|m| Json::Object(m.into_iter().collect())),
        ]
    })
}

// Property: on acyclic data within the depth ceiling, deep equality agrees with
// serde_json's own (order-insensitive) equality.
proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn prop_deep_equals_matches_json_equality(a in arb_json(), b in arb_json()) {
        let expected = a == b;
        prop_assert_eq!(deep_equals(&Value::from(a), &Value::from(b)), expected);
    }

    #[test]
    fn prop_deep_equals_reflexive_on_copies(a in arb_json()) {
        let x = Value::from(a.clone());
        let y = Value::from(a);
        prop_assert!(deep_equals(&x, &x));
        prop_assert!(deep_equals(&x, &y));
        prop_assert!(deep_equals(&y, &x));
        let strict = StructuralEq::default().with_key_order(KeyOrder::Strict);
        prop_assert!(strict.equals(&x, &y));
    }

    #[test]
    fn prop_deep_equals_symmetric(a in arb_json(), b in arb_json()) {
        let (x, y) = (Value::from(a), Value::from(b));
        prop_assert_eq!(deep_equals(&x, &y), deep_equals(&y, &x));
    }

    // Property: a map keyed by deep equality holds one entry per distinct JSON key.
    #[test]
    fn prop_structural_map_dedups(keys in proptest::collection::vec(arb_json(), 1..12)) {
        let mut map = EqualityMap::new(deep_equals);
        let mut distinct: Vec<Json> = Vec::new();
        for (i, k) in keys.iter().enumerate() {
            map.set(Value::from(k.clone()), i);
            if !distinct.contains(k) {
                distinct.push(k.clone());
            }
        }
        prop_assert_eq!(map.len(), distinct.len());
        for (pos, k) in distinct.iter().enumerate() {
            let last = keys.iter().rposition(|x| x == k).unwrap();
            prop_assert_eq!(map.get(&Value::from(k.clone())), Some(&last));
            prop_assert_eq!(map.find_index(&Value::from(k.clone())), Some(pos));
        }
    }
}
