// Ordered layer property tests.
//
// Property: the order and the table never drift apart.
//  - Model: a Vec of keys in the order the container should report, with
//    removal following the container's layout (shift for List and Deque,
//    swap-remove for Bag).
//  - Operations: insert, insert_at, remove, remove_at, alter, pop.
//  - Invariant after every step: order().len() == len() == table().len(),
//    iteration yields exactly the model sequence, and every key in the order
//    is found by lookup.
use probe_hash::OrderType;
use probe_hash::OrderedMap;
use proptest::prelude::*;

fn order_type() -> impl Strategy<Value = OrderType> {
    prop_oneof![
        Just(OrderType::List),
        Just(OrderType::Bag),
        Just(OrderType::Deque)
    ]
}

fn model_remove(model: &mut Vec<u16>, kind: OrderType, index: usize) -> u16 {
    match kind {
        OrderType::Bag => model.swap_remove(index),
        OrderType::List | OrderType::Deque => model.remove(index),
    }
}

fn model_insert(model: &mut Vec<u16>, kind: OrderType, index: usize, key: u16) {
    match kind {
        OrderType::Bag => {
            model.push(key);
            let last = model.len() - 1;
            model.swap(index, last);
        }
        OrderType::List | OrderType::Deque => model.insert(index, key),
    }
}

fn model_move(model: &mut Vec<u16>, kind: OrderType, from: usize, to: usize) {
    match kind {
        OrderType::Bag => model.swap(from, to),
        OrderType::List | OrderType::Deque => {
            let key = model.remove(from);
            model.insert(to, key);
        }
    }
}

proptest! {
    #[test]
    fn prop_order_tracks_table(
        kind in order_type(),
        ops in proptest::collection::vec((0u8..6, 0u16..40, 0usize..64), 1..200),
    ) {
        let mut map: OrderedMap<u16, u32> = OrderedMap::with_order(kind);
        let mut model: Vec<u16> = Vec::new();

        for (op, key, raw_index) in ops {
            match op {
                0 => {
                    let added = map.insert(key, u32::from(key)).is_none();
                    prop_assert_eq!(added, !model.contains(&key));
                    if added {
                        model.push(key);
                    }
                }
                1 => {
                    let index = raw_index % (model.len() + 1);
                    let result = map.insert_at(index, key, u32::from(key));
                    match model.iter().position(|k| *k == key) {
                        Some(_) if index == model.len() => prop_assert!(result.is_err()),
                        Some(from) => {
                            prop_assert_eq!(result, Ok(false));
                            model_move(&mut model, kind, from, index);
                        }
                        None => {
                            prop_assert_eq!(result, Ok(true));
                            model_insert(&mut model, kind, index, key);
                        }
                    }
                }
                2 => {
                    let removed = map.remove(&key).map(|(k, _)| k);
                    let expected = model
                        .iter()
                        .position(|k| *k == key)
                        .map(|index| model_remove(&mut model, kind, index));
                    prop_assert_eq!(removed, expected);
                }
                3 => {
                    if model.is_empty() {
                        prop_assert!(map.remove_at(raw_index).is_err());
                    } else {
                        let index = raw_index % model.len();
                        let expected = model_remove(&mut model, kind, index);
                        prop_assert_eq!(map.remove_at(index).map(|(k, _)| k), Ok(expected));
                    }
                }
                4 => {
                    let after = key.wrapping_add(1) % 40;
                    let altered = map.alter(&key, after);
                    let before = model.iter().position(|k| *k == key);
                    let expected = before.is_some() && !model.contains(&after);
                    prop_assert_eq!(altered, expected);
                    if let (true, Some(index)) = (altered, before) {
                        model[index] = after;
                        prop_assert_eq!(map.get(&after), Some(&u32::from(key)));
                        map.insert(after, u32::from(after));
                    }
                }
                5 => {
                    prop_assert_eq!(map.pop().map(|(k, _)| k), model.pop());
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(map.order().len(), map.len());
            prop_assert_eq!(map.table().len(), map.len());
            prop_assert_eq!(map.keys().copied().collect::<Vec<_>>(), model.clone());
            for k in map.keys() {
                prop_assert!(map.contains_key(k));
            }
        }
    }

    #[test]
    fn prop_cursor_visits_each_entry_once(
        kind in order_type(),
        count in 0u16..80,
        modulus in 1u16..5,
    ) {
        let mut map: OrderedMap<u16, ()> = OrderedMap::with_order(kind);
        for k in 0..count {
            map.insert(k, ());
        }

        let mut visited = Vec::new();
        let mut cursor = map.cursor();
        while let Some((k, _)) = cursor.next() {
            let k = *k;
            visited.push(k);
            if k % modulus == 0 {
                prop_assert_eq!(cursor.remove().map(|(k, _)| k), Ok(k));
            }
        }

        visited.sort_unstable();
        prop_assert_eq!(visited, (0..count).collect::<Vec<_>>());
        prop_assert!(map.keys().all(|k| k % modulus != 0));
        prop_assert_eq!(map.order().len(), map.len());
    }
}
