use std::rc::Rc;

use probe_hash::CaseInsensitiveMap;
use probe_hash::CaseInsensitiveOrderedSet;
use probe_hash::CaseInsensitiveSet;
use probe_hash::CharFilter;
use probe_hash::Error;
use probe_hash::Filtered;
use probe_hash::FilteredStringMap;
use probe_hash::FilteredStringOrderedSet;
use probe_hash::FilteredStringSet;
use probe_hash::HashMap;
use probe_hash::HashSet;
use probe_hash::IdentityMap;
use probe_hash::IdentityOrderedSet;
use probe_hash::OrderType;
use probe_hash::OrderedScalarMap;
use probe_hash::OrderedScalarSet;
use probe_hash::OrderedSet;
use probe_hash::ScalarMap;
use probe_hash::ScalarSet;
use probe_hash::TableConfig;

const LETTERS_UPPER: CharFilter =
    CharFilter::new("LettersUpper", char::is_alphabetic, |c| c.to_ascii_uppercase());

#[test]
fn seven_keys_in_eight_slots_resize_once() {
    let config = TableConfig::new(8, 0.75).unwrap();
    let mut set: HashSet<u32> = HashSet::with_config(config);
    assert_eq!(set.capacity(), 8);
    assert_eq!(set.threshold(), 6);

    let first_multiplier = set.multiplier();
    let mut multipliers = vec![first_multiplier];
    for k in 0..7 {
        set.insert(k);
        multipliers.push(set.multiplier());
    }
    multipliers.dedup();

    assert_eq!(set.capacity(), 16);
    assert_eq!(set.threshold(), 12);
    assert_eq!(multipliers.len(), 2, "exactly one resize");
    assert!((0..7).all(|k| set.contains(&k)));
}

#[test]
fn capacity_is_rounded_to_a_power_of_two() {
    let set: HashSet<u8> = HashSet::with_config(TableConfig::with_capacity(100).unwrap());
    assert_eq!(set.capacity(), 128);

    let map: ScalarMap<u8, u8> = ScalarMap::with_config(TableConfig::with_capacity(1).unwrap());
    assert_eq!(map.capacity(), 2);

    assert_eq!(TableConfig::with_capacity(0), Err(Error::ZeroCapacity));
    assert!(matches!(
        TableConfig::with_load_factor(1.5),
        Err(Error::InvalidLoadFactor(_))
    ));
}

#[test]
fn bag_removal_keeps_the_survivors() {
    let mut set: OrderedSet<&str> = OrderedSet::with_order(OrderType::Bag);
    for word in ["one", "two", "three", "four", "five"] {
        set.insert(word);
    }
    let third = *set.get_at(2).unwrap();
    assert!(set.remove(&third));

    assert_eq!(set.len(), 4);
    assert_eq!(set.order().len(), 4);
    for word in ["one", "two", "four", "five"] {
        assert!(set.contains(&word));
    }
    assert!(!set.contains(&"three"));
}

#[test]
fn case_insensitive_containers() {
    let mut set: CaseInsensitiveSet<String> = CaseInsensitiveSet::new();
    set.insert("Hello".to_string());
    assert!(set.contains("hello"));
    assert!(set.contains("HELLO"));
    assert!(!set.insert("hELLo".to_string()));
    assert_eq!(set.len(), 1);

    let mut map: CaseInsensitiveMap<String, u32> = CaseInsensitiveMap::new();
    map.insert("Content-Type".to_string(), 1);
    *map.entry("content-type".to_string()).or_insert(0) += 1;
    assert_eq!(map.get("CONTENT-TYPE"), Some(&2));

    let mut ordered: CaseInsensitiveOrderedSet<String> = CaseInsensitiveOrderedSet::new();
    ordered.insert("b".to_string());
    ordered.insert("A".to_string());
    ordered.insert("B".to_string());
    assert_eq!(ordered.iter().collect::<Vec<_>>(), ["b", "A"]);
    assert_eq!(ordered.index_of("a"), Some(1));
}

#[test]
fn filtered_string_equality() {
    let mut set = FilteredStringSet::with_strategy(Filtered::new(LETTERS_UPPER));
    set.insert("Hello, World!".to_string());
    assert!(set.contains("HELLOWORLD"));
    assert!(set.contains("hello world"));
    assert!(!set.insert("HeLLo WoRLD".to_string()));

    let mut map = FilteredStringMap::with_strategy(Filtered::new(LETTERS_UPPER));
    map.insert("a-b-c".to_string(), 1);
    assert_eq!(map.get("ABC"), Some(&1));

    let mut ordered = FilteredStringOrderedSet::with_strategy(Filtered::new(LETTERS_UPPER));
    ordered.insert("x1".to_string());
    ordered.insert("y2".to_string());
    assert!(!ordered.insert("X9".to_string()));
    assert_eq!(ordered.len(), 2);
}

#[test]
fn replacing_the_filter_clears_the_set() {
    let mut set = FilteredStringSet::with_strategy(Filtered::new(LETTERS_UPPER));
    set.insert("abc".to_string());
    let previous = set.set_strategy(Filtered::new(CharFilter::default()));
    assert_eq!(previous.filter(), &LETTERS_UPPER);
    assert!(set.is_empty());
    set.insert("abc".to_string());
    assert!(!set.contains("ABC"));
}

#[test]
fn identity_containers_compare_addresses() {
    let a = Rc::new(1);
    let b = Rc::new(1);

    let mut map: IdentityMap<Rc<i32>, &str> = IdentityMap::new();
    map.insert(Rc::clone(&a), "a");
    map.insert(Rc::clone(&b), "b");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&a), Some(&"a"));
    assert_eq!(map.get(&Rc::new(1)), None);

    let mut ordered: IdentityOrderedSet<Rc<i32>> = IdentityOrderedSet::new();
    ordered.insert(Rc::clone(&b));
    ordered.insert(Rc::clone(&a));
    assert!(!ordered.insert(Rc::clone(&b)));
    assert!(Rc::ptr_eq(ordered.first().unwrap(), &b));
}

#[test]
fn scalar_zero_and_floats() {
    let mut map: ScalarMap<f64, &str> = ScalarMap::new();
    map.insert(0.0, "zero");
    map.insert(-0.0, "negative zero");
    map.insert(f64::NAN, "nan");
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(0.0), Some(&"zero"));
    assert_eq!(map.get(-0.0), Some(&"negative zero"));
    assert_eq!(map.get(f64::NAN), Some(&"nan"));
    assert_eq!(map.remove(0.0), Some("zero"));
    assert!(!map.has_zero_key());

    let set: ScalarSet<i8> = (-3..=3).collect();
    assert_eq!(set.len(), 7);
}

#[test]
fn ordered_scalar_containers() {
    let mut map: OrderedScalarMap<u64, char> = OrderedScalarMap::with_order(OrderType::Deque);
    map.insert(7, 'a');
    map.insert(0, 'b');
    map.insert(3, 'c');
    assert_eq!(map.insert_at(0, 3, 'C'), Ok(false));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 7, 0]);
    assert_eq!(map.remove_at(1), Ok((7, 'a')));
    assert_eq!(map.iter().map(|(_, v)| *v).collect::<String>(), "Cb");

    let mut set: OrderedScalarSet<char> = "hello".chars().collect();
    assert_eq!(set.iter().collect::<String>(), "helo");
    assert!(set.alter(&'l', 'L'));
    assert_eq!(set.iter().collect::<String>(), "heLo");
}

#[test]
fn map_and_set_hash_ignore_order() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    fn digest(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let a: HashMap<u32, u32> = (0..50).map(|k| (k, k * 2)).collect();
    let b: HashMap<u32, u32> = (0..50).rev().map(|k| (k, k * 2)).collect();
    assert_eq!(a, b);
    assert_eq!(digest(&a), digest(&b));

    let x: OrderedSet<u32> = (0..10).collect();
    let y: OrderedSet<u32> = (0..10).rev().collect();
    assert_eq!(x, y);
    assert_eq!(digest(&x), digest(&y));
}
