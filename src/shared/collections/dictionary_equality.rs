use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};

/// Returns `true` when both maps hold the same keys mapped to equal values.
pub fn dictionaries_equal<K, V, S>(left: &HashMap<K, V, S>, right: &HashMap<K, V, S>) -> bool
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    dictionaries_equal_by(left, right, |a, b| a == b)
}

/// Same as [`dictionaries_equal`] with a caller-supplied value comparison.
fn dictionaries_equal_by<K, V, S, F>(
    left: &HashMap<K, V, S>,
    right: &HashMap<K, V, S>,
    mut value_eq: F,
) -> bool
where
    K: Eq + Hash,
    S: BuildHasher,
    F: FnMut(&V, &V) -> bool,
{
    if std::ptr::eq(left, right) {
        return true;
    }

    if left.len() != right.len() {
        return false;
    }

    left.iter().all(|(key, value)| match right.get(key) {
        Some(other) => value_eq(value, other),
        None => false,
    })
}

/// Order-independent hash of a map, consistent with [`dictionaries_equal`].
pub fn dictionary_hash<K, V, S>(map: &HashMap<K, V, S>) -> u64
where
    K: Hash,
    V: Hash,
{
    // XOR of per-entry hashes does not depend on iteration order
    map.iter().fold(map.len() as u64, |acc, (key, value)| {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        value.hash(&mut hasher);
        acc ^ hasher.finish()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_equal_maps() {
        let a = map(&[("TargetFramework", "net8.0"), ("OutputType", "Exe")]);
        let b = map(&[("OutputType", "Exe"), ("TargetFramework", "net8.0")]);
        assert!(dictionaries_equal(&a, &b));
        assert_eq!(dictionary_hash(&a), dictionary_hash(&b));
    }

    #[test]
    fn test_different_value() {
        let a = map(&[("TargetFramework", "net8.0")]);
        let b = map(&[("TargetFramework", "net6.0")]);
        assert!(!dictionaries_equal(&a, &b));
    }

    #[test]
    fn test_different_keys_same_length() {
        let a = map(&[("A", "1")]);
        let b = map(&[("B", "1")]);
        assert!(!dictionaries_equal(&a, &b));
    }

    #[test]
    fn test_different_length() {
        let a = map(&[("A", "1"), ("B", "2")]);
        let b = map(&[("A", "1")]);
        assert!(!dictionaries_equal(&a, &b));
        assert!(!dictionaries_equal(&b, &a));
    }

    #[test]
    fn test_custom_value_comparer() {
        let a = map(&[("Nullable", "Enable")]);
        let b = map(&[("Nullable", "enable")]);
        assert!(!dictionaries_equal(&a, &b));
        assert!(dictionaries_equal_by(&a, &b, |x, y| x.eq_ignore_ascii_case(y)));
    }

    #[test]
    fn test_empty_maps_are_equal() {
        let a: HashMap<String, String> = HashMap::new();
        let b: HashMap<String, String> = HashMap::new();
        assert!(dictionaries_equal(&a, &b));
    }
}
