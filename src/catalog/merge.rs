use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Lays `overlay` over `base` by key.
///
/// Overlay entries replace base entries with the same key in place; new keys
/// are appended in overlay order. Keys in `tombstones` are dropped from the
/// result whichever side they came from.
pub fn overlay_merge<K, V>(
    base: impl IntoIterator<Item = (K, V)>,
    overlay: impl IntoIterator<Item = (K, V)>,
    tombstones: &HashSet<K>,
) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
{
    let mut merged: Vec<(K, V)> = Vec::new();
    let mut slots: HashMap<K, usize> = HashMap::new();

    for (key, value) in base.into_iter().chain(overlay) {
        match slots.get(&key) {
            Some(&slot) => merged[slot].1 = value,
            None => {
                slots.insert(key.clone(), merged.len());
                merged.push((key, value));
            }
        }
    }

    merged.retain(|(key, _)| !tombstones.contains(key));
    merged
}
