//! Ordered storage for the volumes of a level

use crate::physics::volume::{Volume, VolumeKey};
use slotmap::SlotMap;

/// Volumes keyed by generational keys, iterated in load order
///
/// Load order matters: when two volumes both qualify as support in the same
/// step, the one loaded first wins. Keys of removed volumes are never
/// reused for new ones.
#[derive(Debug, Clone, Default)]
pub struct VolumeSet {
    volumes: SlotMap<VolumeKey, Volume>,
    order: Vec<VolumeKey>,
}

impl VolumeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a volume at the end of the list
    pub fn insert(&mut self, volume: Volume) -> VolumeKey {
        let key = self.volumes.insert(volume);
        self.order.push(key);
        key
    }

    /// Remove one volume, keeping the order of the rest
    pub fn remove(&mut self, key: VolumeKey) -> Option<Volume> {
        let volume = self.volumes.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(volume)
    }

    /// Look up a volume
    pub fn get(&self, key: VolumeKey) -> Option<&Volume> {
        self.volumes.get(key)
    }

    /// True if the key refers to a live volume
    pub fn contains(&self, key: VolumeKey) -> bool {
        self.volumes.contains_key(key)
    }

    /// Volumes in load order
    pub fn iter(&self) -> impl Iterator<Item = (VolumeKey, &Volume)> + '_ {
        self.order
            .iter()
            .filter_map(move |&key| self.volumes.get(key).map(|volume| (key, volume)))
    }

    /// Mutable access to every volume (order irrelevant)
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Volume> + '_ {
        self.volumes.values_mut()
    }

    /// Number of volumes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if there are no volumes
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every volume
    pub fn clear(&mut self) {
        self.volumes.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn platform(x: f32) -> Volume {
        Volume::new_static(Vec3::new(x, 0.0, 0.0), Vec3::repeat(0.5))
    }

    #[test]
    fn test_iterates_in_insertion_order() {
        let mut set = VolumeSet::new();
        let keys: Vec<_> = (0..5).map(|i| set.insert(platform(i as f32))).collect();
        let iterated: Vec<_> = set.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, iterated);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_cleared_keys_do_not_alias_new_volumes() {
        let mut set = VolumeSet::new();
        let old = set.insert(platform(0.0));
        set.clear();
        assert!(set.is_empty());

        let new = set.insert(platform(1.0));
        assert_ne!(old, new);
        assert!(!set.contains(old));
        assert!(set.get(old).is_none());
        assert!(set.contains(new));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut set = VolumeSet::new();
        let keys: Vec<_> = (0..4).map(|i| set.insert(platform(i as f32))).collect();

        assert!(set.remove(keys[1]).is_some());
        assert!(set.remove(keys[1]).is_none());

        let remaining: Vec<_> = set.iter().map(|(key, _)| key).collect();
        assert_eq!(remaining, vec![keys[0], keys[2], keys[3]]);
        assert_eq!(set.len(), 3);
    }
}
