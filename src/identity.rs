//! Global key to arena slot registry.

use crate::model::GlobalKey;
use ahash::AHashMap;

/// Maps every registered [`GlobalKey`] to its slot in the owning package's node arena.
///
/// Registration does not check for duplicates; a later registration of the same key
/// replaces the earlier slot.
#[derive(Debug, Default, Clone)]
pub struct IdentityRegistry {
    slots: AHashMap<GlobalKey, usize>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: GlobalKey, slot: usize) {
        self.slots.insert(key, slot);
    }

    pub fn get(&self, key: &GlobalKey) -> Option<usize> {
        self.slots.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append another registry's entries.
    pub fn merge(&mut self, other: Self) {
        self.slots.extend(other.slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_register_and_merge() {
        let mut core = IdentityRegistry::new();
        core.register(GlobalKey::new("core", 0), 0);
        core.register(GlobalKey::new("core", 7), 1);

        let mut plugins = IdentityRegistry::new();
        plugins.register(GlobalKey::new("plugins", 7), 3);

        core.merge(plugins);
        check!(core.len() == 3);
        check!(core.get(&GlobalKey::new("core", 7)) == Some(1));
        check!(core.get(&GlobalKey::new("plugins", 7)) == Some(3));
        check!(core.get(&GlobalKey::new("plugins", 0)).is_none());
    }
}
