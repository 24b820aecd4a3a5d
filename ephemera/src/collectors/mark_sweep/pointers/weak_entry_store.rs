//! The association store behind weak maps and weak sets.
//!
//! Keys are compared by identity only. A removed entry is gone for good:
//! removal is the tombstone, and a later lookup cannot tell it apart from a
//! key that was never inserted.

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::classifier::weak_identity;
use crate::error::TypeErrorKind;
use crate::value::{Identity, Value};

#[derive(Debug)]
pub(crate) struct WeakEntryStore<V> {
    entries: HashMap<Identity, V, FxBuildHasher>,
}

impl<V> Default for WeakEntryStore<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::with_hasher(FxBuildHasher),
        }
    }
}

impl<V> WeakEntryStore<V> {
    // insert or overwrite; the key must pass the classifier
    pub(crate) fn set(&mut self, key: &Value, value: V) -> Result<(), TypeErrorKind> {
        let key = weak_identity(key).ok_or(TypeErrorKind::InvalidWeakKey)?;
        self.entries.insert(key, value);
        Ok(())
    }

    // rejected keys are simply absent
    pub(crate) fn get(&self, key: &Value) -> Option<&V> {
        self.entries.get(&weak_identity(key)?)
    }

    pub(crate) fn has(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn delete(&mut self, key: &Value) -> bool {
        match weak_identity(key) {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = Identity> + '_ {
        self.entries.keys().copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Identity, &V)> {
        self.entries.iter()
    }

    // drop every entry whose key the collector found dead
    pub(crate) fn prune(&mut self, is_dead: impl Fn(&Identity) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !is_dead(key));
        before - self.entries.len()
    }
}
