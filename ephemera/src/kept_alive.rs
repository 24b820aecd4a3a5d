//! Targets held strongly until the end of the current job.

use hashbrown::HashSet;
use rustc_hash::FxBuildHasher;

use crate::value::Identity;

/// Identities observed through a weak reference during the current job.
///
/// Everything in the set is a collection root. The agent empties it at each
/// job boundary, so a target that was just created or dereferenced stays
/// available to the rest of the job.
#[derive(Debug, Default)]
pub struct KeptAliveSet {
    targets: HashSet<Identity, FxBuildHasher>,
}

impl KeptAliveSet {
    pub(crate) fn add(&mut self, target: Identity) {
        self.targets.insert(target);
    }

    pub(crate) fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn contains(&self, target: Identity) -> bool {
        self.targets.contains(&target)
    }

    pub fn iter(&self) -> impl Iterator<Item = Identity> + '_ {
        self.targets.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
