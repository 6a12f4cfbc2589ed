//! Family invalidation for QueryCache

use super::{QueryCache, ResourceFamily};

impl QueryCache {
    /// Mark every entry of `family` invalidated and bump its epoch.
    ///
    /// Fetches already running for the family complete into invalidated
    /// entries, so a read after the mutation never settles on pre-mutation
    /// data. Returns the number of entries marked.
    pub(crate) fn invalidate(&mut self, family: ResourceFamily) -> usize {
        *self.epochs.entry(family).or_insert(0) += 1;

        let Some(keys) = self.families.get(&family) else {
            return 0;
        };

        let mut marked = 0;
        for key in keys {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.invalidated = true;
                marked += 1;
            }
        }
        marked
    }
}
