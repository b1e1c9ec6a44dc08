//! Which gids block movement.

use std::collections::HashSet;

/// Gids that stop the avatar. Owned by whoever decides collision rules; the
/// avatar only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedSet(HashSet<u32>);

/// Water, lake, wall, tree, house, rock, lava.
pub const DEFAULT_BLOCKED: [u32; 7] = [4, 5, 6, 7, 8, 9, 10];
/// Grass, road, tile floor.
pub const DEFAULT_WALKABLE: [u32; 3] = [1, 2, 3];

impl BlockedSet {
    /// Empty set: everything is passable.
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    /// The stock terrain rules ([`DEFAULT_BLOCKED`]).
    pub fn default_rules() -> Self {
        DEFAULT_BLOCKED.into_iter().collect()
    }

    /// Whether `gid` blocks movement.
    #[inline]
    pub fn contains(&self, gid: u32) -> bool {
        self.0.contains(&gid)
    }

    /// Mark `gid` as blocking.
    pub fn insert(&mut self, gid: u32) -> bool {
        self.0.insert(gid)
    }

    /// Number of blocking gids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashSet<u32>> for BlockedSet {
    fn from(set: HashSet<u32>) -> Self {
        Self(set)
    }
}

impl FromIterator<u32> for BlockedSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The stock walkable terrain ([`DEFAULT_WALKABLE`]), used to pick a spawn.
pub fn default_walkable() -> HashSet<u32> {
    DEFAULT_WALKABLE.into_iter().collect()
}
