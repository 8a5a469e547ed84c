//! The player's progression record and its on-disk form.

use crate::achievement::AchievementId;
use crate::error::{HabitError, Result};
use crate::paths;
use crate::types::OutfitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// XP needed to clear `level`.
pub fn xp_threshold(level: u32) -> u64 {
    u64::from(level) * 100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub level: u32,
    /// Progress inside the current level; always below `xp_to_next_level`.
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub total_xp: u64,
    pub coins: u64,
    pub unlocked_outfits: BTreeSet<OutfitId>,
    pub current_outfit: OutfitId,
    /// Reward-catalog completions over the player's lifetime.
    #[serde(default)]
    pub habits_completed: u64,
    #[serde(default)]
    pub achievements: BTreeSet<AchievementId>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PlayerState {
    pub fn new(starting_coins: u64) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next_level: xp_threshold(1),
            total_xp: 0,
            coins: starting_coins,
            unlocked_outfits: BTreeSet::from([OutfitId::Basic]),
            current_outfit: OutfitId::Basic,
            habits_completed: 0,
            achievements: BTreeSet::new(),
        }
    }

    pub fn owns(&self, outfit: OutfitId) -> bool {
        self.unlocked_outfits.contains(&outfit)
    }

    /// Progress through the current level, 0..100.
    pub fn xp_percentage(&self) -> f64 {
        if self.xp_to_next_level == 0 {
            return 0.0;
        }
        self.xp as f64 / self.xp_to_next_level as f64 * 100.0
    }

    /// True when every structural invariant holds. Used after loading
    /// hand-edited files and in tests.
    pub fn is_consistent(&self) -> bool {
        self.level >= 1
            && self.xp_to_next_level == xp_threshold(self.level)
            && self.xp < self.xp_to_next_level
            && self.unlocked_outfits.contains(&OutfitId::Basic)
            && self.unlocked_outfits.contains(&self.current_outfit)
    }

    /// Pull a hand-edited state back inside the invariants: overflowing xp
    /// rolls into levels, the threshold follows the level, and the basic
    /// outfit is always owned and worn if the equipped one is not.
    /// Returns true when something changed.
    pub fn normalize(&mut self) -> bool {
        let before = self.clone();
        self.level = self.level.max(1);
        self.xp_to_next_level = xp_threshold(self.level);
        crate::progression::apply_xp(self, 0);
        self.unlocked_outfits.insert(OutfitId::Basic);
        if !self.owns(self.current_outfit) {
            self.current_outfit = OutfitId::Basic;
        }
        *self != before
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::player_path(root);
        if !path.exists() {
            return Err(HabitError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let mut player: PlayerState = serde_yaml::from_str(&data)?;
        if !player.is_consistent() {
            tracing::warn!(
                level = player.level,
                xp = player.xp,
                "player.yaml violates progression invariants; normalizing"
            );
            player.normalize();
        }
        Ok(player)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::player_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
