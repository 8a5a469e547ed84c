//! Achievements: one-off milestones that pay a bonus of XP when first met.

use crate::player::PlayerState;
use crate::progression::apply_xp;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_habit")]
    FirstHabit,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "outfit_collector")]
    OutfitCollector,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstHabit => "first_habit",
            AchievementId::Streak7 => "streak_7",
            AchievementId::Level5 => "level_5",
            AchievementId::OutfitCollector => "outfit_collector",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub xp_reward: u64,
}

const CATALOG: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: AchievementId::FirstHabit,
        name: "First Steps",
        description: "Complete your first habit",
        xp_reward: 50,
    },
    AchievementDefinition {
        id: AchievementId::Streak7,
        name: "Week Warrior",
        description: "7-day streak",
        xp_reward: 100,
    },
    AchievementDefinition {
        id: AchievementId::Level5,
        name: "Rising Star",
        description: "Reach level 5",
        xp_reward: 150,
    },
    AchievementDefinition {
        id: AchievementId::OutfitCollector,
        name: "Style Master",
        description: "Unlock 3 outfits",
        xp_reward: 200,
    },
];

pub const STREAK_TARGET: u32 = 7;
pub const LEVEL_TARGET: u32 = 5;
pub const OUTFIT_TARGET: usize = 3;

pub fn catalog() -> &'static [AchievementDefinition] {
    CATALOG
}

pub fn get(id: AchievementId) -> &'static AchievementDefinition {
    CATALOG
        .iter()
        .find(|a| a.id == id)
        .unwrap_or(&CATALOG[0])
}

/// Progress that lives outside [`PlayerState`]: the user's own habit list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Milestones {
    /// Check-offs of user habits, summed over the list.
    pub habit_checkoffs: u64,
    /// Longest current streak of any user habit.
    pub best_streak: u32,
}

/// Whether the condition behind `id` holds right now. Earned achievements
/// stay earned even if the condition later lapses.
pub fn is_met(id: AchievementId, state: &PlayerState, milestones: Milestones) -> bool {
    match id {
        AchievementId::FirstHabit => state.habits_completed + milestones.habit_checkoffs >= 1,
        AchievementId::Streak7 => milestones.best_streak >= STREAK_TARGET,
        AchievementId::Level5 => state.level >= LEVEL_TARGET,
        AchievementId::OutfitCollector => state.unlocked_outfits.len() >= OUTFIT_TARGET,
    }
}

/// Grant every achievement whose condition is met and that the player does
/// not hold yet, paying its XP. Bonus XP can itself cross the level target,
/// so this runs until nothing new is earned.
pub fn award(state: &PlayerState, milestones: Milestones) -> (PlayerState, Vec<AchievementId>) {
    let mut next = state.clone();
    let mut earned = Vec::new();

    while let Some(def) = CATALOG
        .iter()
        .find(|a| !next.achievements.contains(&a.id) && is_met(a.id, &next, milestones))
    {
        next.achievements.insert(def.id);
        apply_xp(&mut next, def.xp_reward);
        earned.push(def.id);
        tracing::info!(achievement = %def.id, xp = def.xp_reward, "achievement earned");
    }

    (next, earned)
}

/// Catalog view with the player's status for each entry.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementEntry {
    #[serde(flatten)]
    pub achievement: &'static AchievementDefinition,
    pub earned: bool,
}

pub fn board(state: &PlayerState) -> Vec<AchievementEntry> {
    CATALOG
        .iter()
        .map(|achievement| AchievementEntry {
            achievement,
            earned: state.achievements.contains(&achievement.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutfitId;

    #[test]
    fn fresh_player_has_nothing_to_earn() {
        let (next, earned) = award(&PlayerState::new(50), Milestones::default());
        assert!(earned.is_empty());
        assert_eq!(next, PlayerState::new(50));
    }

    #[test]
    fn first_reward_completion_earns_first_steps() {
        let mut p = PlayerState::new(50);
        p.habits_completed = 1;
        let (next, earned) = award(&p, Milestones::default());
        assert_eq!(earned, vec![AchievementId::FirstHabit]);
        assert_eq!(next.xp, 50);
        assert_eq!(next.total_xp, 50);
        assert_eq!(next.coins, 50);
    }

    #[test]
    fn user_habit_checkoff_also_counts() {
        let milestones = Milestones {
            habit_checkoffs: 1,
            best_streak: 1,
        };
        let (_, earned) = award(&PlayerState::new(0), milestones);
        assert_eq!(earned, vec![AchievementId::FirstHabit]);
    }

    #[test]
    fn earned_once_only() {
        let mut p = PlayerState::new(0);
        p.habits_completed = 3;
        let (once, _) = award(&p, Milestones::default());
        let (twice, earned) = award(&once, Milestones::default());
        assert!(earned.is_empty());
        assert_eq!(twice, once);
    }

    #[test]
    fn week_streak_earns_week_warrior() {
        let milestones = Milestones {
            habit_checkoffs: 7,
            best_streak: STREAK_TARGET,
        };
        let (next, earned) = award(&PlayerState::new(0), milestones);
        assert_eq!(earned, vec![AchievementId::FirstHabit, AchievementId::Streak7]);
        // 50 + 100 = 150 XP: level 2 with 50 carried over.
        assert_eq!(next.level, 2);
        assert_eq!(next.xp, 50);
    }

    #[test]
    fn three_outfits_earn_style_master() {
        let mut p = PlayerState::new(0);
        p.unlocked_outfits.insert(OutfitId::Ninja);
        assert!(!is_met(AchievementId::OutfitCollector, &p, Milestones::default()));
        p.unlocked_outfits.insert(OutfitId::Wizard);
        let (next, earned) = award(&p, Milestones::default());
        assert_eq!(earned, vec![AchievementId::OutfitCollector]);
        assert_eq!(next.total_xp, 200);
    }

    #[test]
    fn bonus_xp_can_unlock_rising_star() {
        // Level 4 needs 400 XP; 250 in hand plus 200 from Style Master
        // crosses into level 5, which earns Rising Star in the same pass.
        let mut p = PlayerState::new(0);
        p.level = 4;
        p.xp_to_next_level = 400;
        p.xp = 250;
        p.unlocked_outfits.insert(OutfitId::Ninja);
        p.unlocked_outfits.insert(OutfitId::Knight);

        let (next, earned) = award(&p, Milestones::default());
        assert_eq!(
            earned,
            vec![AchievementId::OutfitCollector, AchievementId::Level5]
        );
        assert_eq!(next.level, 5);
        assert_eq!(next.xp, 200);
        assert!(next.is_consistent());
    }

    #[test]
    fn board_marks_earned_entries() {
        let mut p = PlayerState::new(0);
        p.achievements.insert(AchievementId::Level5);
        let board = board(&p);
        assert_eq!(board.len(), 4);
        assert!(board.iter().any(|e| e.achievement.id == AchievementId::Level5 && e.earned));
        assert_eq!(board.iter().filter(|e| e.earned).count(), 1);
    }

    #[test]
    fn ids_serialize_as_catalog_keys() {
        let json = serde_json::to_string(&AchievementId::Streak7).unwrap();
        assert_eq!(json, r#""streak_7""#);
        assert_eq!(get(AchievementId::OutfitCollector).name, "Style Master");
    }
}
