use crate::error::{HabitError, Result};
use serde::{Deserialize, Serialize};

/// A reward habit: completing it once per day pays out XP and coins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDefinition {
    pub name: String,
    pub xp_reward: u64,
    pub coin_reward: u64,
}

impl HabitDefinition {
    pub fn new(name: impl Into<String>, xp_reward: u64, coin_reward: u64) -> Self {
        Self {
            name: name.into(),
            xp_reward,
            coin_reward,
        }
    }
}

const BUILTIN: &[(&str, u64, u64)] = &[
    ("Morning Exercise", 25, 10),
    ("Meditate", 30, 12),
    ("No Social Media (1hr)", 35, 15),
    ("Read 10 Pages", 40, 20),
    ("Drink Water (8 Glasses)", 25, 10),
    ("Muththi-4", 30, 40),
    ("Green Veggies", 20, 10),
    ("Milk - 1 Glass", 20, 10),
    ("Sleep Early", 30, 15),
    ("Plan Tomorrow", 20, 10),
];

/// The built-in daily reward habits, in display order.
pub fn catalog() -> Vec<HabitDefinition> {
    BUILTIN
        .iter()
        .map(|(name, xp, coins)| HabitDefinition::new(*name, *xp, *coins))
        .collect()
}

/// Look up a reward habit by name (case-insensitive).
pub fn find(name: &str) -> Result<HabitDefinition> {
    let wanted = name.trim();
    catalog()
        .into_iter()
        .find(|h| h.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| HabitError::UnknownRewardHabit(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_rewards_positive() {
        let all = catalog();
        assert_eq!(all.len(), 10);
        let names: HashSet<&str> = all.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names.len(), all.len());
        assert!(all.iter().all(|h| h.xp_reward > 0 && h.coin_reward > 0));
    }

    #[test]
    fn find_ignores_case() {
        let h = find("read 10 pages").unwrap();
        assert_eq!(h.name, "Read 10 Pages");
        assert_eq!(h.xp_reward, 40);
        assert_eq!(h.coin_reward, 20);
    }

    #[test]
    fn find_unknown() {
        assert!(matches!(
            find("Juggle"),
            Err(HabitError::UnknownRewardHabit(_))
        ));
    }
}
