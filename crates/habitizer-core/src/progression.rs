//! Progression engine: turns a reward-habit completion into XP, levels and
//! coins, gated to once per habit per calendar day.
//!
//! Transitions are pure. They take the current [`PlayerState`] and
//! [`CompletionLedger`] by reference and hand back new values, so callers
//! decide when (and whether) to persist.

use crate::catalog::HabitDefinition;
use crate::ledger::CompletionLedger;
use crate::player::{xp_threshold, PlayerState};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The habit was already completed today; nothing changed.
    AlreadyCompleted,
    Completed {
        xp_gained: u64,
        coins_gained: u64,
        levels_gained: u32,
        new_level: u32,
    },
}

impl CompletionOutcome {
    pub fn leveled_up(&self) -> bool {
        matches!(self, CompletionOutcome::Completed { levels_gained, .. } if *levels_gained > 0)
    }
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub state: PlayerState,
    pub ledger: CompletionLedger,
    pub outcome: CompletionOutcome,
}

pub fn is_completed_today(ledger: &CompletionLedger, name: &str, today: NaiveDate) -> bool {
    ledger.is_completed_on(name, today)
}

/// Add `xp` to the player, rolling every overflow into a level-up.
///
/// Returns the number of levels gained. A single large reward can clear
/// several thresholds; each one is consumed in turn.
pub fn apply_xp(state: &mut PlayerState, xp: u64) -> u32 {
    state.xp += xp;
    state.total_xp += xp;

    let mut levels = 0;
    while state.xp >= state.xp_to_next_level {
        state.xp -= state.xp_to_next_level;
        state.level += 1;
        state.xp_to_next_level = xp_threshold(state.level);
        levels += 1;
    }
    levels
}

pub fn complete_habit(
    state: &PlayerState,
    ledger: &CompletionLedger,
    habit: &HabitDefinition,
    today: NaiveDate,
) -> Completion {
    if is_completed_today(ledger, &habit.name, today) {
        tracing::debug!(habit = %habit.name, %today, "habit already completed today");
        return Completion {
            state: state.clone(),
            ledger: ledger.clone(),
            outcome: CompletionOutcome::AlreadyCompleted,
        };
    }

    let mut next = state.clone();
    let levels_gained = apply_xp(&mut next, habit.xp_reward);
    next.coins += habit.coin_reward;
    next.habits_completed += 1;

    let mut next_ledger = ledger.clone();
    next_ledger.record(&habit.name, today);

    if levels_gained > 0 {
        tracing::info!(habit = %habit.name, level = next.level, levels_gained, "level up");
    } else {
        tracing::debug!(habit = %habit.name, xp = next.xp, coins = next.coins, "habit completed");
    }

    Completion {
        outcome: CompletionOutcome::Completed {
            xp_gained: habit.xp_reward,
            coins_gained: habit.coin_reward,
            levels_gained,
            new_level: next.level,
        },
        state: next,
        ledger: next_ledger,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_date;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn assert_invariants(p: &PlayerState) {
        assert!(p.xp < p.xp_to_next_level, "xp {} >= {}", p.xp, p.xp_to_next_level);
        assert_eq!(p.xp_to_next_level, u64::from(p.level) * 100);
    }

    #[test]
    fn second_completion_same_day_is_noop() {
        let state = PlayerState::new(50);
        let ledger = CompletionLedger::new();
        let habit = HabitDefinition::new("Meditate", 30, 12);
        let today = day("2024-05-01");

        let first = complete_habit(&state, &ledger, &habit, today);
        assert!(matches!(first.outcome, CompletionOutcome::Completed { .. }));
        assert_eq!(first.state.coins, 62);

        let second = complete_habit(&first.state, &first.ledger, &habit, today);
        assert_eq!(second.outcome, CompletionOutcome::AlreadyCompleted);
        assert_eq!(second.state, first.state);
        assert_eq!(second.state.habits_completed, 1);
        assert_eq!(second.ledger, first.ledger);

        let third = complete_habit(&second.state, &second.ledger, &habit, today);
        assert_eq!(third.outcome, CompletionOutcome::AlreadyCompleted);
        assert_eq!(third.state, first.state);
    }

    #[test]
    fn next_day_completes_again() {
        let habit = HabitDefinition::new("Meditate", 30, 12);
        let a = complete_habit(
            &PlayerState::new(0),
            &CompletionLedger::new(),
            &habit,
            day("2024-05-01"),
        );
        let b = complete_habit(&a.state, &a.ledger, &habit, day("2024-05-02"));
        assert!(matches!(b.outcome, CompletionOutcome::Completed { .. }));
        assert_eq!(b.state.total_xp, 60);
        assert_eq!(b.state.habits_completed, 2);
        assert_eq!(b.ledger.last_completed("Meditate"), Some(day("2024-05-02")));
    }

    #[test]
    fn other_habits_are_independent() {
        let today = day("2024-05-01");
        let a = complete_habit(
            &PlayerState::new(0),
            &CompletionLedger::new(),
            &HabitDefinition::new("Meditate", 30, 12),
            today,
        );
        let b = complete_habit(
            &a.state,
            &a.ledger,
            &HabitDefinition::new("Sleep Early", 30, 15),
            today,
        );
        assert!(matches!(b.outcome, CompletionOutcome::Completed { .. }));
        assert_eq!(b.state.coins, 27);
    }

    #[test]
    fn level_up_carries_remainder() {
        // 80 XP, then 30 XP the next day: 110 total crosses the 100 mark.
        let state = PlayerState::new(0);
        let ledger = CompletionLedger::new();
        let big = HabitDefinition::new("Long Run", 80, 10);
        let small = HabitDefinition::new("Stretch", 30, 5);

        let a = complete_habit(&state, &ledger, &big, day("2024-05-01"));
        assert_eq!(a.state.level, 1);
        assert_eq!(a.state.xp, 80);
        assert!(!a.outcome.leveled_up());

        let b = complete_habit(&a.state, &a.ledger, &small, day("2024-05-02"));
        assert_eq!(b.state.level, 2);
        assert_eq!(b.state.xp, 10);
        assert_eq!(b.state.xp_to_next_level, 200);
        assert_eq!(b.state.total_xp, 110);
        assert!(b.outcome.leveled_up());
        assert_invariants(&b.state);
    }

    #[test]
    fn large_reward_levels_up_repeatedly() {
        // 100 (L1) + 200 (L2) + 300 (L3) = 600; 650 lands at L4 with 50 left.
        let c = complete_habit(
            &PlayerState::new(0),
            &CompletionLedger::new(),
            &HabitDefinition::new("Marathon", 650, 1),
            day("2024-05-01"),
        );
        assert_eq!(c.state.level, 4);
        assert_eq!(c.state.xp, 50);
        assert_eq!(c.state.xp_to_next_level, 400);
        assert_eq!(
            c.outcome,
            CompletionOutcome::Completed {
                xp_gained: 650,
                coins_gained: 1,
                levels_gained: 3,
                new_level: 4,
            }
        );
        assert_invariants(&c.state);
    }

    #[test]
    fn exact_threshold_levels_up_with_zero_xp() {
        let c = complete_habit(
            &PlayerState::new(0),
            &CompletionLedger::new(),
            &HabitDefinition::new("Century", 100, 1),
            day("2024-05-01"),
        );
        assert_eq!(c.state.level, 2);
        assert_eq!(c.state.xp, 0);
    }

    #[test]
    fn invariants_hold_over_a_month_of_catalog_habits() {
        let mut state = PlayerState::new(50);
        let mut ledger = CompletionLedger::new();
        let mut total = 0;
        let start = day("2024-01-01");
        for offset in 0..30 {
            let today = start + chrono::Duration::days(offset);
            for habit in crate::catalog::catalog() {
                let c = complete_habit(&state, &ledger, &habit, today);
                total += habit.xp_reward;
                state = c.state;
                ledger = c.ledger;
                assert_invariants(&state);
            }
        }
        assert_eq!(state.total_xp, total);
    }

    #[test]
    fn input_state_is_untouched() {
        let state = PlayerState::new(50);
        let ledger = CompletionLedger::new();
        let _ = complete_habit(
            &state,
            &ledger,
            &HabitDefinition::new("Meditate", 30, 12),
            day("2024-05-01"),
        );
        assert_eq!(state, PlayerState::new(50));
        assert!(ledger.is_empty());
    }
}
