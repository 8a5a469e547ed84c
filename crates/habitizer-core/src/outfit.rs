//! Avatar outfits: a fixed catalog of cosmetics bought with coins.

use crate::error::Result;
use crate::player::PlayerState;
use crate::types::OutfitId;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitDefinition {
    pub id: OutfitId,
    pub cost: u64,
    pub display_name: &'static str,
    pub icon: &'static str,
}

const CATALOG: &[OutfitDefinition] = &[
    OutfitDefinition {
        id: OutfitId::Basic,
        cost: 0,
        display_name: "Basic",
        icon: "👤",
    },
    OutfitDefinition {
        id: OutfitId::Ninja,
        cost: 100,
        display_name: "Ninja",
        icon: "🥷",
    },
    OutfitDefinition {
        id: OutfitId::Wizard,
        cost: 150,
        display_name: "Wizard",
        icon: "🧙",
    },
    OutfitDefinition {
        id: OutfitId::Knight,
        cost: 200,
        display_name: "Knight",
        icon: "⚔️",
    },
    OutfitDefinition {
        id: OutfitId::Superhero,
        cost: 300,
        display_name: "Superhero",
        icon: "🦸",
    },
    OutfitDefinition {
        id: OutfitId::Royal,
        cost: 500,
        display_name: "Royal",
        icon: "👑",
    },
];

pub fn catalog() -> &'static [OutfitDefinition] {
    CATALOG
}

pub fn get(id: OutfitId) -> &'static OutfitDefinition {
    CATALOG
        .iter()
        .find(|o| o.id == id)
        .unwrap_or(&CATALOG[0])
}

/// Resolve a user-supplied outfit name to its catalog entry.
pub fn lookup(name: &str) -> Result<&'static OutfitDefinition> {
    let id: OutfitId = name.trim().to_ascii_lowercase().parse()?;
    Ok(get(id))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("not enough coins for {outfit}: costs {cost}, have {available}")]
    InsufficientFunds {
        outfit: OutfitId,
        cost: u64,
        available: u64,
    },

    #[error("outfit already unlocked: {0}")]
    AlreadyUnlocked(OutfitId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("outfit not unlocked: {0}")]
    NotUnlocked(OutfitId),
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Buy `outfit`. Owned outfits are rejected rather than re-charged, so coins
/// never move on a repeat purchase.
pub fn purchase(
    state: &PlayerState,
    outfit: &OutfitDefinition,
) -> std::result::Result<PlayerState, PurchaseError> {
    if state.owns(outfit.id) {
        return Err(PurchaseError::AlreadyUnlocked(outfit.id));
    }
    if state.coins < outfit.cost {
        return Err(PurchaseError::InsufficientFunds {
            outfit: outfit.id,
            cost: outfit.cost,
            available: state.coins,
        });
    }

    let mut next = state.clone();
    next.coins -= outfit.cost;
    next.unlocked_outfits.insert(outfit.id);
    tracing::info!(outfit = %outfit.id, cost = outfit.cost, coins = next.coins, "outfit purchased");
    Ok(next)
}

pub fn equip(state: &PlayerState, id: OutfitId) -> std::result::Result<PlayerState, EquipError> {
    if !state.owns(id) {
        return Err(EquipError::NotUnlocked(id));
    }
    let mut next = state.clone();
    next.current_outfit = id;
    tracing::debug!(outfit = %id, "outfit equipped");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Shop view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ShopEntry {
    #[serde(flatten)]
    pub outfit: &'static OutfitDefinition,
    pub unlocked: bool,
    pub equipped: bool,
    pub affordable: bool,
}

pub fn shop(state: &PlayerState) -> Vec<ShopEntry> {
    CATALOG
        .iter()
        .map(|outfit| ShopEntry {
            outfit,
            unlocked: state.owns(outfit.id),
            equipped: state.current_outfit == outfit.id,
            affordable: state.coins >= outfit.cost,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HabitError;

    #[test]
    fn catalog_covers_every_id() {
        for id in OutfitId::all() {
            assert_eq!(get(*id).id, *id);
        }
        assert_eq!(get(OutfitId::Basic).cost, 0);
        assert_eq!(get(OutfitId::Royal).cost, 500);
    }

    #[test]
    fn insufficient_funds_leaves_coins() {
        let state = PlayerState::new(50);
        let err = purchase(&state, get(OutfitId::Ninja)).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                outfit: OutfitId::Ninja,
                cost: 100,
                available: 50,
            }
        );
        assert_eq!(state.coins, 50);
    }

    #[test]
    fn exact_balance_buys_and_empties_wallet() {
        let state = PlayerState::new(150);
        let next = purchase(&state, get(OutfitId::Wizard)).unwrap();
        assert_eq!(next.coins, 0);
        assert!(next.owns(OutfitId::Wizard));
        assert_eq!(next.current_outfit, OutfitId::Basic);
    }

    #[test]
    fn repeat_purchase_never_charges() {
        let state = PlayerState::new(300);
        let owned = purchase(&state, get(OutfitId::Ninja)).unwrap();
        assert_eq!(owned.coins, 200);

        let err = purchase(&owned, get(OutfitId::Ninja)).unwrap_err();
        assert_eq!(err, PurchaseError::AlreadyUnlocked(OutfitId::Ninja));

        // The free default is owned from the start.
        let err = purchase(&owned, get(OutfitId::Basic)).unwrap_err();
        assert_eq!(err, PurchaseError::AlreadyUnlocked(OutfitId::Basic));
    }

    #[test]
    fn equip_requires_ownership() {
        let state = PlayerState::new(50);
        let err = equip(&state, OutfitId::Knight).unwrap_err();
        assert_eq!(err, EquipError::NotUnlocked(OutfitId::Knight));
        assert_eq!(state.current_outfit, OutfitId::Basic);
    }

    #[test]
    fn buy_then_equip() {
        let state = PlayerState::new(250);
        let state = purchase(&state, get(OutfitId::Knight)).unwrap();
        let state = equip(&state, OutfitId::Knight).unwrap();
        assert_eq!(state.current_outfit, OutfitId::Knight);
        assert!(state.is_consistent());

        let state = equip(&state, OutfitId::Basic).unwrap();
        assert_eq!(state.current_outfit, OutfitId::Basic);
    }

    #[test]
    fn shop_flags() {
        let state = PlayerState::new(120);
        let entries = shop(&state);
        let basic = &entries[0];
        assert!(basic.unlocked && basic.equipped && basic.affordable);
        let ninja = entries.iter().find(|e| e.outfit.id == OutfitId::Ninja).unwrap();
        assert!(!ninja.unlocked && ninja.affordable);
        let wizard = entries.iter().find(|e| e.outfit.id == OutfitId::Wizard).unwrap();
        assert!(!wizard.affordable);
    }

    #[test]
    fn lookup_accepts_mixed_case() {
        assert_eq!(lookup("Superhero").unwrap().id, OutfitId::Superhero);
        assert!(matches!(lookup("pirate"), Err(HabitError::UnknownOutfit(_))));
    }
}
