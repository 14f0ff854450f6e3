use serde::{Deserialize, Serialize};

use crate::{GrenadeSpec, WeaponId};

/// Item that can lie in the arena and be collected by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickupKind {
    /// Restores health.
    Health {
        /// Health restored.
        amount: f32,
        /// Allows health above the maximum.
        #[serde(default)]
        overheal: bool,
    },
    /// Restores armour, clamped to the maximum.
    Armour {
        /// Armour restored.
        amount: f32,
    },
    /// Adds one clip worth of rounds to the secondary reserve.
    SecondaryAmmo,
    /// Adds grenades, clamped to the maximum.
    GrenadeAmmo {
        /// Grenades added.
        amount: u32,
    },
    /// Switches the thrown grenade and adds a bonus.
    GrenadeType {
        /// Grenade thrown from now on.
        grenade: GrenadeSpec,
        /// Grenades added on top of the switch.
        bonus: u32,
    },
    /// Equips a secondary weapon, or adds reserve if already equipped.
    SecondaryWeapon {
        /// Weapon to equip.
        weapon: WeaponId,
        /// Reserve granted with the weapon.
        reserve: u32,
    },
    /// Replaces the primary weapon.
    PrimaryWeapon {
        /// Weapon to equip.
        weapon: WeaponId,
    },
    /// Replaces the melee weapon.
    MeleeWeapon {
        /// Weapon to equip.
        weapon: WeaponId,
    },
}
