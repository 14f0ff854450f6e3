use std::time::Duration;

use zenith_core::{
    ActionError, AmmoSnapshot, AmmoState, Event, MeleeStats, MuzzleTuning, ProjectileSpec, Reserve,
    WeaponDefinition, WeaponId,
};

use crate::config::{ConfigError, WorldConfig};

/// Equipped ranged weapon with its ammunition and fire cooldown.
#[derive(Clone, Debug)]
struct Slot {
    definition: WeaponDefinition,
    ammo: AmmoState,
    ready_at: Duration,
}

impl Slot {
    fn new(definition: &WeaponDefinition, reserve: Reserve) -> Self {
        Self {
            ammo: AmmoState::full(definition, reserve),
            definition: definition.clone(),
            ready_at: Duration::ZERO,
        }
    }
}

/// Parameters of a shot that passed every precondition.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Shot {
    pub(crate) weapon: WeaponId,
    pub(crate) projectile: ProjectileSpec,
    pub(crate) muzzle: MuzzleTuning,
}

/// Weapons carried by the player.
#[derive(Clone, Debug)]
pub(crate) struct Arsenal {
    primary: Slot,
    secondary: Option<Slot>,
    using_primary: bool,
    melee: Option<(WeaponId, MeleeStats)>,
    selection_locked: bool,
}

impl Arsenal {
    pub(crate) fn from_loadout(config: &WorldConfig) -> Result<Self, ConfigError> {
        let loadout = &config.loadout;
        let lookup = |id: WeaponId| config.weapon(id).ok_or(ConfigError::UnknownWeapon(id));

        let primary = Slot::new(lookup(loadout.primary)?, Reserve::Infinite);
        let secondary = match loadout.secondary {
            Some(id) => Some(Slot::new(
                lookup(id)?,
                Reserve::Finite(loadout.secondary_reserve),
            )),
            None => None,
        };
        let melee = match loadout.melee {
            Some(id) => {
                let definition = lookup(id)?;
                let stats = definition.melee.ok_or(ConfigError::NotMelee(id))?;
                Some((id, stats))
            }
            None => None,
        };

        Ok(Self {
            primary,
            secondary,
            using_primary: true,
            melee,
            selection_locked: loadout.selection_locked,
        })
    }

    fn active_mut(&mut self) -> &mut Slot {
        match (&mut self.secondary, self.using_primary) {
            (Some(secondary), false) => secondary,
            _ => &mut self.primary,
        }
    }

    pub(crate) fn fire(&mut self, clock: Duration) -> Result<Shot, ActionError> {
        let slot = self.active_mut();
        let stats = slot.definition.ranged.ok_or(ActionError::NotRanged)?;
        if slot.ammo.is_reloading() {
            return Err(ActionError::Reloading);
        }
        if clock < slot.ready_at {
            return Err(ActionError::OnCooldown);
        }
        slot.ammo.consume_round()?;
        slot.ready_at = clock + stats.fire_interval;
        Ok(Shot {
            weapon: slot.definition.id,
            projectile: stats.projectile,
            muzzle: slot.definition.muzzle,
        })
    }

    pub(crate) fn reload(&mut self) -> Result<WeaponId, ActionError> {
        let slot = self.active_mut();
        if slot.definition.ranged.is_none() {
            return Err(ActionError::NotRanged);
        }
        slot.ammo.begin_reload()?;
        Ok(slot.definition.id)
    }

    /// Toggles between the primary and secondary slot.
    ///
    /// A reload of the weapon being put away keeps running.
    pub(crate) fn swap(&mut self) -> Result<WeaponId, ActionError> {
        if self.selection_locked {
            return Err(ActionError::SelectionLocked);
        }
        if self.secondary.is_none() {
            return Err(ActionError::NoSecondary);
        }
        self.using_primary = !self.using_primary;
        Ok(self.active_mut().definition.id)
    }

    /// Advances reload timers and reports completed reloads.
    pub(crate) fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let slots = std::iter::once(&mut self.primary).chain(self.secondary.as_mut());
        for slot in slots {
            if slot.ammo.advance(dt) {
                out_events.push(Event::ReloadFinished {
                    weapon: slot.definition.id,
                    clip: slot.ammo.current_clip(),
                    reserve: slot.ammo.reserve(),
                });
            }
        }
    }

    pub(crate) fn replace_primary(&mut self, definition: &WeaponDefinition) {
        self.primary = Slot::new(definition, Reserve::Infinite);
    }

    /// Equips a secondary weapon; picking up the equipped one only adds reserve.
    pub(crate) fn replace_secondary(&mut self, definition: &WeaponDefinition, reserve: u32) {
        if let Some(slot) = &mut self.secondary {
            if slot.definition.id == definition.id {
                slot.ammo.add_reserve(reserve);
                return;
            }
        }
        self.secondary = Some(Slot::new(definition, Reserve::Finite(reserve)));
    }

    pub(crate) fn equip_melee(&mut self, id: WeaponId, stats: MeleeStats) {
        self.melee = Some((id, stats));
    }

    /// Adds one clip worth of rounds to the secondary reserve.
    pub(crate) fn add_secondary_ammo(&mut self) {
        if let Some(slot) = &mut self.secondary {
            let clip = slot.ammo.clip_size();
            slot.ammo.add_reserve(clip);
        }
    }

    /// Melee weapon in use, falling back to the unarmed strike.
    pub(crate) fn melee(&self, unarmed: MeleeStats) -> (Option<WeaponId>, MeleeStats) {
        match self.melee {
            Some((id, stats)) => (Some(id), stats),
            None => (None, unarmed),
        }
    }

    pub(crate) fn primary_snapshot(&self) -> AmmoSnapshot {
        AmmoSnapshot::from(&self.primary.ammo)
    }

    pub(crate) fn secondary_snapshot(&self) -> Option<AmmoSnapshot> {
        self.secondary
            .as_ref()
            .map(|slot| AmmoSnapshot::from(&slot.ammo))
    }

    pub(crate) fn using_primary(&self) -> bool {
        self.using_primary || self.secondary.is_none()
    }

    pub(crate) fn melee_weapon(&self) -> Option<WeaponId> {
        self.melee.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use zenith_core::{ActionError, Event, Reserve};

    use super::Arsenal;
    use crate::{catalog, config::WorldConfig};

    fn arsenal() -> Arsenal {
        Arsenal::from_loadout(&WorldConfig::default()).expect("stock loadout")
    }

    #[test]
    fn fires_at_most_once_per_interval() {
        let mut arsenal = arsenal();
        let start = Duration::from_secs(1);
        assert!(arsenal.fire(start).is_ok());
        assert_eq!(
            arsenal.fire(start + Duration::from_millis(100)).err(),
            Some(ActionError::OnCooldown)
        );
        assert_eq!(arsenal.primary_snapshot().current_clip, 11);
        assert!(arsenal.fire(start + Duration::from_millis(250)).is_ok());
        assert_eq!(arsenal.primary_snapshot().current_clip, 10);
    }

    #[test]
    fn holstered_weapon_finishes_its_reload() {
        let mut arsenal = arsenal();
        let _ = arsenal.fire(Duration::ZERO).expect("shot");
        let _ = arsenal.reload().expect("reload starts");
        assert_eq!(arsenal.swap(), Ok(catalog::RIFLE));
        assert!(!arsenal.using_primary());
        assert!(arsenal.primary_snapshot().reloading);

        let mut events = Vec::new();
        arsenal.advance(Duration::from_millis(500), &mut events);
        assert!(events.is_empty());
        arsenal.advance(Duration::from_millis(500), &mut events);
        assert_eq!(
            events,
            vec![Event::ReloadFinished {
                weapon: catalog::PISTOL,
                clip: 12,
                reserve: Reserve::Infinite,
            }]
        );
        assert!(!arsenal.primary_snapshot().reloading);
        assert_eq!(arsenal.primary_snapshot().current_clip, 12);
    }

    #[test]
    fn swap_requires_a_secondary() {
        let mut config = WorldConfig::default();
        config.loadout.secondary = None;
        let mut arsenal = Arsenal::from_loadout(&config).expect("loadout");
        assert_eq!(arsenal.swap(), Err(ActionError::NoSecondary));

        config.loadout.secondary = Some(catalog::RIFLE);
        config.loadout.selection_locked = true;
        let mut locked = Arsenal::from_loadout(&config).expect("loadout");
        assert_eq!(locked.swap(), Err(ActionError::SelectionLocked));
    }

    #[test]
    fn same_secondary_pickup_only_adds_reserve() {
        let config = WorldConfig::default();
        let mut arsenal = arsenal();
        let rifle = config.weapon(catalog::RIFLE).expect("rifle");
        arsenal.replace_secondary(rifle, 24);
        let secondary = arsenal.secondary_snapshot().expect("secondary");
        assert_eq!(secondary.reserve, Reserve::Finite(144));

        let launcher = config.weapon(catalog::LAUNCHER).expect("launcher");
        arsenal.replace_secondary(launcher, 6);
        let secondary = arsenal.secondary_snapshot().expect("secondary");
        assert_eq!(secondary.weapon, catalog::LAUNCHER);
        assert_eq!(secondary.current_clip, 2);
        assert_eq!(secondary.reserve, Reserve::Finite(6));

        arsenal.add_secondary_ammo();
        let secondary = arsenal.secondary_snapshot().expect("secondary");
        assert_eq!(secondary.reserve, Reserve::Finite(8));
    }

    #[test]
    fn completed_reload_is_reported() {
        let mut arsenal = arsenal();
        let _ = arsenal.swap().expect("swap");
        for step in 0..5 {
            let _ = arsenal
                .fire(Duration::from_millis(step * 100))
                .expect("shot");
        }
        let _ = arsenal.reload().expect("reload");
        let mut events = Vec::new();
        arsenal.advance(Duration::from_millis(1500), &mut events);
        assert_eq!(
            events,
            vec![Event::ReloadFinished {
                weapon: catalog::RIFLE,
                clip: 30,
                reserve: Reserve::Finite(115),
            }]
        );
    }
}
