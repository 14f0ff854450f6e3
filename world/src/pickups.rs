use glam::Vec2;
use zenith_core::{Event, PickupId, PickupKind, PlayerState, SoundClip, SoundCue};

use crate::World;

/// Item lying in the arena.
#[derive(Clone, Debug)]
pub(crate) struct Pickup {
    id: PickupId,
    kind: PickupKind,
    position: Vec2,
}

impl World {
    pub(crate) fn spawn_pickup(
        &mut self,
        kind: PickupKind,
        position: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        let id = PickupId::new(self.next_pickup);
        self.next_pickup = self.next_pickup.wrapping_add(1);
        let position = Vec2::new(
            self.layout.clamp_x(position.x),
            position.y.max(self.layout.ground_y),
        );
        out_events.push(Event::PickupSpawned {
            pickup: id,
            kind: kind.clone(),
            position,
        });
        self.pickups.push(Pickup { id, kind, position });
    }

    /// Collects every pickup the living player touches.
    pub(crate) fn collect_pickups(&mut self, out_events: &mut Vec<Event>) {
        let Some(player) = &self.player else {
            return;
        };
        if player.state == PlayerState::Dead {
            return;
        }
        let centre = player.body.position;
        let reach = self.config.player.pickup_radius + player.body.radius;
        let (touched, remaining): (Vec<Pickup>, Vec<Pickup>) = std::mem::take(&mut self.pickups)
            .into_iter()
            .partition(|pickup| {
                (pickup.position.x - centre.x).abs() <= reach
                    && (pickup.position.y - centre.y).abs() <= reach
            });
        self.pickups = remaining;

        for pickup in touched {
            self.apply_pickup(&pickup.kind);
            out_events.push(Event::PickupCollected {
                pickup: pickup.id,
                kind: pickup.kind,
            });
            out_events.push(Event::SoundRequested {
                cue: SoundCue::new(SoundClip::Pickup),
            });
        }
    }

    fn apply_pickup(&mut self, kind: &PickupKind) {
        match kind {
            PickupKind::Health { amount, overheal } => self.run.heal(*amount, *overheal),
            PickupKind::Armour { amount } => self.run.add_armour(*amount),
            PickupKind::SecondaryAmmo => self.arsenal.add_secondary_ammo(),
            PickupKind::GrenadeAmmo { amount } => self.run.add_grenades(*amount),
            PickupKind::GrenadeType { grenade, bonus } => {
                log::debug!("grenade switched to {}", grenade.name);
                self.run.grenade = grenade.clone();
                self.run.add_grenades(*bonus);
            }
            PickupKind::SecondaryWeapon { weapon, reserve } => {
                match self.config.weapon(*weapon).filter(|d| d.ranged.is_some()) {
                    Some(definition) => self.arsenal.replace_secondary(definition, *reserve),
                    None => log::warn!("secondary pickup names unusable weapon {}", weapon.get()),
                }
            }
            PickupKind::PrimaryWeapon { weapon } => {
                match self.config.weapon(*weapon).filter(|d| d.ranged.is_some()) {
                    Some(definition) => self.arsenal.replace_primary(definition),
                    None => log::warn!("primary pickup names unusable weapon {}", weapon.get()),
                }
            }
            PickupKind::MeleeWeapon { weapon } => {
                match self.config.weapon(*weapon).and_then(|d| d.melee) {
                    Some(stats) => self.arsenal.equip_melee(*weapon, stats),
                    None => log::warn!("melee pickup names unusable weapon {}", weapon.get()),
                }
            }
        }
    }
}
