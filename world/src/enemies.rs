use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use zenith_core::{
    ArchetypeId, EffectKind, EffectRequest, EnemyArchetype, EnemyId, EnemyPosture, EnemyRank,
    EnemySnapshot, Event, Facing, Layer, Locomotion, SoundClip, SoundCue,
};

use crate::body::Body;

/// Enemy that just died and still needs its kill credited and loot rolled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Death {
    pub(crate) enemy: EnemyId,
    pub(crate) archetype: ArchetypeId,
    pub(crate) rank: EnemyRank,
    pub(crate) position: Vec2,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) archetype: ArchetypeId,
    rank: EnemyRank,
    pub(crate) body: Body,
    pub(crate) facing: Facing,
    pub(crate) posture: EnemyPosture,
    health: i64,
    max_health: u32,
    layer: Layer,
    destroy_delay: Duration,
    despawn_in: Option<Duration>,
    hurt_sound_chance: f32,
}

impl Enemy {
    fn new(id: EnemyId, archetype: &EnemyArchetype, position: Vec2) -> Self {
        let flying = matches!(archetype.behavior.locomotion, Locomotion::Flying(_));
        Self {
            id,
            archetype: archetype.id,
            rank: archetype.rank,
            body: Body::new(position, archetype.body_radius, !flying),
            facing: Facing::Left,
            posture: EnemyPosture::Idle,
            health: i64::from(archetype.max_health),
            max_health: archetype.max_health,
            layer: Layer::Enemy,
            destroy_delay: archetype.destroy_delay,
            despawn_in: None,
            hurt_sound_chance: archetype.hurt_sound_chance,
        }
    }

    pub(crate) fn layer(&self) -> Layer {
        self.layer
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.layer == Layer::DeadEnemy
    }

    /// Applies damage and knockback; returns the death record on the killing blow.
    ///
    /// Dead enemies ignore further damage.
    pub(crate) fn take_damage(
        &mut self,
        amount: u32,
        knockback: Vec2,
        rng: &mut ChaCha8Rng,
        out_events: &mut Vec<Event>,
    ) -> Option<Death> {
        if self.is_dead() {
            return None;
        }

        self.health -= i64::from(amount);
        self.body.velocity += knockback;
        out_events.push(Event::EnemyDamaged {
            enemy: self.id,
            amount,
            remaining: self.health,
        });
        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::Hit, self.body.position),
        });

        if self.health > 0 {
            if rng.gen::<f32>() < self.hurt_sound_chance {
                out_events.push(Event::SoundRequested {
                    cue: SoundCue::new(SoundClip::EnemyHurt),
                });
            }
            return None;
        }

        self.layer = Layer::DeadEnemy;
        self.body.velocity.x = 0.0;
        self.body.gravity = true;
        self.posture = EnemyPosture::Idle;
        self.despawn_in = Some(self.destroy_delay);
        log::debug!("enemy {} died", self.id.get());
        out_events.push(Event::EnemyDied {
            enemy: self.id,
            archetype: self.archetype,
            rank: self.rank,
            position: self.body.position,
        });
        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::Death, self.body.position),
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::EnemyDeath),
        });
        Some(Death {
            enemy: self.id,
            archetype: self.archetype,
            rank: self.rank,
            position: self.body.position,
        })
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            archetype: self.archetype,
            position: self.body.position,
            velocity: self.body.velocity,
            facing: self.facing,
            posture: self.posture,
            health: self.health,
            max_health: self.max_health,
            layer: self.layer,
        }
    }
}

/// Every enemy currently in the arena, living or awaiting removal.
#[derive(Clone, Debug, Default)]
pub(crate) struct EnemyRegistry {
    enemies: BTreeMap<EnemyId, Enemy>,
    next_id: u32,
}

impl EnemyRegistry {
    pub(crate) fn spawn(&mut self, archetype: &EnemyArchetype, position: Vec2) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self
            .enemies
            .insert(id, Enemy::new(id, archetype, position));
        id
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.enemies.len()
    }

    pub(crate) fn clear(&mut self) {
        self.enemies.clear();
    }

    pub(crate) fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.enemies.values().map(Enemy::snapshot).collect()
    }

    /// Counts down despawn timers and removes enemies whose delay elapsed.
    pub(crate) fn advance_despawns(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut expired = Vec::new();
        for enemy in self.enemies.values_mut() {
            if let Some(remaining) = enemy.despawn_in {
                let left = remaining.saturating_sub(dt);
                enemy.despawn_in = Some(left);
                if left.is_zero() {
                    expired.push(enemy.id);
                }
            }
        }
        for id in expired {
            let _ = self.enemies.remove(&id);
            out_events.push(Event::EnemyDespawned { enemy: id });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use zenith_core::{EnemyRank, Event, Layer};

    use super::EnemyRegistry;
    use crate::catalog;

    #[test]
    fn dies_exactly_once_and_despawns_after_the_delay() {
        let bestiary = catalog::bestiary();
        let grunt = bestiary.get(catalog::GRUNT).expect("grunt");
        let mut registry = EnemyRegistry::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut events = Vec::new();
        let id = registry.spawn(grunt, Vec2::ZERO);

        let enemy = registry.get_mut(id).expect("spawned");
        assert!(enemy.take_damage(30, Vec2::ZERO, &mut rng, &mut events).is_none());
        let death = enemy
            .take_damage(30, Vec2::ZERO, &mut rng, &mut events)
            .expect("killing blow");
        assert_eq!(death.rank, EnemyRank::Basic);
        assert!(enemy.take_damage(30, Vec2::ZERO, &mut rng, &mut events).is_none());
        assert_eq!(enemy.layer(), Layer::DeadEnemy);

        let deaths = events
            .iter()
            .filter(|event| matches!(event, Event::EnemyDied { .. }))
            .count();
        assert_eq!(deaths, 1);

        events.clear();
        registry.advance_despawns(Duration::from_millis(1999), &mut events);
        assert!(events.is_empty());
        registry.advance_despawns(Duration::from_millis(1), &mut events);
        assert_eq!(events, vec![Event::EnemyDespawned { enemy: id }]);
        assert_eq!(registry.len(), 0);
    }
}
