use std::{cmp::Ordering, collections::BTreeSet, time::Duration};

use glam::Vec2;
use zenith_core::{
    EffectKind, EffectRequest, Event, GrenadeId, GrenadeSpec, HitTarget, Layer, LayerMask,
    ProjectileId, ProjectileSnapshot, ProjectileSpec, RetireReason, SoundClip, SoundCue, Source,
    TargetFilter,
};

use crate::{body::Body, World};

/// Projectile in flight.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    source: Source,
    spec: ProjectileSpec,
    filter: TargetFilter,
    position: Vec2,
    velocity: Vec2,
    age: Duration,
    pierce_left: u32,
    hit: BTreeSet<HitTarget>,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            source: self.source,
            position: self.position,
            velocity: self.velocity,
        }
    }
}

/// Grenade waiting for its fuse.
#[derive(Clone, Debug)]
pub(crate) struct Grenade {
    id: GrenadeId,
    body: Body,
    fuse_left: Duration,
    spec: GrenadeSpec,
}

/// Damageable body as seen by contact and overlap queries.
#[derive(Clone, Copy, Debug)]
struct Hurtbox {
    target: HitTarget,
    centre: Vec2,
    radius: f32,
    layer: Layer,
}

/// Overlap query that damages everything it catches.
#[derive(Clone, Copy, Debug)]
struct Blast {
    centre: Vec2,
    radius: f32,
    damage: u32,
    force: f32,
    layers: LayerMask,
    filter: TargetFilter,
}

/// Earliest parameter in `[0, 1]` at which the segment `from -> to` comes
/// within `reach` of `centre`.
fn sweep(from: Vec2, to: Vec2, centre: Vec2, reach: f32) -> Option<f32> {
    let offset = from - centre;
    let c = offset.length_squared() - reach * reach;
    if c <= 0.0 {
        return Some(0.0);
    }
    let travel = to - from;
    let a = travel.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * offset.dot(travel);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

fn knockback(from: Vec2, to: Vec2, force: f32) -> Vec2 {
    (to - from).normalize_or_zero() * force
}

impl World {
    fn hurtboxes(&self) -> Vec<Hurtbox> {
        let mut boxes: Vec<Hurtbox> = self
            .enemies
            .iter()
            .map(|enemy| Hurtbox {
                target: HitTarget::Enemy(enemy.id),
                centre: enemy.body.position,
                radius: enemy.body.radius,
                layer: enemy.layer(),
            })
            .collect();
        if let Some(player) = &self.player {
            boxes.push(Hurtbox {
                target: HitTarget::Player,
                centre: player.body.position,
                radius: player.body.radius,
                layer: player.layer(),
            });
        }
        boxes
    }

    pub(crate) fn spawn_projectile(
        &mut self,
        source: Source,
        spec: ProjectileSpec,
        origin: Vec2,
        direction: Vec2,
        out_events: &mut Vec<Event>,
    ) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile = self.next_projectile.wrapping_add(1);
        let filter = match source {
            Source::Player => TargetFilter::HOSTILE_TO_ENEMIES,
            Source::Enemy(_) => TargetFilter::HOSTILE_TO_PLAYER,
        };
        let heading = direction.try_normalize().unwrap_or(Vec2::X);
        self.projectiles.push(Projectile {
            id,
            source,
            spec,
            filter,
            position: origin,
            velocity: heading * spec.speed,
            age: Duration::ZERO,
            pierce_left: spec.pierce,
            hit: BTreeSet::new(),
        });
        out_events.push(Event::ProjectileSpawned {
            projectile: id,
            source,
        });
        id
    }

    /// Moves every projectile and resolves its contacts nearest-first.
    pub(crate) fn advance_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let in_flight = std::mem::take(&mut self.projectiles);
        let mut survivors = Vec::with_capacity(in_flight.len());
        for mut projectile in in_flight {
            match self.resolve_flight(&mut projectile, dt, out_events) {
                Some(reason) => out_events.push(Event::ProjectileRetired {
                    projectile: projectile.id,
                    reason,
                }),
                None => survivors.push(projectile),
            }
        }
        // Projectiles cannot spawn projectiles, so nothing was added meanwhile.
        self.projectiles = survivors;
    }

    fn resolve_flight(
        &mut self,
        projectile: &mut Projectile,
        dt: Duration,
        out_events: &mut Vec<Event>,
    ) -> Option<RetireReason> {
        let from = projectile.position;
        let to = from + projectile.velocity * dt.as_secs_f32();

        let mut contacts: Vec<(f32, Hurtbox)> = self
            .hurtboxes()
            .into_iter()
            .filter_map(|hurtbox| {
                sweep(from, to, hurtbox.centre, hurtbox.radius + projectile.spec.radius)
                    .map(|t| (t, hurtbox))
            })
            .collect();
        contacts.sort_by(|(a, left), (b, right)| {
            a.partial_cmp(b)
                .unwrap_or(Ordering::Equal)
                .then(left.target.cmp(&right.target))
        });

        for (t, hurtbox) in contacts {
            let eligible = !projectile.hit.contains(&hurtbox.target)
                && projectile.spec.hit_layers.admits(hurtbox.layer)
                && projectile.filter.allows(hurtbox.target);
            if !eligible {
                continue;
            }

            let point = from.lerp(to, t);
            projectile.position = point;

            if projectile.spec.is_explosive() {
                let blast = Blast {
                    centre: point,
                    radius: projectile.spec.explosion_radius,
                    damage: projectile.spec.damage,
                    force: projectile.spec.knockback,
                    layers: projectile.spec.explosion_layers,
                    filter: projectile.filter,
                };
                let struck = self.explode(blast, out_events);
                for target in struck {
                    out_events.push(Event::ProjectileHit {
                        projectile: projectile.id,
                        target,
                    });
                }
                return Some(RetireReason::Exploded);
            }

            let _ = projectile.hit.insert(hurtbox.target);
            let push = knockback(point, hurtbox.centre, projectile.spec.knockback);
            self.damage_target(hurtbox.target, projectile.spec.damage, push, out_events);
            out_events.push(Event::ProjectileHit {
                projectile: projectile.id,
                target: hurtbox.target,
            });
            if projectile.pierce_left == 0 {
                return Some(RetireReason::PierceExhausted);
            }
            projectile.pierce_left -= 1;
        }

        projectile.position = to;
        projectile.age = projectile.age.saturating_add(dt);
        if projectile.age >= projectile.spec.lifetime {
            return Some(RetireReason::Expired);
        }
        None
    }

    /// Damages and knocks back every eligible body inside the blast exactly once.
    fn explode(&mut self, blast: Blast, out_events: &mut Vec<Event>) -> Vec<HitTarget> {
        let caught: Vec<(HitTarget, Vec2)> = self
            .hurtboxes()
            .into_iter()
            .filter(|hurtbox| {
                blast.layers.contains(hurtbox.layer)
                    && blast.filter.allows(hurtbox.target)
                    && hurtbox.centre.distance(blast.centre) <= blast.radius + hurtbox.radius
            })
            .map(|hurtbox| (hurtbox.target, hurtbox.centre))
            .collect();

        out_events.push(Event::EffectRequested {
            effect: EffectRequest::at(EffectKind::Explosion, blast.centre),
        });
        out_events.push(Event::SoundRequested {
            cue: SoundCue::new(SoundClip::Explosion),
        });

        let mut struck = Vec::with_capacity(caught.len());
        for (target, position) in caught {
            let push = knockback(blast.centre, position, blast.force);
            self.damage_target(target, blast.damage, push, out_events);
            struck.push(target);
        }
        struck
    }

    /// Launches the grenade type the run currently carries.
    pub(crate) fn throw_grenade(
        &mut self,
        origin: Vec2,
        velocity: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        let id = GrenadeId::new(self.next_grenade);
        self.next_grenade = self.next_grenade.wrapping_add(1);
        let spec = self.run.grenade.clone();
        let mut body = Body::new(origin, 0.15, true);
        body.velocity = velocity;
        self.grenades.push(Grenade {
            id,
            body,
            fuse_left: spec.fuse,
            spec,
        });
        out_events.push(Event::GrenadeThrown { grenade: id });
    }

    /// Flies grenades and detonates those whose fuse ran out, each exactly once.
    pub(crate) fn advance_grenades(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let seconds = dt.as_secs_f32();
        let mut armed = std::mem::take(&mut self.grenades);
        let mut detonating = Vec::new();
        armed.retain_mut(|grenade| {
            grenade.body.integrate(seconds, self.config.gravity, &self.layout);
            if grenade.body.grounded {
                grenade.body.velocity.x *= (1.0 - 5.0 * seconds).max(0.0);
            }
            grenade.fuse_left = grenade.fuse_left.saturating_sub(dt);
            if grenade.fuse_left.is_zero() {
                detonating.push((grenade.id, grenade.body.position, grenade.spec.clone()));
                return false;
            }
            true
        });
        self.grenades = armed;

        for (id, position, spec) in detonating {
            let blast = Blast {
                centre: position,
                radius: spec.radius,
                damage: spec.damage,
                force: spec.force,
                layers: LayerMask::EMPTY.with(Layer::Enemy),
                filter: TargetFilter::HOSTILE_TO_ENEMIES,
            };
            let _ = self.explode(blast, out_events);
            out_events.push(Event::GrenadeExploded {
                grenade: id,
                position,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::sweep;

    #[test]
    fn sweep_finds_the_first_touch() {
        let t = sweep(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(5.0, 0.0), 1.0)
            .expect("contact");
        assert!((t - 0.4).abs() < 1e-5);
    }

    #[test]
    fn sweep_misses_distant_and_behind_targets() {
        assert!(sweep(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(5.0, 3.0), 1.0).is_none());
        assert!(sweep(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(-5.0, 0.0), 1.0).is_none());
        assert_eq!(
            sweep(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.5, 0.0), 1.0),
            Some(0.0)
        );
    }
}
