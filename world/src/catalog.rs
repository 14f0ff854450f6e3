//! Stock weapons and enemies used when no configuration overrides them.

use std::time::Duration;

use glam::Vec2;
use zenith_core::{
    AimMode, AltitudeProfile, ArchetypeId, AttackProfile, BehaviorProfile, Bestiary, DamageType,
    DropTable, EnemyArchetype, EnemyRank, GrenadeSpec, Layer, LayerMask, Locomotion, MeleeAttack,
    MeleeStats, MuzzleTuning, PickupKind, ProjectileSpec, RangedAttack, RangedStats,
    RecoilTuning, SeparationProfile, WeaponDefinition, WeaponId,
};

/// Sidearm with an endless reserve.
pub const PISTOL: WeaponId = WeaponId::new(1);
/// Automatic rifle that pierces one target.
pub const RIFLE: WeaponId = WeaponId::new(2);
/// Rocket launcher with explosive rounds.
pub const LAUNCHER: WeaponId = WeaponId::new(3);
/// Combat knife.
pub const KNIFE: WeaponId = WeaponId::new(4);

/// Melee grunt.
pub const GRUNT: ArchetypeId = ArchetypeId::new(1);
/// Rifle-wielding gunner.
pub const GUNNER: ArchetypeId = ArchetypeId::new(2);
/// Hovering drone that aims at the player.
pub const DRONE: ArchetypeId = ArchetypeId::new(3);
/// Elite melee brute.
pub const BRUTE: ArchetypeId = ArchetypeId::new(4);
/// Elite marksman.
pub const MARKSMAN: ArchetypeId = ArchetypeId::new(5);
/// Melee boss.
pub const WARDEN: ArchetypeId = ArchetypeId::new(10);
/// Ranged boss.
pub const GATLING: ArchetypeId = ArchetypeId::new(11);
/// Boss of the final floor.
pub const OVERSEER: ArchetypeId = ArchetypeId::new(20);

fn player_bullet(damage: u32, speed: f32, pierce: u32) -> ProjectileSpec {
    ProjectileSpec {
        damage,
        speed,
        pierce,
        hit_layers: LayerMask::EMPTY.with(Layer::Enemy),
        ..ProjectileSpec::default()
    }
}

fn enemy_bullet(damage: u32, speed: f32) -> ProjectileSpec {
    ProjectileSpec {
        damage,
        speed,
        knockback: 2.0,
        hit_layers: LayerMask::EMPTY.with(Layer::Player),
        ..ProjectileSpec::default()
    }
}

fn rocket(damage: u32, hit: Layer, harms: LayerMask) -> ProjectileSpec {
    ProjectileSpec {
        damage,
        damage_type: DamageType::Explosive,
        speed: 10.0,
        lifetime: Duration::from_secs(4),
        radius: 0.15,
        explosion_radius: 2.0,
        knockback: 8.0,
        hit_layers: LayerMask::EMPTY.with(hit),
        explosion_layers: harms,
        ..ProjectileSpec::default()
    }
}

/// Weapons available to the player.
#[must_use]
pub fn armory() -> Vec<WeaponDefinition> {
    vec![
        WeaponDefinition {
            id: PISTOL,
            name: String::from("Pistol"),
            ranged: Some(RangedStats {
                fire_interval: Duration::from_millis(250),
                clip_size: 12,
                infinite_ammo: true,
                reload_time: Duration::from_secs(1),
                projectile: player_bullet(10, 15.0, 0),
            }),
            melee: None,
            muzzle: MuzzleTuning {
                offset: Vec2::new(0.15, 0.0),
                ..MuzzleTuning::default()
            },
            recoil: RecoilTuning::default(),
        },
        WeaponDefinition {
            id: RIFLE,
            name: String::from("Rifle"),
            ranged: Some(RangedStats {
                fire_interval: Duration::from_millis(100),
                clip_size: 30,
                infinite_ammo: false,
                reload_time: Duration::from_millis(1500),
                projectile: player_bullet(8, 20.0, 1),
            }),
            melee: None,
            muzzle: MuzzleTuning {
                offset: Vec2::new(0.3, 0.0),
                scale: 1.2,
                ..MuzzleTuning::default()
            },
            recoil: RecoilTuning {
                offset: Vec2::new(0.0, 0.08),
                ..RecoilTuning::default()
            },
        },
        WeaponDefinition {
            id: LAUNCHER,
            name: String::from("Launcher"),
            ranged: Some(RangedStats {
                fire_interval: Duration::from_secs(1),
                clip_size: 2,
                infinite_ammo: false,
                reload_time: Duration::from_secs(2),
                projectile: rocket(
                    40,
                    Layer::Enemy,
                    LayerMask::EMPTY.with(Layer::Enemy),
                ),
            }),
            melee: None,
            muzzle: MuzzleTuning {
                offset: Vec2::new(0.4, 0.0),
                scale: 1.6,
                lifetime: Duration::from_millis(80),
            },
            recoil: RecoilTuning {
                offset: Vec2::new(0.0, 0.2),
                kick: Duration::from_millis(80),
                recover: Duration::from_millis(200),
            },
        },
        WeaponDefinition {
            id: KNIFE,
            name: String::from("Knife"),
            ranged: None,
            melee: Some(MeleeStats {
                damage: 40,
                range: 1.2,
                windup: Duration::from_millis(100),
                active: Duration::from_millis(150),
                recovery: Duration::from_millis(200),
                knockback: 5.0,
            }),
            muzzle: MuzzleTuning::default(),
            recoil: RecoilTuning::default(),
        },
    ]
}

fn common_drops(chance: f32) -> DropTable {
    DropTable {
        chance,
        pickups: vec![
            PickupKind::Health {
                amount: 25.0,
                overheal: false,
            },
            PickupKind::Armour { amount: 25.0 },
            PickupKind::SecondaryAmmo,
            PickupKind::GrenadeAmmo { amount: 2 },
        ],
    }
}

/// Wider, heavier grenade dropped by the Warden.
#[must_use]
pub fn cluster_grenade() -> GrenadeSpec {
    GrenadeSpec {
        name: String::from("Cluster"),
        fuse: Duration::from_millis(1200),
        radius: 3.5,
        damage: 70,
        force: 10.0,
        ..GrenadeSpec::default()
    }
}

// Stock profiles start holding exactly where they stop approaching.
fn melee_profile(move_speed: f32, attack: MeleeAttack) -> BehaviorProfile {
    BehaviorProfile {
        move_speed,
        approach_range: 1.0,
        hold_range: 1.0,
        attack_range: 1.2,
        attack: AttackProfile::Melee(attack),
        ..BehaviorProfile::default()
    }
}

fn ranged_profile(attack: RangedAttack) -> BehaviorProfile {
    BehaviorProfile {
        move_speed: 2.2,
        approach_range: 5.0,
        hold_range: 5.0,
        attack_range: 5.5,
        locomotion: Locomotion::Grounded,
        attack: AttackProfile::Ranged(attack),
        separation: SeparationProfile {
            radius: 0.7,
            strength: 1.2,
        },
    }
}

fn archetype(
    id: ArchetypeId,
    name: &str,
    rank: EnemyRank,
    max_health: u32,
    behavior: BehaviorProfile,
    drops: DropTable,
) -> EnemyArchetype {
    EnemyArchetype {
        id,
        name: String::from(name),
        rank,
        max_health,
        body_radius: 0.4,
        muzzle_offset: Vec2::new(0.4, 0.1),
        behavior,
        drops,
        destroy_delay: Duration::from_secs(2),
        hurt_sound_chance: 0.5,
    }
}

/// Enemies that may appear in the arenas.
#[must_use]
pub fn bestiary() -> Bestiary {
    let mut drone = archetype(
        DRONE,
        "Drone",
        EnemyRank::Basic,
        30,
        BehaviorProfile {
            move_speed: 2.0,
            approach_range: 5.0,
            hold_range: 5.0,
            attack_range: 5.5,
            locomotion: Locomotion::Flying(AltitudeProfile::default()),
            attack: AttackProfile::Ranged(RangedAttack {
                projectile: enemy_bullet(6, 9.0),
                clip_size: 4,
                fire_interval: Duration::from_millis(600),
                reload_time: Duration::from_secs(2),
                crouch_chance: 0.0,
                aim: AimMode::AtPlayer,
                ..RangedAttack::default()
            }),
            separation: SeparationProfile {
                radius: 0.9,
                strength: 1.5,
            },
        },
        common_drops(0.25),
    );
    drone.muzzle_offset = Vec2::new(0.0, -0.3);

    let mut overseer = archetype(
        OVERSEER,
        "Overseer",
        EnemyRank::FinalBoss,
        1500,
        ranged_profile(RangedAttack {
            projectile: rocket(
                30,
                Layer::Player,
                LayerMask::EMPTY.with(Layer::Player),
            ),
            clip_size: 3,
            fire_interval: Duration::from_millis(900),
            reload_time: Duration::from_millis(2500),
            crouch_chance: 0.0,
            aim: AimMode::AtPlayer,
            ..RangedAttack::default()
        }),
        DropTable {
            chance: 0.0,
            pickups: Vec::new(),
        },
    );
    overseer.body_radius = 1.0;
    overseer.destroy_delay = Duration::from_secs(4);

    let mut warden = archetype(
        WARDEN,
        "Warden",
        EnemyRank::Boss,
        600,
        BehaviorProfile {
            approach_range: 1.8,
            hold_range: 1.8,
            attack_range: 2.2,
            ..melee_profile(
                2.0,
                MeleeAttack {
                    damage: 25,
                    windup: Duration::from_millis(450),
                    active: Duration::from_millis(200),
                    cooldown: Duration::from_millis(1500),
                    knockback: 8.0,
                },
            )
        },
        DropTable {
            chance: 1.0,
            pickups: vec![PickupKind::GrenadeType {
                grenade: cluster_grenade(),
                bonus: 1,
            }],
        },
    );
    warden.body_radius = 0.9;

    let mut gatling = archetype(
        GATLING,
        "Gatling",
        EnemyRank::Boss,
        500,
        ranged_profile(RangedAttack {
            projectile: enemy_bullet(6, 14.0),
            clip_size: 20,
            fire_interval: Duration::from_millis(150),
            reload_time: Duration::from_millis(2500),
            crouch_chance: 0.0,
            ..RangedAttack::default()
        }),
        DropTable {
            chance: 1.0,
            pickups: vec![PickupKind::SecondaryWeapon {
                weapon: LAUNCHER,
                reserve: 6,
            }],
        },
    );
    gatling.body_radius = 0.9;

    Bestiary::new(vec![
        archetype(
            GRUNT,
            "Grunt",
            EnemyRank::Basic,
            50,
            melee_profile(2.5, MeleeAttack::default()),
            common_drops(0.25),
        ),
        archetype(
            GUNNER,
            "Gunner",
            EnemyRank::Basic,
            40,
            ranged_profile(RangedAttack {
                projectile: enemy_bullet(8, 12.0),
                ..RangedAttack::default()
            }),
            common_drops(0.25),
        ),
        drone,
        archetype(
            BRUTE,
            "Brute",
            EnemyRank::Elite,
            120,
            melee_profile(
                2.0,
                MeleeAttack {
                    damage: 20,
                    windup: Duration::from_millis(300),
                    knockback: 6.0,
                    ..MeleeAttack::default()
                },
            ),
            DropTable {
                chance: 0.4,
                pickups: vec![
                    PickupKind::Armour { amount: 25.0 },
                    PickupKind::SecondaryWeapon {
                        weapon: RIFLE,
                        reserve: 24,
                    },
                ],
            },
        ),
        archetype(
            MARKSMAN,
            "Marksman",
            EnemyRank::Elite,
            80,
            BehaviorProfile {
                approach_range: 8.0,
                hold_range: 8.0,
                attack_range: 8.5,
                ..ranged_profile(RangedAttack {
                    projectile: enemy_bullet(15, 22.0),
                    clip_size: 3,
                    fire_interval: Duration::from_millis(1200),
                    crouch_chance: 0.7,
                    ..RangedAttack::default()
                })
            },
            common_drops(0.4),
        ),
        warden,
        gatling,
        overseer,
    ])
}

#[cfg(test)]
mod tests {
    use zenith_core::EnemyRank;

    use super::{armory, bestiary, OVERSEER, PISTOL};

    #[test]
    fn stock_catalog_is_complete() {
        let weapons = armory();
        let pistol = weapons.iter().find(|w| w.id == PISTOL).expect("pistol");
        assert!(pistol.ranged.map(|r| r.infinite_ammo).unwrap_or(false));

        let enemies = bestiary();
        assert_eq!(enemies.len(), 8);
        let final_boss = enemies.get(OVERSEER).expect("final boss");
        assert_eq!(final_boss.rank, EnemyRank::FinalBoss);
    }
}
