use glam::Vec2;

/// Cosmetic effect the presentation layer may spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Flash at a weapon muzzle.
    MuzzleFlash,
    /// Spark where a projectile or strike connected.
    Hit,
    /// Explosion of a projectile or grenade.
    Explosion,
    /// Enemy death burst.
    Death,
    /// Trail left by a dodge.
    DodgeTrail,
    /// Fade to black before a scene change.
    Fade,
}

/// Fire-and-forget request for a cosmetic effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectRequest {
    /// Effect to spawn.
    pub kind: EffectKind,
    /// World position of the effect.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
}

impl EffectRequest {
    /// Creates an unrotated effect request.
    #[must_use]
    pub const fn at(kind: EffectKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            rotation: 0.0,
        }
    }
}

/// Sound the presentation layer may play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundClip {
    /// Player weapon fired.
    PlayerShot,
    /// Enemy weapon fired.
    EnemyShot,
    /// Reload started.
    Reload,
    /// Empty clip clicked.
    DryFire,
    /// Melee swing.
    Swing,
    /// Player hurt.
    PlayerHurt,
    /// Enemy hurt.
    EnemyHurt,
    /// Enemy died.
    EnemyDeath,
    /// Explosion.
    Explosion,
    /// Pickup collected.
    Pickup,
    /// Dodge started.
    Dodge,
    /// Exit doors opened.
    ExitOpened,
}

/// Fire-and-forget request for a sound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundCue {
    /// Clip to play.
    pub clip: SoundClip,
    /// Lower bound of the random pitch.
    pub min_pitch: f32,
    /// Upper bound of the random pitch.
    pub max_pitch: f32,
    /// Playback volume in `[0, 1]`.
    pub volume: f32,
}

impl SoundCue {
    /// Cue at full volume with a slight pitch variation.
    #[must_use]
    pub const fn new(clip: SoundClip) -> Self {
        Self {
            clip,
            min_pitch: 0.95,
            max_pitch: 1.05,
            volume: 1.0,
        }
    }
}

/// Scene transition requested from the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneRequest {
    /// Fade out and load the next floor.
    NextFloor,
    /// Show the game-over screen.
    GameOver {
        /// The final floor was cleared.
        victory: bool,
    },
    /// Return to the main menu.
    MainMenu,
}
