use rand::Rng;
use rand_chacha::ChaCha8Rng;
use zenith_core::{CameraView, LevelLayout};

/// Horizontal spawn position beside the player, preferring off-screen sides.
pub(crate) fn spawn_x(
    player_x: f32,
    distance: f32,
    layout: &LevelLayout,
    camera: &CameraView,
    rng: &mut ChaCha8Rng,
) -> f32 {
    let left = layout.clamp_x(player_x - distance);
    let right = layout.clamp_x(player_x + distance);
    let left_visible = camera.contains(left);
    let right_visible = camera.contains(right);

    if rng.gen::<f32>() < 0.5 {
        if left_visible && !right_visible {
            right
        } else {
            left
        }
    } else if right_visible && !left_visible {
        left
    } else {
        right
    }
}
