use glam::Vec2;
use zenith_core::LevelLayout;

/// Minimal kinematic body: gravity, a flat ground and horizontal walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: f32,
    pub(crate) gravity: bool,
    pub(crate) grounded: bool,
}

impl Body {
    pub(crate) fn new(position: Vec2, radius: f32, gravity: bool) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            gravity,
            grounded: false,
        }
    }

    /// Height of the body centre when resting on the ground.
    pub(crate) fn rest_height(&self, layout: &LevelLayout) -> f32 {
        layout.ground_y + self.radius
    }

    pub(crate) fn integrate(&mut self, dt: f32, gravity: f32, layout: &LevelLayout) {
        if self.gravity {
            self.velocity.y -= gravity * dt;
        }
        self.position += self.velocity * dt;

        let rest = self.rest_height(layout);
        if self.position.y <= rest {
            self.position.y = rest;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        let clamped = layout.clamp_x(self.position.x);
        if clamped != self.position.x {
            self.position.x = clamped;
            self.velocity.x = 0.0;
        }
    }
}
