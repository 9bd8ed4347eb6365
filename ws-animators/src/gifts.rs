//! This module contains the presents under the tree, which jump and bounce when clicked.

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, instrument, trace};
use ws_animator_trait::{clamp_frame_delta, Animator, FrameTime};
use ws_geometry::{
    gift_box::GiftBoxGeometry,
    placement::{self, GiftPlacement},
    uniform, GenerationError,
};

/// The downward acceleration on a bouncing gift.
pub const GRAVITY: f32 = -4.9;

/// The share of its vertical speed a gift keeps on each bounce.
pub const RESTITUTION: f32 = 0.6;

/// A gift stops bouncing after this many bounces.
pub const MAX_BOUNCES: u32 = 5;

/// A gift landing slower than this stops bouncing.
const BOUNCE_SPEED_THRESHOLD: f32 = 0.1;

/// A settling gift stops spinning once every angular velocity is below this.
const SPIN_THRESHOLD: f32 = 0.1;

/// Whether a gift is moving.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GiftState {
    /// Sitting still on the ground.
    #[default]
    Resting,

    /// In the air, bouncing, or settling.
    Active,
}

/// The simulated state of one gift.
///
/// This is a plain value type. [`step`](Self::step) and [`trigger`](Self::trigger) return the
/// new state rather than mutating, so the physics can be tested without a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftPhysics {
    /// The height of the centre of the gift.
    pub position_y: f32,

    /// The vertical speed, positive upwards.
    pub velocity_y: f32,

    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,

    /// Radians per second about each axis.
    pub angular_velocity: Vec3,

    /// The number of bounces since the gift was last kicked.
    pub bounce_count: u32,

    /// Whether the gift is moving.
    pub state: GiftState,

    /// The height of the floor under this gift.
    pub ground_level: f32,

    /// Half the height of the gift.
    pub half_height: f32,
}

impl GiftPhysics {
    /// A gift resting where it was placed.
    pub fn at_rest(placement: &GiftPlacement) -> Self {
        let ground_level = placement.ground_level();
        let half_height = placement.half_height();

        Self {
            position_y: ground_level + half_height,
            velocity_y: 0.,
            rotation: placement.rotation,
            angular_velocity: Vec3::ZERO,
            bounce_count: 0,
            state: GiftState::Resting,
            ground_level,
            half_height,
        }
    }

    /// The height of the centre of the gift when it's sitting on the ground.
    pub fn rest_height(&self) -> f32 {
        self.ground_level + self.half_height
    }

    /// Whether the gift is moving.
    pub fn is_active(&self) -> bool {
        self.state == GiftState::Active
    }

    /// Kick a resting gift into the air with a random spin.
    ///
    /// A gift that's already moving ignores the kick.
    #[must_use = ".trigger() returns the new state"]
    pub fn trigger<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if self.is_active() {
            return self;
        }

        Self {
            velocity_y: uniform(rng, 3., 4.5),
            angular_velocity: Vec3::new(
                uniform(rng, -3., 3.),
                uniform(rng, -4., 4.),
                uniform(rng, -3., 3.),
            ),
            bounce_count: 0,
            state: GiftState::Active,
            ..self
        }
    }

    /// Advance the simulation by `delta` seconds.
    ///
    /// The step is capped at [`MAX_FRAME_DELTA`](ws_animator_trait::MAX_FRAME_DELTA).
    ///
    /// A resting gift doesn't move. A moving gift falls under gravity and bounces when it hits
    /// its floor while moving down. Once it's out of bounces or too slow to bounce, its spin
    /// decays until it comes to rest.
    #[must_use = ".step() returns the new state"]
    pub fn step(self, delta: f32) -> Self {
        if !self.is_active() {
            return self;
        }

        let delta = clamp_frame_delta(delta);
        let mut next = self;

        next.velocity_y += GRAVITY * delta;
        next.position_y += next.velocity_y * delta;
        next.rotation += next.angular_velocity * delta;

        if next.position_y - next.half_height <= next.ground_level && next.velocity_y < 0. {
            next.position_y = next.rest_height();

            if next.velocity_y.abs() > BOUNCE_SPEED_THRESHOLD && next.bounce_count < MAX_BOUNCES {
                next.velocity_y = next.velocity_y.abs() * RESTITUTION;
                next.bounce_count += 1;
                next.angular_velocity *= 0.9;
            } else {
                next.velocity_y = 0.;
                next.angular_velocity *= 0.95;

                if next.angular_velocity.abs().max_element() < SPIN_THRESHOLD {
                    next.angular_velocity = Vec3::ZERO;
                    next.state = GiftState::Resting;
                }
            }
        }

        next
    }
}

/// One present under the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Gift {
    /// Where and how the gift was placed.
    pub placement: GiftPlacement,

    /// The box, ribbons and bow.
    pub geometry: GiftBoxGeometry,

    /// The gift's motion.
    pub physics: GiftPhysics,
}

impl Gift {
    /// Where the centre of the gift is right now.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.placement.position.x,
            self.physics.position_y,
            self.placement.position.z,
        )
    }
}

/// Every present under the tree.
#[derive(Clone, Debug)]
pub struct Gifts {
    /// The gifts.
    gifts: Vec<Gift>,

    /// The RNG used to kick gifts into the air.
    rng: StdRng,
}

impl Gifts {
    /// Place `count` gifts around a tree of the given radius.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        tree_radius: f32,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let gifts = placement::gifts(rng, count, tree_radius)
            .into_iter()
            .map(|placement| {
                Ok(Gift {
                    geometry: GiftBoxGeometry::for_placement(&placement)?,
                    physics: GiftPhysics::at_rest(&placement),
                    placement,
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        debug!(count = gifts.len(), "Wrapped gifts");
        Ok(Self {
            gifts,
            rng: StdRng::seed_from_u64(rng.gen()),
        })
    }

    /// The gifts.
    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    /// The number of gifts.
    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    /// Whether there are no gifts.
    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    /// Kick gift `index` into the air.
    ///
    /// Returns whether a resting gift was kicked. Clicking a gift that doesn't exist or is
    /// already moving does nothing.
    pub fn click(&mut self, index: usize) -> bool {
        let Some(gift) = self.gifts.get_mut(index) else {
            return false;
        };

        if gift.physics.is_active() {
            return false;
        }

        gift.physics = gift.physics.trigger(&mut self.rng);
        debug!(index, velocity_y = gift.physics.velocity_y, "Kicked gift");
        true
    }

    /// Whether any gift is still moving.
    pub fn any_active(&self) -> bool {
        self.gifts.iter().any(|gift| gift.physics.is_active())
    }
}

impl Animator for Gifts {
    type Config = ();

    fn tick(&mut self, time: FrameTime, _config: &()) {
        for gift in &mut self.gifts {
            gift.physics = gift.physics.step(time.delta);
        }
        trace!(active = self.any_active(), "Stepped gifts");
    }
}
