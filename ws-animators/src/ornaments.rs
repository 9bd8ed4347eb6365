//! This module contains the baubles hung on the tree.

use rand::Rng;
use tracing::{debug, instrument};
use ws_animator_trait::{Animator, FrameTime};
use ws_geometry::placement::{self, OrnamentPlacement};

/// How fast every ornament spins about its own y axis, in radians per second.
const SPIN_SPEED: f32 = 0.5;

/// The scale of a hovered ornament.
const HOVER_SCALE: f32 = 1.2;

/// The glow of a clicked ornament.
const CLICKED_EMISSIVE: f32 = 0.8;

/// One bauble on the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    /// Where the ornament hangs and what it looks like.
    pub placement: OrnamentPlacement,

    /// The current spin about the ornament's own y axis.
    pub rotation_y: f32,

    /// Whether the ornament has been clicked on.
    pub clicked: bool,

    /// Whether the pointer is over the ornament.
    pub hovered: bool,

    /// The current uniform scale.
    pub scale: f32,

    /// The current emissive intensity.
    pub emissive_intensity: f32,
}

impl Ornament {
    fn new(placement: OrnamentPlacement) -> Self {
        Self {
            placement,
            rotation_y: 0.,
            clicked: false,
            hovered: false,
            scale: 1.,
            emissive_intensity: 0.,
        }
    }
}

/// Every bauble on the tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ornaments {
    ornaments: Vec<Ornament>,
}

impl Ornaments {
    /// Hang ornaments in rings around a tree of the given radius.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, tree_radius: f32) -> Self {
        let ornaments: Vec<_> = placement::ornaments(rng, tree_radius)
            .into_iter()
            .map(Ornament::new)
            .collect();

        debug!(count = ornaments.len(), "Hung ornaments");
        Self { ornaments }
    }

    /// The ornaments.
    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    /// The number of ornaments.
    pub fn len(&self) -> usize {
        self.ornaments.len()
    }

    /// Whether there are no ornaments.
    pub fn is_empty(&self) -> bool {
        self.ornaments.is_empty()
    }

    /// Toggle whether ornament `index` is clicked.
    ///
    /// Returns the index back if the ornament exists, so the host can report which one was
    /// clicked.
    pub fn click(&mut self, index: usize) -> Option<usize> {
        let ornament = self.ornaments.get_mut(index)?;
        ornament.clicked = !ornament.clicked;
        debug!(index, clicked = ornament.clicked, "Clicked ornament");
        Some(index)
    }

    /// Set whether the pointer is over ornament `index`.
    ///
    /// Returns whether the ornament exists.
    pub fn hover(&mut self, index: usize, hovered: bool) -> bool {
        match self.ornaments.get_mut(index) {
            Some(ornament) => {
                ornament.hovered = hovered;
                true
            }
            None => false,
        }
    }
}

impl Animator for Ornaments {
    type Config = ();

    fn tick(&mut self, time: FrameTime, _config: &()) {
        for ornament in &mut self.ornaments {
            ornament.rotation_y += SPIN_SPEED * time.delta;

            (ornament.scale, ornament.emissive_intensity) = if ornament.clicked {
                (1. + 0.1 * (time.elapsed * 5.).sin(), CLICKED_EMISSIVE)
            } else if ornament.hovered {
                (HOVER_SCALE, 0.)
            } else {
                (1., 0.)
            };
        }
    }
}
