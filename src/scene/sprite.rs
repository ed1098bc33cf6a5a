use super::bounds::*;
use super::costume::*;
use super::effects::*;

///
/// How a sprite's direction affects its rendered rotation
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RotationStyle {
    /// The sprite rotates freely to face its direction
    AllAround,

    /// The sprite only ever flips horizontally (for negative directions)
    LeftRight,

    /// The sprite is drawn upright regardless of direction
    DontRotate,
}

///
/// Per-sprite state supplied by the scene graph for each draw or query
///
#[derive(Clone)]
pub struct Sprite {
    /// Position of the rotation centre in stage coordinates
    pub position: (f32, f32),

    /// Heading in degrees; 90 is the default 'facing right'
    pub direction: f32,

    pub rotation_style: RotationStyle,

    /// Uniform scale, where 1.0 is 100%
    pub scale: f32,

    pub visible: bool,

    pub costume: Costume,

    pub effects: EffectValues,

    /// Axis-aligned box around the sprite's rotated geometry, computed by the
    /// scene graph; consumed (never recomputed) by the collision oracle
    pub bounds: Bounds,
}

///
/// The stage itself: a backdrop costume with optional colour effects. The
/// stage never rotates, flips or scales the way sprites do.
///
#[derive(Clone)]
pub struct Stage {
    pub costume: Costume,
    pub effects: EffectValues,
}
