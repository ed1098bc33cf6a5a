use std::f32::consts::PI;

///
/// The visual effects a sprite (or the stage) can carry
///
/// The order here is significant: it defines the bit assignment used to
/// identify compiled shader variants, so a given combination of active
/// effects always maps to the same variant key.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Effect {
    Color,
    Fisheye,
    Whirl,
    Pixelate,
    Mosaic,
    Brightness,
    Ghost,
}

/// Every effect, in bit order
pub const ALL_EFFECTS: [Effect; 7] = [
    Effect::Color,
    Effect::Fisheye,
    Effect::Whirl,
    Effect::Pixelate,
    Effect::Mosaic,
    Effect::Brightness,
    Effect::Ghost,
];

impl Effect {
    fn bit(self) -> u32 {
        match self {
            Effect::Color       => 1 << 0,
            Effect::Fisheye     => 1 << 1,
            Effect::Whirl       => 1 << 2,
            Effect::Pixelate    => 1 << 3,
            Effect::Mosaic      => 1 << 4,
            Effect::Brightness  => 1 << 5,
            Effect::Ghost       => 1 << 6,
        }
    }

    ///
    /// True if this effect changes which pixels of a sprite are opaque, as
    /// opposed to only changing their colour or opacity
    ///
    pub fn affects_shape(self) -> bool {
        match self {
            Effect::Fisheye | Effect::Whirl | Effect::Pixelate | Effect::Mosaic => true,
            Effect::Color | Effect::Brightness | Effect::Ghost                  => false,
        }
    }

    ///
    /// The preprocessor define that compiles this effect into a shader variant
    ///
    pub fn define(self) -> &'static str {
        match self {
            Effect::Color       => "ENABLE_COLOR",
            Effect::Fisheye     => "ENABLE_FISHEYE",
            Effect::Whirl       => "ENABLE_WHIRL",
            Effect::Pixelate    => "ENABLE_PIXELATE",
            Effect::Mosaic      => "ENABLE_MOSAIC",
            Effect::Brightness  => "ENABLE_BRIGHTNESS",
            Effect::Ghost       => "ENABLE_GHOST",
        }
    }

    ///
    /// The uniform that carries this effect's mapped value
    ///
    pub fn uniform_name(self) -> &'static str {
        match self {
            Effect::Color       => "u_color",
            Effect::Fisheye     => "u_fisheye",
            Effect::Whirl       => "u_whirl",
            Effect::Pixelate    => "u_pixelate",
            Effect::Mosaic      => "u_mosaic",
            Effect::Brightness  => "u_brightness",
            Effect::Ghost       => "u_ghost",
        }
    }
}

///
/// A set of active effects, identifying a shader variant
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct EffectBits(u32);

impl EffectBits {
    pub fn empty() -> EffectBits {
        EffectBits(0)
    }

    pub fn with(self, effect: Effect) -> EffectBits {
        EffectBits(self.0 | effect.bit())
    }

    pub fn contains(self, effect: Effect) -> bool {
        (self.0 & effect.bit()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    ///
    /// True if any active effect can change a sprite's silhouette
    ///
    pub fn affects_shape(self) -> bool {
        self.iter().any(|effect| effect.affects_shape())
    }

    ///
    /// Restricts this set to the shape-affecting effects (fisheye, whirl,
    /// pixelate, mosaic): the variant used for silhouette rendering
    ///
    pub fn shape_only(self) -> EffectBits {
        let mut bits = EffectBits::empty();
        for effect in self.iter() {
            if effect.affects_shape() {
                bits = bits.with(effect);
            }
        }
        bits
    }

    ///
    /// The active effects, in bit order
    ///
    pub fn iter(self) -> impl Iterator<Item=Effect> {
        ALL_EFFECTS.iter().copied().filter(move |effect| self.contains(*effect))
    }
}

///
/// The numeric effect parameters attached to a sprite or the stage. Values
/// are in the logical ranges the scene graph uses (typically -100..100 or
/// 0..100); [`EffectValues::uniform_value`] maps them to shader terms.
///
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct EffectValues {
    pub color: f32,
    pub fisheye: f32,
    pub whirl: f32,
    pub pixelate: f32,
    pub mosaic: f32,
    pub brightness: f32,
    pub ghost: f32,
}

impl EffectValues {
    ///
    /// The raw logical value for one effect
    ///
    pub fn get(&self, effect: Effect) -> f32 {
        match effect {
            Effect::Color       => self.color,
            Effect::Fisheye     => self.fisheye,
            Effect::Whirl       => self.whirl,
            Effect::Pixelate    => self.pixelate,
            Effect::Mosaic      => self.mosaic,
            Effect::Brightness  => self.brightness,
            Effect::Ghost       => self.ghost,
        }
    }

    ///
    /// The set of effects whose value differs from the default
    ///
    pub fn bits(&self) -> EffectBits {
        let mut bits = EffectBits::empty();
        for effect in ALL_EFFECTS.iter().copied() {
            if self.get(effect) != 0.0 {
                bits = bits.with(effect);
            }
        }
        bits
    }

    ///
    /// Maps a logical effect value to the value its shader uniform carries.
    ///
    /// These mappings are pure and stateless. Out-of-range inputs are clamped
    /// rather than rejected, so the result is always usable by the shader.
    ///
    pub fn uniform_value(effect: Effect, raw: f32) -> f32 {
        match effect {
            // Ghost is an opacity: 100 ghost = fully transparent
            Effect::Ghost       => 1.0 - raw.max(0.0).min(100.0) / 100.0,

            Effect::Brightness  => raw.max(-100.0).min(100.0) / 100.0,

            // The shader wraps the hue shift with fract(), so no clamp here
            Effect::Color       => raw / 200.0,

            Effect::Mosaic      => ((raw.abs() + 10.0) / 10.0).round().max(1.0).min(512.0),

            // Radians, sign-inverted
            Effect::Whirl       => raw * PI / -180.0,

            Effect::Fisheye     => ((raw + 100.0) / 100.0).max(0.0),

            Effect::Pixelate    => raw.abs() / 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mosaic_mapping_stays_in_range() {
        // Any finite input must land in [1, 512]
        for &raw in &[0.0, 1.0, -1.0, 5.0, 100.0, -10000.0, 1.0e30, -1.0e30, f32::MAX, f32::MIN] {
            let mapped = EffectValues::uniform_value(Effect::Mosaic, raw);
            assert!(mapped >= 1.0 && mapped <= 512.0, "mosaic({}) = {}", raw, mapped);
        }
    }

    #[test]
    fn mosaic_mapping_rounds() {
        assert!(EffectValues::uniform_value(Effect::Mosaic, 0.0) == 1.0);
        assert!(EffectValues::uniform_value(Effect::Mosaic, 25.0) == 4.0);
        assert!(EffectValues::uniform_value(Effect::Mosaic, -25.0) == 4.0);
    }

    #[test]
    fn ghost_maps_to_opacity() {
        assert!(EffectValues::uniform_value(Effect::Ghost, 0.0) == 1.0);
        assert!(EffectValues::uniform_value(Effect::Ghost, 100.0) == 0.0);
        assert!(EffectValues::uniform_value(Effect::Ghost, 50.0) == 0.5);

        // Out-of-range inputs clamp
        assert!(EffectValues::uniform_value(Effect::Ghost, 250.0) == 0.0);
        assert!(EffectValues::uniform_value(Effect::Ghost, -50.0) == 1.0);
    }

    #[test]
    fn fisheye_never_goes_negative() {
        assert!(EffectValues::uniform_value(Effect::Fisheye, -500.0) == 0.0);
        assert!(EffectValues::uniform_value(Effect::Fisheye, 0.0) == 1.0);
    }

    #[test]
    fn whirl_inverts_sign_in_radians() {
        let mapped = EffectValues::uniform_value(Effect::Whirl, 180.0);
        assert!((mapped + PI).abs() < 1e-6, "whirl(180) = {}", mapped);
    }

    #[test]
    fn default_values_enable_nothing() {
        let values = EffectValues::default();
        assert!(values.bits().is_empty());
        assert!(!values.bits().affects_shape());
    }

    #[test]
    fn colour_only_effects_do_not_affect_shape() {
        let values = EffectValues { ghost: 50.0, brightness: 20.0, color: 10.0, ..EffectValues::default() };

        assert!(!values.bits().affects_shape());
        assert!(values.bits().shape_only().is_empty());
    }

    #[test]
    fn shape_effects_are_detected() {
        let values = EffectValues { whirl: 10.0, ghost: 50.0, ..EffectValues::default() };
        let bits   = values.bits();

        assert!(bits.affects_shape());

        // The silhouette restriction drops the ghost effect but keeps whirl
        let shape = bits.shape_only();
        assert!(shape.contains(Effect::Whirl));
        assert!(!shape.contains(Effect::Ghost));
    }
}
