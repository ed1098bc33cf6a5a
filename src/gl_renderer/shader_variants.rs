use std::collections::HashMap;

use super::error::*;
use super::shader::*;
use super::shader_program::*;
use crate::scene::*;

///
/// The two ways the sprite shader renders its output
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DrawMode {
    /// Ordinary rendering: effects applied, near-transparent fragments
    /// discarded
    Default,

    /// Collision-oracle rendering: any sample with non-zero alpha becomes
    /// solid white, everything else transparent black, and the low-alpha
    /// discard is omitted so even near-invisible pixels count as present
    Silhouette,
}

///
/// The collection of compiled sprite-shader variants
///
/// A variant is identified by its draw mode and the set of effects compiled
/// into it; all variants come from a single pair of GLSL sources amended with
/// different #defines. The no-effect default variant is compiled eagerly so
/// that bad source or a broken driver fails renderer construction; the other
/// combinations compile on first use and are then cached, immutable, for the
/// collection's lifetime.
///
pub struct SpriteShaders {
    vertex_source: &'static str,
    fragment_source: &'static str,
    variants: HashMap<(DrawMode, EffectBits), ShaderProgram>,
}

impl SpriteShaders {
    pub fn new() -> RenderResult<SpriteShaders> {
        let mut shaders = SpriteShaders {
            vertex_source:      include_str!("../../shaders/sprite/sprite.glslv"),
            fragment_source:    include_str!("../../shaders/sprite/sprite.glslf"),
            variants:           HashMap::new(),
        };

        shaders.variant(DrawMode::Default, EffectBits::empty())?;

        Ok(shaders)
    }

    ///
    /// The compiled program for a draw mode and set of active effects
    ///
    /// Silhouette variants are restricted to the shape-affecting effects:
    /// colour-only effects never change which pixels are present, so the
    /// oracle never compiles them in.
    ///
    pub fn variant(&mut self, mode: DrawMode, bits: EffectBits) -> RenderResult<&ShaderProgram> {
        let bits = match mode {
            DrawMode::Default    => bits,
            DrawMode::Silhouette => bits.shape_only(),
        };

        if !self.variants.contains_key(&(mode, bits)) {
            log::trace!("compiling sprite shader variant {:?}", (mode, bits));

            let program = Self::compile_variant(self.vertex_source, self.fragment_source, mode, bits)?;
            self.variants.insert((mode, bits), program);
        }

        Ok(&self.variants[&(mode, bits)])
    }

    fn compile_variant(vertex_source: &str, fragment_source: &str, mode: DrawMode, bits: EffectBits) -> RenderResult<ShaderProgram> {
        let mut defines: Vec<&str> = bits.iter().map(|effect| effect.define()).collect();

        if mode == DrawMode::Silhouette {
            defines.push("DRAW_MODE_SILHOUETTE");
        }

        let vertex      = Shader::compile(vertex_source, GlShaderType::Vertex, &defines)?;
        let fragment    = Shader::compile(fragment_source, GlShaderType::Fragment, &defines)?;

        ShaderProgram::from_shaders(vec![vertex, fragment])
    }
}

///
/// The uniform names a sprite-shader variant declares, as implied by its draw
/// mode and effect set
///
/// This is the contract the GLSL sources uphold: each effect uniform appears
/// only inside that effect's #ifdef, so the driver reports exactly this set
/// as active. Colour-only uniforms disappear in silhouette mode because the
/// silhouette output ignores colour.
///
pub fn implied_uniforms(mode: DrawMode, bits: EffectBits) -> Vec<&'static str> {
    let bits = match mode {
        DrawMode::Default    => bits,
        DrawMode::Silhouette => bits.shape_only(),
    };

    let mut uniforms = vec!["u_transform", "u_skin"];

    for effect in bits.iter() {
        uniforms.push(effect.uniform_name());

        if effect == Effect::Pixelate {
            uniforms.push("u_skin_size");
        }
    }

    uniforms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_effects_implies_base_uniforms_only() {
        let uniforms = implied_uniforms(DrawMode::Default, EffectBits::empty());

        assert!(uniforms == vec!["u_transform", "u_skin"], "Unexpected uniforms: {:?}", uniforms);
    }

    #[test]
    fn each_effect_implies_exactly_its_uniform() {
        for effect in ALL_EFFECTS.iter().copied() {
            let bits        = EffectBits::empty().with(effect);
            let uniforms    = implied_uniforms(DrawMode::Default, bits);

            assert!(uniforms.contains(&effect.uniform_name()), "{:?} missing from {:?}", effect, uniforms);

            // Only pixelate drags in the skin size
            let expected_len = if effect == Effect::Pixelate { 4 } else { 3 };
            assert!(uniforms.len() == expected_len, "{:?}: unexpected uniforms {:?}", effect, uniforms);
        }
    }

    #[test]
    fn combined_effects_imply_the_union() {
        let bits        = EffectBits::empty().with(Effect::Whirl).with(Effect::Ghost).with(Effect::Mosaic);
        let uniforms    = implied_uniforms(DrawMode::Default, bits);

        assert!(uniforms.contains(&"u_whirl"));
        assert!(uniforms.contains(&"u_ghost"));
        assert!(uniforms.contains(&"u_mosaic"));
        assert!(!uniforms.contains(&"u_color"));
        assert!(uniforms.len() == 5, "Unexpected uniforms: {:?}", uniforms);
    }

    #[test]
    fn silhouette_variants_drop_colour_uniforms() {
        let bits        = EffectBits::empty().with(Effect::Whirl).with(Effect::Ghost).with(Effect::Brightness);
        let uniforms    = implied_uniforms(DrawMode::Silhouette, bits);

        assert!(uniforms.contains(&"u_whirl"));
        assert!(!uniforms.contains(&"u_ghost"));
        assert!(!uniforms.contains(&"u_brightness"));
    }
}
