use std::collections::HashMap;

use super::buffer::*;
use super::error::*;
use super::shader_variants::*;
use super::texture::*;
use super::vertex_array::*;
use crate::matrix::*;
use crate::scene::*;
use crate::transform::*;

/// The shared unit quad: two triangles covering texture-coordinate space 0..1
const QUAD_VERTICES: [f32; 12] = [
    0.0, 0.0,  1.0, 0.0,  0.0, 1.0,
    1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
];

///
/// Draws sprites and the stage backdrop as transformed, effect-shaded quads
///
/// Costume pixels upload lazily on first draw into an identity-keyed texture
/// cache: at most one texture exists per costume, entries are never evicted
/// within a session, and every GPU handle is released when the renderer is
/// dropped.
///
pub struct SpriteRenderer {
    shaders: SpriteShaders,
    quad: Buffer,
    quad_array: VertexArray,
    costume_textures: HashMap<CostumeId, Texture>,
    projection: Matrix,
}

impl SpriteRenderer {
    pub fn new() -> RenderResult<SpriteRenderer> {
        let shaders     = SpriteShaders::new()?;
        let quad_array  = VertexArray::new();
        let mut quad    = Buffer::new();
        quad.static_draw(&QUAD_VERTICES);

        panic_on_gl_error("Create sprite renderer");

        Ok(SpriteRenderer {
            shaders,
            quad,
            quad_array,
            costume_textures: HashMap::new(),
            projection: stage_projection(),
        })
    }

    ///
    /// Renders one sprite with the full-effects variant
    ///
    pub fn draw_sprite(&mut self, sprite: &Sprite) -> RenderResult<()> {
        self.draw_with_variant(sprite, DrawMode::Default)
    }

    ///
    /// Renders one sprite with the variant for the given draw mode (the
    /// collision oracle reuses this for its silhouette draws)
    ///
    pub fn draw_with_variant(&mut self, sprite: &Sprite, mode: DrawMode) -> RenderResult<()> {
        let transform = self.projection * sprite_model_matrix(sprite);

        self.draw_quad(&sprite.costume, transform, mode, sprite.effects)
    }

    ///
    /// Renders the stage backdrop (no sprite rotation, flip or scale steps)
    ///
    pub fn draw_stage(&mut self, stage: &Stage) -> RenderResult<()> {
        let transform = self.projection * stage_model_matrix(&stage.costume);

        self.draw_quad(&stage.costume, transform, DrawMode::Default, stage.effects)
    }

    ///
    /// Renders an arbitrary texture as a full-stage overlay with no effects
    /// (used to composite the captured pen surface each frame)
    ///
    pub fn draw_overlay(&mut self, texture: &Texture) -> RenderResult<()> {
        let transform   = self.projection * overlay_model_matrix();
        let program     = self.shaders.variant(DrawMode::Default, EffectBits::empty())?;

        program.use_program();
        self.quad_array.bind();
        program.bind_attribute("a_position", &self.quad, 2)?;
        program.set_uniform_matrix3("u_transform", &transform)?;

        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, **texture);
        }
        program.set_uniform_1i("u_skin", 0)?;

        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, 6);
        }

        panic_on_gl_error("Draw overlay");

        Ok(())
    }

    ///
    /// Binds a program variant, the costume texture and the shared quad, sets
    /// only the uniforms the variant declares, and issues one 6-vertex draw
    ///
    fn draw_quad(&mut self, costume: &Costume, transform: Matrix, mode: DrawMode, effects: EffectValues) -> RenderResult<()> {
        // In silhouette mode only the shape-affecting effects exist in the variant
        let bits = match mode {
            DrawMode::Default    => effects.bits(),
            DrawMode::Silhouette => effects.bits().shape_only(),
        };

        let texture = Self::costume_texture(&mut self.costume_textures, costume);
        let program = self.shaders.variant(mode, bits)?;

        program.use_program();
        self.quad_array.bind();
        program.bind_attribute("a_position", &self.quad, 2)?;
        program.set_uniform_matrix3("u_transform", &transform)?;

        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, texture);
        }
        program.set_uniform_1i("u_skin", 0)?;

        for effect in bits.iter() {
            let value = EffectValues::uniform_value(effect, effects.get(effect));
            program.set_uniform_1f(effect.uniform_name(), value)?;

            if effect == Effect::Pixelate {
                program.set_uniform_2f("u_skin_size", costume.width as f32, costume.height as f32)?;
            }
        }

        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, 6);
        }

        panic_on_gl_error("Draw quad");

        Ok(())
    }

    ///
    /// The cached texture for a costume, uploading the pixels on first sight
    ///
    fn costume_texture(textures: &mut HashMap<CostumeId, Texture>, costume: &Costume) -> gl::types::GLuint {
        let texture = textures.entry(costume.id).or_insert_with(|| {
            log::trace!("uploading costume {:?} ({}x{})", costume.id, costume.width, costume.height);

            let mut texture = Texture::new();
            texture.create_empty(costume.width, costume.height);
            texture.set_data_rgba(0, 0, costume.width, costume.height, &costume.pixels);
            texture
        });

        **texture
    }
}
