use super::blend::*;
use super::error::*;
use super::pen_renderer::*;
use super::render_target::*;
use super::sprite_renderer::*;
use super::touch_renderer::*;
use crate::scene::*;
use crate::transform::*;

///
/// The CPU-based fallback renderer for geometric queries that do not need
/// the GPU effect chain
///
/// Point containment for sprites whose silhouette no effect distorts is
/// cheaper on the CPU (no draw, no readback stall), and colour-based touch
/// queries are always CPU-side. Both are supplied by the embedding layer.
///
pub trait TouchFallback {
    /// Pixel-exact point test for a sprite with no shape-affecting effect
    fn touches_point(&self, sprite: &Sprite, x: f32, y: f32) -> bool;

    /// Colour-based touch query (always CPU-side)
    fn touches_color(&self, sprite: &Sprite, color: [u8; 3]) -> bool;
}

///
/// The scene compositor: owns the sprite rasterizer, pen layer and collision
/// oracle, orchestrates the per-frame draw order and routes geometric queries
///
pub struct StageRenderer {
    sprites: SpriteRenderer,
    pen: PenRenderer,
    touch: TouchRenderer,
    fallback: Box<dyn TouchFallback>,
    zoom: f32,
    viewport: (i32, i32),
}

impl StageRenderer {
    ///
    /// Creates a renderer against the current GL context
    ///
    /// Any setup failure (shader compilation, linking, framebuffer
    /// allocation) aborts construction: there is no degraded renderer.
    ///
    pub fn new(fallback: Box<dyn TouchFallback>) -> RenderResult<StageRenderer> {
        let sprites = SpriteRenderer::new()?;
        let pen     = PenRenderer::new()?;
        let touch   = TouchRenderer::new()?;

        log::debug!("stage renderer initialised ({}x{} stage)", STAGE_WIDTH, STAGE_HEIGHT);

        Ok(StageRenderer {
            sprites,
            pen,
            touch,
            fallback,
            zoom:       1.0,
            viewport:   (STAGE_WIDTH as i32, STAGE_HEIGHT as i32),
        })
    }

    ///
    /// Changes the output scale. This only updates the viewport: content
    /// coordinates stay in stage units and no sprite texture is rebuilt.
    ///
    pub fn resize(&mut self, scale: f32) {
        self.zoom       = scale;
        self.viewport   = ((STAGE_WIDTH * scale).round() as i32, (STAGE_HEIGHT * scale).round() as i32);
    }

    ///
    /// The current output size in pixels
    ///
    pub fn native_size(&self) -> (i32, i32) {
        self.viewport
    }

    ///
    /// The current output scale (1.0 draws one pixel per stage unit)
    ///
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    ///
    /// Renders one frame to the default framebuffer
    ///
    /// The order is fixed: pending pen geometry flushes first, then the
    /// cleared stage surface receives the backdrop, the captured pen layer,
    /// and finally every visible sprite back to front, so later sprites
    /// always paint over earlier ones.
    ///
    pub fn draw_frame(&mut self, stage: &Stage, sprites: &[Sprite]) -> RenderResult<()> {
        if self.pen.has_pending() {
            self.pen.flush()?;
        }

        // Capture before any visible-frame state is set: the copy binds the
        // pen surface, and everything from here on must hit the screen
        let pen_texture = self.pen.capture();

        RenderTarget::bind_default();
        unsafe {
            gl::Viewport(0, 0, self.viewport.0, self.viewport.1);
            gl::Disable(gl::DEPTH_TEST);
            gl::Disable(gl::SCISSOR_TEST);
            gl::Enable(gl::BLEND);
            gl::ClearColor(1.0, 1.0, 1.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        set_blend_mode(BlendMode::SourceOver);

        self.sprites.draw_stage(stage)?;
        self.sprites.draw_overlay(&pen_texture)?;

        for sprite in sprites.iter() {
            if !sprite.visible {
                continue;
            }

            self.sprites.draw_sprite(sprite)?;
        }

        Ok(())
    }

    ///
    /// Queues a pen stroke (colour channels 0-255, alpha 0-1)
    ///
    pub fn pen_line(&mut self, color: [f32; 4], thickness: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> RenderResult<()> {
        self.pen.draw_line(color, thickness, x1, y1, x2, y2)
    }

    ///
    /// Queues a pen dot
    ///
    pub fn pen_dot(&mut self, color: [f32; 4], size: f32, x: f32, y: f32) -> RenderResult<()> {
        self.pen.draw_dot(color, size, x, y)
    }

    ///
    /// Imprints a sprite's current appearance onto the pen layer
    ///
    pub fn pen_stamp(&mut self, sprite: &Sprite) -> RenderResult<()> {
        self.pen.stamp(sprite, &mut self.sprites)
    }

    ///
    /// Clears the pen layer
    ///
    pub fn pen_clear(&mut self) {
        self.pen.clear()
    }

    ///
    /// True if the stage point (x, y) lands on an opaque pixel of the sprite
    ///
    /// Sprites whose active effects cannot change their silhouette go to the
    /// CPU fallback; only shape-affecting effects need the collision oracle.
    ///
    pub fn sprite_touches_point(&mut self, sprite: &Sprite, x: f32, y: f32) -> RenderResult<bool> {
        if sprite.effects.bits().affects_shape() {
            self.touch.contains_point(&mut self.sprites, sprite, x, y)
        } else {
            Ok(self.fallback.touches_point(sprite, x, y))
        }
    }

    ///
    /// True if the sprite overlaps any of the candidates at the pixel level
    ///
    /// The queried sprite is skipped among the candidates by address, so
    /// `sprite` must be a reference into `candidates` rather than a clone for
    /// the self-exclusion to apply.
    ///
    pub fn sprites_intersect(&mut self, sprite: &Sprite, candidates: &[Sprite]) -> RenderResult<bool> {
        self.touch.intersects(&mut self.sprites, sprite, candidates)
    }

    ///
    /// Colour-based touch query, delegated to the CPU fallback unchanged
    ///
    pub fn sprite_touches_color(&self, sprite: &Sprite, color: [u8; 3]) -> bool {
        self.fallback.touches_color(sprite, color)
    }
}
