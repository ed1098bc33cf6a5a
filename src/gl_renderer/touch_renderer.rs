use super::blend::*;
use super::error::*;
use super::render_target::*;
use super::shader_variants::*;
use super::sprite_renderer::*;
use crate::scene::*;
use crate::transform::*;

///
/// The collision oracle: answers exact, per-pixel geometric queries by
/// rendering silhouettes into an offscreen surface and reading pixels back
///
/// This shares the sprite rasterizer's transform and effect pipeline but
/// substitutes the silhouette fragment stage, which collapses any
/// non-transparent sample to solid white and everything else to transparent
/// black. Scissoring restricts pairwise overlap tests to the intersection of
/// the two bounding boxes, so the readback is as small as the question.
///
/// Every query sets its complete GL state before drawing and restores the
/// full-viewport scissor afterwards; readbacks are synchronous and block
/// until the preceding draws complete.
///
pub struct TouchRenderer {
    surface: RenderTarget,
}

impl TouchRenderer {
    pub fn new() -> RenderResult<TouchRenderer> {
        Ok(TouchRenderer {
            surface: RenderTarget::new(STAGE_WIDTH as u32, STAGE_HEIGHT as u32)?
        })
    }

    ///
    /// True if the stage point (x, y) lands on a pixel the sprite covers
    ///
    /// Callers route sprites with no shape-affecting effect to the CPU
    /// fallback instead; this path exists for the sprites whose silhouette
    /// only the GPU effect chain can reproduce.
    ///
    pub fn contains_point(&mut self, sprites: &mut SpriteRenderer, sprite: &Sprite, x: f32, y: f32) -> RenderResult<bool> {
        let (pixel_x, pixel_y) = stage_to_pixel(x, y);

        if pixel_x < 0 || pixel_y < 0 || pixel_x >= STAGE_WIDTH as i32 || pixel_y >= STAGE_HEIGHT as i32 {
            return Ok(false);
        }

        self.surface.bind();
        unsafe {
            gl::Viewport(0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32);
            gl::Disable(gl::SCISSOR_TEST);
            gl::ClearColor(0.0, 0.0, 0.0, 0.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::Enable(gl::BLEND);
        }
        set_blend_mode(BlendMode::SourceOver);

        sprites.draw_with_variant(sprite, DrawMode::Silhouette)?;

        let pixel = self.surface.read_pixels(pixel_x, pixel_y, 1, 1);

        Ok(pixel[3] != 0)
    }

    ///
    /// True if the sprite overlaps any of the candidates at the pixel level
    ///
    /// Candidates that are invisible, are the queried sprite itself, or whose
    /// bounding box cannot overlap are skipped without any GPU work. For the
    /// rest, the scissor narrows to the bounding-box intersection, the sprite
    /// renders source-over, the candidate renders with destination-alpha
    /// blending so only mutually-covered pixels survive, and the scissored
    /// region reads back.
    ///
    /// The self-skip is by address: `sprite` must be a reference into
    /// `candidates` (not a clone) for the queried sprite to be excluded, as a
    /// sprite always pixel-overlaps a copy of itself.
    ///
    pub fn intersects(&mut self, sprites: &mut SpriteRenderer, sprite: &Sprite, candidates: &[Sprite]) -> RenderResult<bool> {
        for candidate in candidates.iter() {
            if !candidate.visible {
                continue;
            }
            if std::ptr::eq(sprite, candidate) {
                continue;
            }
            if sprite.bounds.disjoint(&candidate.bounds) {
                continue;
            }

            let overlap = match sprite.bounds.intersection(&candidate.bounds) {
                Some(overlap)   => overlap,
                None            => continue,
            };
            let region = overlap.to_pixel_rect().clip_to_surface(STAGE_WIDTH as i32, STAGE_HEIGHT as i32);

            self.surface.bind();
            unsafe {
                gl::Viewport(0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32);
                gl::Enable(gl::SCISSOR_TEST);
                gl::Scissor(region.x, region.y, region.width, region.height);
                gl::ClearColor(0.0, 0.0, 0.0, 0.0);
                gl::Clear(gl::COLOR_BUFFER_BIT);
                gl::Enable(gl::BLEND);
            }

            set_blend_mode(BlendMode::SourceOver);
            sprites.draw_with_variant(sprite, DrawMode::Silhouette)?;

            set_blend_mode(BlendMode::SourceIn);
            sprites.draw_with_variant(candidate, DrawMode::Silhouette)?;

            let pixels = self.surface.read_pixels(region.x, region.y, region.width, region.height);

            // Restore the full-viewport scissor before the next candidate
            unsafe {
                gl::Scissor(0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32);
                gl::Disable(gl::SCISSOR_TEST);
            }
            set_blend_mode(BlendMode::SourceOver);

            if pixels.chunks_exact(4).any(|pixel| pixel[3] != 0) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
