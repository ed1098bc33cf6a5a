use super::blend::*;
use super::buffer::*;
use super::error::*;
use super::render_target::*;
use super::shader::*;
use super::shader_program::*;
use super::sprite_renderer::*;
use super::texture::*;
use super::vertex_array::*;
use crate::matrix::*;
use crate::scene::*;
use crate::transform::*;

/// Vertices a pen batch can hold before it must be flushed
pub const PEN_VERTEX_CAPACITY: usize = 16384;

/// Floats per vertex in each of the three attribute streams
const ENDS_STRIDE: usize  = 4;
const POLAR_STRIDE: usize = 2;
const COLOR_STRIDE: usize = 4;

///
/// Returns the number of segments used to approximate each semicircular end
/// cap of a stroke
///
pub fn cap_resolution(thickness: f32) -> usize {
    (thickness.ceil().max(3.0)) as usize
}

///
/// Accumulates stroke and dot geometry into three parallel fixed-capacity
/// attribute streams
///
/// Each vertex stores the stroke's raw endpoint pair plus a polar descriptor
/// (an angle from the segment's perpendicular direction, and a radial
/// distance): the vertex shader reconstructs the on-screen position by
/// offsetting the first endpoint along the rotated perpendicular. One small
/// shader therefore produces the variable-width rectangle and the two
/// semicircular end caps of a round-joined stroke.
///
/// The three write cursors advance in lockstep, one vertex at a time; the
/// engine flushes before any append that would overflow a stream, so the
/// buffers can never overrun.
///
pub struct PenBatch {
    ends: Vec<f32>,
    polar: Vec<f32>,
    colors: Vec<f32>,
    ends_cursor: usize,
    polar_cursor: usize,
    color_cursor: usize,
}

impl PenBatch {
    ///
    /// Creates a batch with its streams allocated once, for reuse across
    /// every flush
    ///
    pub fn new() -> PenBatch {
        PenBatch {
            ends:           vec![0.0; PEN_VERTEX_CAPACITY * ENDS_STRIDE],
            polar:          vec![0.0; PEN_VERTEX_CAPACITY * POLAR_STRIDE],
            colors:         vec![0.0; PEN_VERTEX_CAPACITY * COLOR_STRIDE],
            ends_cursor:    0,
            polar_cursor:   0,
            color_cursor:   0,
        }
    }

    ///
    /// The number of vertices currently pending (the endpoint cursor counts
    /// floats, four per vertex)
    ///
    pub fn vertex_count(&self) -> usize {
        self.ends_cursor / ENDS_STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.ends_cursor == 0
    }

    ///
    /// True if all three streams can hold this many more vertices
    ///
    pub fn fits(&self, vertices: usize) -> bool {
        self.ends_cursor + vertices * ENDS_STRIDE <= self.ends.len()
            && self.polar_cursor + vertices * POLAR_STRIDE <= self.polar.len()
            && self.color_cursor + vertices * COLOR_STRIDE <= self.colors.len()
    }

    ///
    /// Resets all three cursors to the start of their streams
    ///
    pub fn reset(&mut self) {
        self.ends_cursor    = 0;
        self.polar_cursor   = 0;
        self.color_cursor   = 0;
    }

    /// The pending prefix of the endpoint-pair stream
    pub fn ends_data(&self) -> &[f32] {
        &self.ends[0..self.ends_cursor]
    }

    /// The pending prefix of the polar-descriptor stream
    pub fn polar_data(&self) -> &[f32] {
        &self.polar[0..self.polar_cursor]
    }

    /// The pending prefix of the colour stream
    pub fn color_data(&self) -> &[f32] {
        &self.colors[0..self.color_cursor]
    }

    /// Cursor positions for all three streams, in floats
    pub fn cursors(&self) -> (usize, usize, usize) {
        (self.ends_cursor, self.polar_cursor, self.color_cursor)
    }

    ///
    /// The vertices a stroke of this thickness requires: one quad for the
    /// body plus one quad per cap segment for each of the two end caps, six
    /// vertices per quad with no indexing or vertex reuse
    ///
    pub fn line_vertex_count(thickness: f32) -> usize {
        6 + cap_resolution(thickness) * 12
    }

    ///
    /// The vertices a dot of this size requires (a dot is a zero-length
    /// stroke: its two caps form the full circle)
    ///
    pub fn dot_vertex_count(size: f32) -> usize {
        Self::line_vertex_count(size)
    }

    ///
    /// Appends the geometry for a thick line segment with round caps
    ///
    /// The caller must have checked `fits(line_vertex_count(thickness))`.
    ///
    pub fn push_line(&mut self, color: [f32; 4], thickness: f32, x1: f32, y1: f32, x2: f32, y2: f32) {
        let ends        = [x1, y1, x2, y2];
        let dx          = x2 - x1;
        let dy          = y2 - y1;
        let length      = (dx*dx + dy*dy).sqrt();
        let (ux, uy)    = if length > 0.0 { (dx/length, dy/length) } else { (1.0, 0.0) };
        let (nx, ny)    = (-uy, ux);
        let half        = thickness / 2.0;
        let cap         = cap_resolution(thickness);

        // The polar descriptor that reconstructs to the given point
        let polar_for = |px: f32, py: f32| -> [f32; 2] {
            let vx = px - x1;
            let vy = py - y1;
            let radius = (vx*vx + vy*vy).sqrt();

            if radius == 0.0 {
                [0.0, 0.0]
            } else {
                [vy.atan2(vx) - ny.atan2(nx), radius]
            }
        };

        // Stroke body: a thickness-wide rectangle along the segment
        let body = [
            (x1 + nx*half, y1 + ny*half),
            (x1 - nx*half, y1 - ny*half),
            (x2 + nx*half, y2 + ny*half),
            (x2 - nx*half, y2 - ny*half),
        ];
        self.push_quad(ends, color, [
            polar_for(body[0].0, body[0].1),
            polar_for(body[1].0, body[1].1),
            polar_for(body[2].0, body[2].1),
            polar_for(body[3].0, body[3].1),
        ]);

        // End caps: each semicircle as `cap` wedge quads around the endpoint.
        // A wedge is a single triangle, so the quad's fourth corner repeats
        // its third: the second triangle collapses to zero area and
        // translucent caps blend each pixel once.
        for segment in 0..cap {
            let phi0 = (segment as f32) * std::f32::consts::PI / (cap as f32);
            let phi1 = ((segment + 1) as f32) * std::f32::consts::PI / (cap as f32);

            // Cap beyond p2, bulging along +u
            let e0 = (x2 + half*(phi0.cos()*nx + phi0.sin()*ux), y2 + half*(phi0.cos()*ny + phi0.sin()*uy));
            let e1 = (x2 + half*(phi1.cos()*nx + phi1.sin()*ux), y2 + half*(phi1.cos()*ny + phi1.sin()*uy));
            self.push_quad(ends, color, [
                polar_for(x2, y2),
                polar_for(e0.0, e0.1),
                polar_for(e1.0, e1.1),
                polar_for(e1.0, e1.1),
            ]);

            // Cap behind p1, bulging along -u
            let s0 = (x1 + half*(phi0.cos()*nx - phi0.sin()*ux), y1 + half*(phi0.cos()*ny - phi0.sin()*uy));
            let s1 = (x1 + half*(phi1.cos()*nx - phi1.sin()*ux), y1 + half*(phi1.cos()*ny - phi1.sin()*uy));
            self.push_quad(ends, color, [
                polar_for(x1, y1),
                polar_for(s0.0, s0.1),
                polar_for(s1.0, s1.1),
                polar_for(s1.0, s1.1),
            ]);
        }
    }

    ///
    /// Appends the geometry for a filled circle of the given diameter
    ///
    pub fn push_dot(&mut self, color: [f32; 4], size: f32, x: f32, y: f32) {
        self.push_line(color, size, x, y, x, y);
    }

    ///
    /// Emits a quad as two triangles, six vertices, no reuse
    ///
    fn push_quad(&mut self, ends: [f32; 4], color: [f32; 4], corners: [[f32; 2]; 4]) {
        self.push_vertex(ends, corners[0], color);
        self.push_vertex(ends, corners[1], color);
        self.push_vertex(ends, corners[2], color);
        self.push_vertex(ends, corners[2], color);
        self.push_vertex(ends, corners[1], color);
        self.push_vertex(ends, corners[3], color);
    }

    fn push_vertex(&mut self, ends: [f32; 4], polar: [f32; 2], color: [f32; 4]) {
        self.ends[self.ends_cursor..self.ends_cursor + ENDS_STRIDE].copy_from_slice(&ends);
        self.polar[self.polar_cursor..self.polar_cursor + POLAR_STRIDE].copy_from_slice(&polar);
        self.colors[self.color_cursor..self.color_cursor + COLOR_STRIDE].copy_from_slice(&color);

        self.ends_cursor    += ENDS_STRIDE;
        self.polar_cursor   += POLAR_STRIDE;
        self.color_cursor   += COLOR_STRIDE;
    }
}

///
/// CPU mirror of the pen vertex shader's position reconstruction, used to
/// verify the emitted polar geometry
///
pub fn resolve_pen_vertex(ends: [f32; 4], polar: [f32; 2]) -> (f32, f32) {
    let [x1, y1, x2, y2]    = ends;
    let dx                  = x2 - x1;
    let dy                  = y2 - y1;
    let length              = (dx*dx + dy*dy).sqrt();
    let (ux, uy)            = if length > 0.0 { (dx/length, dy/length) } else { (1.0, 0.0) };
    let (nx, ny)            = (-uy, ux);

    let angle = ny.atan2(nx) + polar[0];

    (x1 + polar[1] * angle.cos(), y1 + polar[1] * angle.sin())
}

///
/// The pen layer: a persistent offscreen surface that accumulates strokes and
/// stamps until it is explicitly cleared
///
/// Strokes batch up in a [`PenBatch`]; a flush uploads the three streams with
/// a streaming usage hint and issues a single triangle draw. The surface is
/// captured into a compositing texture once per frame, and only when new
/// geometry was drawn since the last capture.
///
pub struct PenRenderer {
    program: ShaderProgram,
    surface: RenderTarget,
    composite_texture: Texture,
    batch: PenBatch,
    ends_buffer: Buffer,
    polar_buffer: Buffer,
    color_buffer: Buffer,
    array: VertexArray,
    dirty: bool,
}

impl PenRenderer {
    pub fn new() -> RenderResult<PenRenderer> {
        let vertex      = Shader::compile(include_str!("../../shaders/pen/pen.glslv"), GlShaderType::Vertex, &[])?;
        let fragment    = Shader::compile(include_str!("../../shaders/pen/pen.glslf"), GlShaderType::Fragment, &[])?;
        let program     = ShaderProgram::from_shaders(vec![vertex, fragment])?;

        let surface     = RenderTarget::new(STAGE_WIDTH as u32, STAGE_HEIGHT as u32)?;

        let mut composite_texture = Texture::new();
        composite_texture.create_empty(STAGE_WIDTH as u32, STAGE_HEIGHT as u32);

        Ok(PenRenderer {
            program,
            surface,
            composite_texture,
            batch:          PenBatch::new(),
            ends_buffer:    Buffer::new(),
            polar_buffer:   Buffer::new(),
            color_buffer:   Buffer::new(),
            array:          VertexArray::new(),
            dirty:          true,
        })
    }

    ///
    /// Queues a thick line segment, flushing first if the pending batch
    /// cannot hold it
    ///
    /// Colour channels are in the 0-255 range with alpha in 0-1; the fragment
    /// stage rescales the colour channels and passes alpha through.
    ///
    pub fn draw_line(&mut self, color: [f32; 4], thickness: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> RenderResult<()> {
        if !self.batch.fits(PenBatch::line_vertex_count(thickness)) {
            self.flush()?;
        }

        self.batch.push_line(color, thickness, x1, y1, x2, y2);
        Ok(())
    }

    ///
    /// Queues a filled dot, flushing first if the pending batch cannot hold it
    ///
    pub fn draw_dot(&mut self, color: [f32; 4], size: f32, x: f32, y: f32) -> RenderResult<()> {
        if !self.batch.fits(PenBatch::dot_vertex_count(size)) {
            self.flush()?;
        }

        self.batch.push_dot(color, size, x, y);
        Ok(())
    }

    ///
    /// True if geometry has been queued since the last flush
    ///
    pub fn has_pending(&self) -> bool {
        !self.batch.is_empty()
    }

    ///
    /// Renders all pending geometry into the pen surface and resets the batch
    ///
    pub fn flush(&mut self) -> RenderResult<()> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let vertex_count = self.batch.vertex_count();
        log::trace!("flushing {} pen vertices", vertex_count);

        self.surface.bind();
        unsafe {
            gl::Viewport(0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32);
            gl::Enable(gl::BLEND);
        }
        set_blend_mode(BlendMode::SourceOver);

        self.program.use_program();
        self.array.bind();

        self.ends_buffer.stream_draw(self.batch.ends_data());
        self.program.bind_attribute("a_line_ends", &self.ends_buffer, ENDS_STRIDE as i32)?;

        self.polar_buffer.stream_draw(self.batch.polar_data());
        self.program.bind_attribute("a_polar", &self.polar_buffer, POLAR_STRIDE as i32)?;

        self.color_buffer.stream_draw(self.batch.color_data());
        self.program.bind_attribute("a_color", &self.color_buffer, COLOR_STRIDE as i32)?;

        self.program.set_uniform_matrix3("u_transform", &stage_projection())?;

        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, vertex_count as gl::types::GLsizei);
        }

        panic_on_gl_error("Flush pen batch");

        self.batch.reset();
        self.dirty = true;

        Ok(())
    }

    ///
    /// Imprints a sprite's current appearance onto the pen surface,
    /// independent of the sprite's own future motion. Pending stroke geometry
    /// flushes first so draw order is preserved.
    ///
    pub fn stamp(&mut self, sprite: &Sprite, sprites: &mut SpriteRenderer) -> RenderResult<()> {
        if self.has_pending() {
            self.flush()?;
        }

        self.surface.bind();
        unsafe {
            gl::Viewport(0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32);
            gl::Enable(gl::BLEND);
        }
        set_blend_mode(BlendMode::SourceOver);

        sprites.draw_sprite(sprite)?;
        self.dirty = true;

        Ok(())
    }

    ///
    /// Clears the pen surface. Pending (unflushed) stroke geometry is
    /// independent of the surface and is not reset.
    ///
    pub fn clear(&mut self) {
        self.surface.bind();
        unsafe {
            gl::ClearColor(0.0, 0.0, 0.0, 0.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.dirty = true;
    }

    ///
    /// The texture to composite this frame, recapturing the surface only if
    /// it changed since the last capture
    ///
    /// The copy reads from the pen surface, so this binds it; the default
    /// framebuffer is rebound before returning so the caller's subsequent
    /// draws go to the screen.
    ///
    pub fn capture(&mut self) -> Texture {
        if self.dirty {
            self.surface.bind();
            unsafe {
                gl::BindTexture(gl::TEXTURE_2D, *self.composite_texture);
                gl::CopyTexSubImage2D(gl::TEXTURE_2D, 0, 0, 0, 0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32);
            }

            panic_on_gl_error("Capture pen surface");

            RenderTarget::bind_default();
            self.dirty = false;
        }

        self.composite_texture.clone()
    }

    ///
    /// Reads back the pen surface contents (for verifying stamp/clear round
    /// trips)
    ///
    pub fn read_surface(&self) -> Vec<u8> {
        self.surface.read_pixels(0, 0, STAGE_WIDTH as i32, STAGE_HEIGHT as i32)
    }
}
