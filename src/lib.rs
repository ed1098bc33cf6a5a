//! `stage_render` renders a 2D animated scene - a stage plus a dynamic set of
//! sprites - onto a GPU surface using OpenGL. It applies a fixed set of visual
//! distortion and colour effects per sprite, composites a persistent vector
//! 'pen' layer, and answers exact per-pixel geometric queries: does a screen
//! point land on an opaque sprite pixel, and do two sprites overlap at the
//! pixel level.
//!
//! The higher-level scene graph (the sprite list, costume catalogue and stage
//! object) lives outside of this crate and supplies its state per call: see
//! the `scene` module for the data this crate consumes. Context creation is
//! also external: the caller must make an OpenGL 3.3 context current and load
//! the function pointers (`gl::load_with`) before constructing a renderer.
//!
//! The main entry point is [`StageRenderer`], which owns the sprite
//! rasterizer, the pen layer and the collision oracle and exposes the
//! per-frame and per-query operations.

mod matrix;
mod transform;
pub mod scene;
mod gl_renderer;

pub use self::matrix::*;
pub use self::transform::*;
pub use self::gl_renderer::*;
