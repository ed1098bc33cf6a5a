mod error;
mod blend;
mod buffer;
mod vertex_array;
mod texture;
mod render_target;
mod shader;
mod shader_program;
mod shader_variants;
mod sprite_renderer;
mod pen_renderer;
mod touch_renderer;
mod stage_renderer;

pub use self::error::*;
pub use self::blend::*;
pub use self::buffer::*;
pub use self::vertex_array::*;
pub use self::texture::*;
pub use self::render_target::*;
pub use self::shader::*;
pub use self::shader_program::*;
pub use self::shader_variants::*;
pub use self::sprite_renderer::*;
pub use self::pen_renderer::*;
pub use self::touch_renderer::*;
pub use self::stage_renderer::*;
