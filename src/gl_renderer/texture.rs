use std::ptr;
use std::rc::*;
use std::ops::Deref;

use super::error::*;

struct TextureRef {
    texture_id: gl::types::GLuint,
}

///
/// Abstraction that manages an OpenGL RGBA texture
///
/// Textures are cheaply cloneable: clones share the underlying GL object,
/// which is deleted when the last clone is dropped.
///
#[derive(Clone)]
pub struct Texture {
    texture: Rc<TextureRef>,
}

impl Texture {
    ///
    /// Creates a new OpenGL texture object
    ///
    pub fn new() -> Texture {
        unsafe {
            let mut new_texture = 0;
            gl::GenTextures(1, &mut new_texture);

            Texture {
                texture: Rc::new(TextureRef { texture_id: new_texture })
            }
        }
    }

    ///
    /// Associates an empty image with this texture
    ///
    /// Sampling is nearest-neighbour: the pixel-exact touch queries must not
    /// see filtering blur along costume edges.
    ///
    pub fn create_empty(&mut self, width: u32, height: u32) {
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.texture.texture_id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);

            gl::TexImage2D(gl::TEXTURE_2D, 0, gl::RGBA as i32, width as gl::types::GLsizei, height as gl::types::GLsizei, 0, gl::RGBA, gl::UNSIGNED_BYTE, ptr::null());

            panic_on_gl_error("Create texture");
        }
    }

    ///
    /// Sets 8-bit RGBA pixel data for a region of this texture
    ///
    pub fn set_data_rgba(&mut self, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        if pixels.len() != (width as usize * height as usize * 4) {
            panic!("set_data_rgba called with incorrect sized pixel array")
        }

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.texture.texture_id);
            gl::TexSubImage2D(gl::TEXTURE_2D, 0, x as _, y as _, width as _, height as _, gl::RGBA, gl::UNSIGNED_BYTE, pixels.as_ptr() as _);

            panic_on_gl_error("Set rgba data");
        }
    }
}

impl Drop for TextureRef {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &mut self.texture_id);
        }
    }
}

impl Deref for Texture {
    type Target = gl::types::GLuint;

    fn deref(&self) -> &gl::types::GLuint {
        &self.texture.texture_id
    }
}
