use super::error::*;
use super::texture::*;

///
/// An offscreen render target: a framebuffer with an RGBA texture attachment
///
pub struct RenderTarget {
    frame_buffer: gl::types::GLuint,
    texture: Texture,
    width: u32,
    height: u32,
}

impl RenderTarget {
    ///
    /// Creates a render target of the given size, initially transparent black
    ///
    pub fn new(width: u32, height: u32) -> RenderResult<RenderTarget> {
        unsafe {
            let mut texture = Texture::new();
            texture.create_empty(width, height);

            let mut frame_buffer = 0;
            gl::GenFramebuffers(1, &mut frame_buffer);
            gl::BindFramebuffer(gl::FRAMEBUFFER, frame_buffer);
            gl::FramebufferTexture2D(gl::FRAMEBUFFER, gl::COLOR_ATTACHMENT0, gl::TEXTURE_2D, *texture, 0);

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            if status != gl::FRAMEBUFFER_COMPLETE {
                gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
                gl::DeleteFramebuffers(1, &mut { frame_buffer });

                return Err(RenderError::IncompleteFramebuffer(status));
            }

            gl::ClearColor(0.0, 0.0, 0.0, 0.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);

            panic_on_gl_error("Create render target");

            Ok(RenderTarget {
                frame_buffer,
                texture,
                width,
                height
            })
        }
    }

    ///
    /// The texture backing this render target
    ///
    pub fn texture(&self) -> Texture {
        self.texture.clone()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    ///
    /// Sends rendering instructions to this target
    ///
    pub fn bind(&self) {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.frame_buffer);
        }
    }

    ///
    /// Sends rendering instructions to the default framebuffer
    ///
    pub fn bind_default() {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        }
    }

    ///
    /// Reads back a rectangle of RGBA pixels from this target
    ///
    /// This is a synchronous, blocking call: it stalls until the GPU has
    /// finished all draws previously issued to this target, so draws issued
    /// in sequence are always visible to the readback that follows them.
    ///
    pub fn read_pixels(&self, x: i32, y: i32, width: i32, height: i32) -> Vec<u8> {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];

        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.frame_buffer);
            gl::ReadPixels(x, y, width, height, gl::RGBA, gl::UNSIGNED_BYTE, pixels.as_mut_ptr() as *mut _);

            panic_on_gl_error("Read pixels");
        }

        pixels
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteFramebuffers(1, &mut self.frame_buffer);
        }
    }
}
