use std::mem;
use std::ops::Deref;

///
/// Abstraction that manages an OpenGL data buffer
///
pub struct Buffer {
    buffer_id: gl::types::GLuint,
}

impl Buffer {
    ///
    /// Creates a new OpenGL buffer object
    ///
    pub fn new() -> Buffer {
        unsafe {
            let mut new_buffer = 0;
            gl::GenBuffers(1, &mut new_buffer);

            Buffer {
                buffer_id: new_buffer
            }
        }
    }

    ///
    /// Loads static data into this buffer (written once, drawn many times)
    ///
    pub fn static_draw<TElement: Copy>(&mut self, data: &[TElement]) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.buffer_id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * mem::size_of::<TElement>()) as gl::types::GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STATIC_DRAW);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }

    ///
    /// Loads streaming data into this buffer (written and drawn once per
    /// batch, then discarded)
    ///
    pub fn stream_draw(&mut self, data: &[f32]) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.buffer_id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * mem::size_of::<f32>()) as gl::types::GLsizeiptr,
                data.as_ptr() as *const _,
                gl::STREAM_DRAW);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &mut self.buffer_id);
        }
    }
}

impl Deref for Buffer {
    type Target = gl::types::GLuint;

    fn deref(&self) -> &gl::types::GLuint {
        &self.buffer_id
    }
}
