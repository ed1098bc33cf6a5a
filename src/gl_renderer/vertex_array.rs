use std::ops::Deref;

///
/// Abstraction that manages an OpenGL vertex array object
///
pub struct VertexArray {
    array_id: gl::types::GLuint,
}

impl VertexArray {
    ///
    /// Creates a new OpenGL vertex array object
    ///
    pub fn new() -> VertexArray {
        unsafe {
            let mut new_array = 0;
            gl::GenVertexArrays(1, &mut new_array);

            VertexArray {
                array_id: new_array
            }
        }
    }

    ///
    /// Makes this the active vertex array
    ///
    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.array_id);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &mut self.array_id);
        }
    }
}

impl Deref for VertexArray {
    type Target = gl::types::GLuint;

    fn deref(&self) -> &gl::types::GLuint {
        &self.array_id
    }
}
