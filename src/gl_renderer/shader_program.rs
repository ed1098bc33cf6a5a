use std::collections::HashMap;
use std::ptr;

use super::buffer::*;
use super::error::*;
use super::shader::*;
use crate::matrix::*;

///
/// A linked shader program with every uniform and attribute location resolved
/// and cached at link time
///
/// Construction enumerates everything the driver reports as active and fails
/// fast if any reported name cannot be resolved, so a program that constructs
/// successfully can never miss a location later. Setters fail with a usage
/// error when asked for a name this variant does not declare; callers use the
/// existence predicates to skip effects that are not compiled into a variant.
///
pub struct ShaderProgram {
    program_id: gl::types::GLuint,
    uniforms: HashMap<String, gl::types::GLint>,
    attributes: HashMap<String, gl::types::GLuint>,
}

impl ShaderProgram {
    ///
    /// Creates a program by linking a set of compiled shaders
    ///
    pub fn from_shaders(shaders: Vec<Shader>) -> RenderResult<ShaderProgram> {
        unsafe {
            let program_id = gl::CreateProgram();

            for shader in shaders.iter() {
                gl::AttachShader(program_id, **shader);
            }

            gl::LinkProgram(program_id);

            let mut linked = 0;
            gl::GetProgramiv(program_id, gl::LINK_STATUS, &mut linked);

            if linked == 0 {
                let mut log_length = 0;
                gl::GetProgramiv(program_id, gl::INFO_LOG_LENGTH, &mut log_length);

                let mut log = vec![0u8; log_length.max(1) as usize];
                gl::GetProgramInfoLog(program_id, log_length, ptr::null_mut(), log.as_mut_ptr() as *mut _);
                gl::DeleteProgram(program_id);

                let log = String::from_utf8_lossy(&log).trim_end_matches('\0').to_string();
                return Err(RenderError::ProgramLinkFailed(log));
            }

            let uniforms    = Self::enumerate_uniforms(program_id)?;
            let attributes  = Self::enumerate_attributes(program_id)?;

            panic_on_gl_error("Link shader program");

            Ok(ShaderProgram {
                program_id,
                uniforms,
                attributes
            })
        }
    }

    ///
    /// Resolves the location of every active uniform the driver reports
    ///
    unsafe fn enumerate_uniforms(program_id: gl::types::GLuint) -> RenderResult<HashMap<String, gl::types::GLint>> {
        let mut num_uniforms = 0;
        gl::GetProgramiv(program_id, gl::ACTIVE_UNIFORMS, &mut num_uniforms);

        let mut max_length = 0;
        gl::GetProgramiv(program_id, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_length);

        let mut uniforms = HashMap::new();

        for index in 0..num_uniforms {
            let mut name_buffer = vec![0u8; max_length.max(1) as usize + 1];
            let mut name_length = 0;
            let mut size        = 0;
            let mut gl_type     = 0;

            gl::GetActiveUniform(program_id, index as gl::types::GLuint, name_buffer.len() as gl::types::GLsizei, &mut name_length, &mut size, &mut gl_type, name_buffer.as_mut_ptr() as *mut _);

            let name        = String::from_utf8_lossy(&name_buffer[0..name_length as usize]).to_string();
            let location    = gl::GetUniformLocation(program_id, name_buffer.as_ptr() as *const _);

            if location < 0 {
                return Err(RenderError::UnresolvedLocation { kind: "uniform", name });
            }

            uniforms.insert(name, location);
        }

        Ok(uniforms)
    }

    ///
    /// Resolves the location of every active attribute the driver reports
    ///
    unsafe fn enumerate_attributes(program_id: gl::types::GLuint) -> RenderResult<HashMap<String, gl::types::GLuint>> {
        let mut num_attributes = 0;
        gl::GetProgramiv(program_id, gl::ACTIVE_ATTRIBUTES, &mut num_attributes);

        let mut max_length = 0;
        gl::GetProgramiv(program_id, gl::ACTIVE_ATTRIBUTE_MAX_LENGTH, &mut max_length);

        let mut attributes = HashMap::new();

        for index in 0..num_attributes {
            let mut name_buffer = vec![0u8; max_length.max(1) as usize + 1];
            let mut name_length = 0;
            let mut size        = 0;
            let mut gl_type     = 0;

            gl::GetActiveAttrib(program_id, index as gl::types::GLuint, name_buffer.len() as gl::types::GLsizei, &mut name_length, &mut size, &mut gl_type, name_buffer.as_mut_ptr() as *mut _);

            let name        = String::from_utf8_lossy(&name_buffer[0..name_length as usize]).to_string();
            let location    = gl::GetAttribLocation(program_id, name_buffer.as_ptr() as *const _);

            if location < 0 {
                return Err(RenderError::UnresolvedLocation { kind: "attribute", name });
            }

            attributes.insert(name, location as gl::types::GLuint);
        }

        Ok(attributes)
    }

    ///
    /// True if this program variant declares the named uniform
    ///
    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    ///
    /// True if this program variant declares the named attribute
    ///
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    ///
    /// The names of every uniform this variant declares
    ///
    pub fn uniform_names(&self) -> impl Iterator<Item=&str> {
        self.uniforms.keys().map(|name| name.as_str())
    }

    fn uniform_location(&self, name: &str) -> RenderResult<gl::types::GLint> {
        self.uniforms.get(name)
            .copied()
            .ok_or_else(|| RenderError::MissingUniform(name.to_string()))
    }

    ///
    /// Makes this the active program
    ///
    pub fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.program_id);
        }
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) -> RenderResult<()> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform1f(location, value); }
        Ok(())
    }

    pub fn set_uniform_1i(&self, name: &str, value: i32) -> RenderResult<()> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform1i(location, value); }
        Ok(())
    }

    pub fn set_uniform_2f(&self, name: &str, x: f32, y: f32) -> RenderResult<()> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform2f(location, x, y); }
        Ok(())
    }

    pub fn set_uniform_matrix3(&self, name: &str, matrix: &Matrix) -> RenderResult<()> {
        let location    = self.uniform_location(name)?;
        let values      = matrix.to_uniform();
        unsafe { gl::UniformMatrix3fv(location, 1, gl::FALSE, values.as_ptr()); }
        Ok(())
    }

    ///
    /// Enables an attribute and describes it as tightly-packed floats from
    /// the given buffer (no stride, no offset)
    ///
    pub fn bind_attribute(&self, name: &str, buffer: &Buffer, components: i32) -> RenderResult<()> {
        let location = self.attributes.get(name)
            .copied()
            .ok_or_else(|| RenderError::MissingAttribute(name.to_string()))?;

        unsafe {
            gl::EnableVertexAttribArray(location);
            gl::BindBuffer(gl::ARRAY_BUFFER, **buffer);
            gl::VertexAttribPointer(location, components, gl::FLOAT, gl::FALSE, 0, ptr::null());
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(())
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.program_id);
        }
    }
}
