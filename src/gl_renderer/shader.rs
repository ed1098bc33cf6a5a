use std::ffi::CString;
use std::ops::Deref;
use std::ptr;

use super::error::*;

///
/// The types of shader that can be compiled
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GlShaderType {
    Vertex,
    Fragment,
}

///
/// Abstraction that manages a compiled OpenGL shader
///
pub struct Shader {
    shader_id: gl::types::GLuint,
}

impl Shader {
    ///
    /// Compiles a shader from source with a set of #defines
    ///
    /// A single source file produces every variant of a program: the defines
    /// are prepended after the version directive so the preprocessor selects
    /// which optional sections are compiled in.
    ///
    pub fn compile(source: &str, shader_type: GlShaderType, defines: &[&str]) -> RenderResult<Shader> {
        let source = format!("{}\n\n{}\n{}\n",
            "#version 330 core",
            defines.iter().map(|define| format!("#define {}\n", define)).collect::<Vec<_>>().join(""),
            source);

        let kind = match shader_type {
            GlShaderType::Vertex    => "vertex",
            GlShaderType::Fragment  => "fragment",
        };

        unsafe {
            let shader_id = match shader_type {
                GlShaderType::Vertex    => gl::CreateShader(gl::VERTEX_SHADER),
                GlShaderType::Fragment  => gl::CreateShader(gl::FRAGMENT_SHADER),
            };

            let source_cstr = CString::new(source).expect("shader source contains a NUL byte");
            gl::ShaderSource(shader_id, 1, &source_cstr.as_ptr(), ptr::null());
            gl::CompileShader(shader_id);

            let mut compiled = 0;
            gl::GetShaderiv(shader_id, gl::COMPILE_STATUS, &mut compiled);

            if compiled == 0 {
                let mut log_length = 0;
                gl::GetShaderiv(shader_id, gl::INFO_LOG_LENGTH, &mut log_length);

                let mut log = vec![0u8; log_length.max(1) as usize];
                gl::GetShaderInfoLog(shader_id, log_length, ptr::null_mut(), log.as_mut_ptr() as *mut _);
                gl::DeleteShader(shader_id);

                let log = String::from_utf8_lossy(&log).trim_end_matches('\0').to_string();
                return Err(RenderError::ShaderCompileFailed { kind, log });
            }

            Ok(Shader { shader_id })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.shader_id);
        }
    }
}

impl Deref for Shader {
    type Target = gl::types::GLuint;

    fn deref(&self) -> &gl::types::GLuint {
        &self.shader_id
    }
}
