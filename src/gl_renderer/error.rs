use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

///
/// Errors raised by the rendering core
///
/// Setup errors (shader compilation, linking, framebuffer allocation,
/// unresolved locations) are fatal: there is no partial or degraded renderer,
/// so construction aborts. Usage errors (a uniform or attribute that the
/// active shader variant does not declare) surface variant mismatches to the
/// caller instead of silently doing nothing.
///
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not compile {kind} shader: {log}")]
    ShaderCompileFailed { kind: &'static str, log: String },

    #[error("could not link shader program: {0}")]
    ProgramLinkFailed(String),

    #[error("shader program reported an active {kind} '{name}' with no resolvable location")]
    UnresolvedLocation { kind: &'static str, name: String },

    #[error("framebuffer is incomplete (status {0:#x})")]
    IncompleteFramebuffer(u32),

    #[error("uniform '{0}' is not declared by the active shader variant")]
    MissingUniform(String),

    #[error("attribute '{0}' is not declared by the active shader variant")]
    MissingAttribute(String),
}

///
/// Checks the GL error flag, panicking with a description if an operation
/// failed. GPU operations are assumed to either succeed or indicate an
/// unrecoverable environment problem, so there is no retry path.
///
pub fn panic_on_gl_error(context: &str) {
    let error = unsafe { gl::GetError() };

    if error != gl::NO_ERROR {
        panic!("Unexpected OpenGL error {:#x} ({})", error, context);
    }
}
