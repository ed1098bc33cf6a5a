///
/// The blending modes the renderer uses
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlendMode {
    /// Ordinary alpha compositing: new pixels over existing ones
    SourceOver,

    /// Keeps the incoming pixel only where the destination is already opaque:
    /// the incoming contribution is scaled by the destination alpha and the
    /// destination's own contribution is zeroed. The collision oracle's
    /// second draw uses this so a pixel survives only where both sprites
    /// cover it.
    SourceIn,
}

///
/// Applies a blending mode to the current context
///
pub fn set_blend_mode(blend_mode: BlendMode) {
    unsafe {
        match blend_mode {
            BlendMode::SourceOver => gl::BlendFuncSeparate(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA, gl::ONE, gl::ONE_MINUS_SRC_ALPHA),
            BlendMode::SourceIn   => gl::BlendFuncSeparate(gl::DST_ALPHA, gl::ZERO, gl::DST_ALPHA, gl::ZERO),
        }
    }
}
