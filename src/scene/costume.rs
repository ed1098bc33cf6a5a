use std::sync::Arc;

///
/// Identifies a costume for texture-cache keying
///
/// Identities are stable for the lifetime of a session: the renderer uploads
/// each costume's pixels to the GPU at most once and assumes the pixel data
/// behind an ID never changes once loaded.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CostumeId(pub u64);

///
/// A decoded costume image as supplied by the asset layer
///
#[derive(Clone)]
pub struct Costume {
    /// Stable identity used to key the GPU texture cache
    pub id: CostumeId,

    /// Width in costume pixels
    pub width: u32,

    /// Height in costume pixels
    pub height: u32,

    /// The point the sprite rotates around, in costume pixels measured from
    /// the bottom-left corner
    pub rotation_center: (f32, f32),

    /// Intrinsic scale of the costume (2.0 for double-resolution bitmaps):
    /// costume pixels are divided by this to get stage units
    pub resolution: f32,

    /// Decoded RGBA pixels, 4 bytes per pixel, rows top to bottom
    pub pixels: Arc<[u8]>,
}

impl Costume {
    ///
    /// Creates a costume from decoded RGBA pixel data
    ///
    pub fn new(id: CostumeId, width: u32, height: u32, rotation_center: (f32, f32), resolution: f32, pixels: impl Into<Arc<[u8]>>) -> Costume {
        Costume {
            id,
            width,
            height,
            rotation_center,
            resolution,
            pixels: pixels.into()
        }
    }
}
