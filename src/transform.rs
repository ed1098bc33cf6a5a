use crate::matrix::*;
use crate::scene::*;

/// Logical stage size in stage units, centred at the origin
pub const STAGE_WIDTH: f32  = 480.0;
pub const STAGE_HEIGHT: f32 = 360.0;

/// Offsets that map stage coordinates to readback pixel coordinates (the
/// readback origin is the lower-left corner of the stage surface)
pub const QUERY_X_OFFSET: i32 = 240;
pub const QUERY_Y_OFFSET: i32 = 180;

///
/// Maps a stage point to readback pixel coordinates
///
/// The offset applies before the truncation toward zero, so negative
/// fractional coordinates land on the pixel below the offset (stage x of
/// -0.5 is pixel 239, not 240).
///
pub fn stage_to_pixel(x: f32, y: f32) -> (i32, i32) {
    ((QUERY_X_OFFSET as f32 + x) as i32, (QUERY_Y_OFFSET as f32 + y) as i32)
}

///
/// The projection from stage coordinates to clip space. Zooming only changes
/// the viewport in pixels; content coordinates stay in stage units.
///
pub fn stage_projection() -> Matrix {
    Matrix::scale(2.0 / STAGE_WIDTH, 2.0 / STAGE_HEIGHT)
}

///
/// Composes the transform that places a sprite's unit quad (texture
/// coordinate space, 0..1 in both axes) on the stage.
///
/// The steps pre-multiply in this order, so they apply to the quad
/// right-to-left: translation to the stage position, rotation-style-dependent
/// rotation or flip, uniform sprite scale, costume resolution scale,
/// translation by the negated rotation centre, scale by the costume's pixel
/// size.
///
pub fn sprite_model_matrix(sprite: &Sprite) -> Matrix {
    let costume         = &sprite.costume;
    let (x, y)          = sprite.position;
    let (center_x, center_y) = costume.rotation_center;

    let mut matrix = Matrix::translate(x, y);

    match sprite.rotation_style {
        RotationStyle::AllAround => {
            if sprite.direction != 90.0 {
                matrix = matrix * Matrix::rotate((90.0 - sprite.direction).to_radians());
            }
        }

        RotationStyle::LeftRight => {
            if sprite.direction < 0.0 {
                matrix = matrix * Matrix::scale(-1.0, 1.0);
            }
        }

        RotationStyle::DontRotate => { }
    }

    matrix = matrix * Matrix::scale(sprite.scale, sprite.scale);
    matrix = matrix * Matrix::scale(1.0 / costume.resolution, 1.0 / costume.resolution);
    matrix = matrix * Matrix::translate(-center_x, -center_y);
    matrix = matrix * Matrix::scale(costume.width as f32, costume.height as f32);

    matrix
}

///
/// The transform for the stage backdrop: the costume steps only, never the
/// sprite rotation/flip/scale steps.
///
pub fn stage_model_matrix(costume: &Costume) -> Matrix {
    let (center_x, center_y) = costume.rotation_center;

    Matrix::scale(1.0 / costume.resolution, 1.0 / costume.resolution)
        * Matrix::translate(-center_x, -center_y)
        * Matrix::scale(costume.width as f32, costume.height as f32)
}

///
/// The transform that stretches a full-stage texture (such as the captured
/// pen surface) over the whole stage.
///
pub fn overlay_model_matrix() -> Matrix {
    Matrix::translate(-STAGE_WIDTH / 2.0, -STAGE_HEIGHT / 2.0)
        * Matrix::scale(STAGE_WIDTH, STAGE_HEIGHT)
}
