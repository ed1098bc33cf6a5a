use stage_render::*;
use stage_render::scene::*;

fn close(actual: (f32, f32), expected: (f32, f32)) -> bool {
    (actual.0 - expected.0).abs() < 1e-3 && (actual.1 - expected.1).abs() < 1e-3
}

fn test_costume(width: u32, height: u32) -> Costume {
    let pixels = vec![0u8; (width*height*4) as usize];
    Costume::new(CostumeId(1), width, height, (width as f32/2.0, height as f32/2.0), 1.0, pixels)
}

fn test_sprite(costume: Costume) -> Sprite {
    Sprite {
        position:       (0.0, 0.0),
        direction:      90.0,
        rotation_style: RotationStyle::AllAround,
        scale:          1.0,
        visible:        true,
        costume:        costume,
        effects:        EffectValues::default(),
        bounds:         Bounds { left: 0.0, right: 0.0, bottom: 0.0, top: 0.0 },
    }
}

#[test]
fn default_sprite_quad_is_centred_on_its_position() {
    // A 20x10 costume with a centred rotation centre, at stage position (30, 40)
    let mut sprite  = test_sprite(test_costume(20, 10));
    sprite.position = (30.0, 40.0);

    let matrix = sprite_model_matrix(&sprite);

    assert!(close(matrix.transform_point(0.0, 0.0), (20.0, 35.0)));
    assert!(close(matrix.transform_point(1.0, 1.0), (40.0, 45.0)));
    assert!(close(matrix.transform_point(0.5, 0.5), (30.0, 40.0)));
}

#[test]
fn direction_zero_rotates_a_quarter_turn_anticlockwise() {
    // Direction 0 is 'up': the quad's right edge should point upwards
    let mut sprite      = test_sprite(test_costume(2, 2));
    sprite.direction    = 0.0;

    let matrix = sprite_model_matrix(&sprite);

    // (1, 0.5) is the costume's right edge midpoint, one unit right of centre
    assert!(close(matrix.transform_point(1.0, 0.5), (0.0, 1.0)));
}

#[test]
fn direction_180_rotates_a_quarter_turn_clockwise() {
    let mut sprite      = test_sprite(test_costume(2, 2));
    sprite.direction    = 180.0;

    let matrix = sprite_model_matrix(&sprite);

    assert!(close(matrix.transform_point(1.0, 0.5), (0.0, -1.0)));
}

#[test]
fn left_right_style_only_ever_flips() {
    let mut sprite          = test_sprite(test_costume(2, 2));
    sprite.rotation_style   = RotationStyle::LeftRight;

    // A positive direction draws the costume unchanged
    sprite.direction = 45.0;
    let matrix = sprite_model_matrix(&sprite);
    assert!(close(matrix.transform_point(1.0, 0.5), (1.0, 0.0)));

    // A negative direction mirrors it horizontally
    sprite.direction = -45.0;
    let matrix = sprite_model_matrix(&sprite);
    assert!(close(matrix.transform_point(1.0, 0.5), (-1.0, 0.0)));
}

#[test]
fn dont_rotate_style_ignores_direction() {
    let mut sprite          = test_sprite(test_costume(2, 2));
    sprite.rotation_style   = RotationStyle::DontRotate;
    sprite.direction        = -135.0;

    let matrix = sprite_model_matrix(&sprite);

    assert!(close(matrix.transform_point(1.0, 0.5), (1.0, 0.0)));
}

#[test]
fn sprite_scale_applies_after_the_resolution_divide() {
    // A double-resolution 40x40 costume at 150% covers 30x30 stage units
    let mut costume         = test_costume(40, 40);
    costume.resolution      = 2.0;
    let mut sprite          = test_sprite(costume);
    sprite.scale            = 1.5;

    let matrix = sprite_model_matrix(&sprite);

    assert!(close(matrix.transform_point(0.0, 0.0), (-15.0, -15.0)));
    assert!(close(matrix.transform_point(1.0, 1.0), (15.0, 15.0)));
}

#[test]
fn stage_matrix_never_rotates_or_scales() {
    let backdrop    = test_costume(480, 360);
    let matrix      = stage_model_matrix(&backdrop);

    assert!(close(matrix.transform_point(0.0, 0.0), (-240.0, -180.0)));
    assert!(close(matrix.transform_point(1.0, 1.0), (240.0, 180.0)));
}

#[test]
fn overlay_matrix_stretches_the_unit_quad_over_the_stage() {
    let matrix = overlay_model_matrix();

    assert!(close(matrix.transform_point(0.0, 0.0), (-240.0, -180.0)));
    assert!(close(matrix.transform_point(1.0, 1.0), (240.0, 180.0)));
    assert!(close(matrix.transform_point(0.5, 0.5), (0.0, 0.0)));
}

#[test]
fn stage_to_pixel_offsets_before_truncating() {
    assert!(stage_to_pixel(0.0, 0.0) == (240, 180));
    assert!(stage_to_pixel(0.5, 0.5) == (240, 180));
    assert!(stage_to_pixel(1.5, 2.5) == (241, 182));

    // Negative fractional coordinates truncate the offset sum, not the
    // coordinate: -0.5 lands on pixel 239, not 240
    assert!(stage_to_pixel(-0.5, -0.5) == (239, 179));
    assert!(stage_to_pixel(-1.0, -1.0) == (239, 179));
    assert!(stage_to_pixel(-239.7, -179.9) == (0, 0));
}

#[test]
fn projection_maps_stage_corners_to_clip_corners() {
    let projection = stage_projection();

    assert!(close(projection.transform_point(240.0, 180.0), (1.0, 1.0)));
    assert!(close(projection.transform_point(-240.0, -180.0), (-1.0, -1.0)));
    assert!(close(projection.transform_point(0.0, 0.0), (0.0, 0.0)));
}
