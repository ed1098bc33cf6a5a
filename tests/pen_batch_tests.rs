use stage_render::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Distance from a point to the segment (x1,y1)-(x2,y2)
fn distance_to_segment(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx*dx + dy*dy;

    let t = if len_sq > 0.0 {
        (((px - x1)*dx + (py - y1)*dy) / len_sq).max(0.0).min(1.0)
    } else {
        0.0
    };

    let cx = x1 + t*dx;
    let cy = y1 + t*dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Every vertex of the batch, reconstructed the way the vertex shader would
fn reconstructed_vertices(batch: &PenBatch) -> Vec<(f32, f32)> {
    let ends    = batch.ends_data();
    let polar   = batch.polar_data();

    (0..batch.vertex_count())
        .map(|vertex| {
            let e = [ends[vertex*4], ends[vertex*4+1], ends[vertex*4+2], ends[vertex*4+3]];
            let p = [polar[vertex*2], polar[vertex*2+1]];
            resolve_pen_vertex(e, p)
        })
        .collect()
}

#[test]
fn cap_resolution_has_a_floor() {
    assert!(cap_resolution(1.0) == 3);
    assert!(cap_resolution(0.1) == 3);
    assert!(cap_resolution(4.0) == 4);
    assert!(cap_resolution(4.5) == 5);
}

#[test]
fn line_vertex_count_matches_geometry() {
    // One body quad plus cap_resolution quads per end cap, 6 vertices each
    let mut batch = PenBatch::new();
    batch.push_line([255.0, 0.0, 0.0, 1.0], 4.0, 0.0, 0.0, 10.0, 0.0);

    assert!(batch.vertex_count() == PenBatch::line_vertex_count(4.0), "Unexpected count: {}", batch.vertex_count());
    assert!(batch.vertex_count() == 6 + 4*12);
}

#[test]
fn cursors_advance_in_lockstep() {
    let mut batch = PenBatch::new();
    batch.push_line([0.0, 0.0, 255.0, 1.0], 2.0, -5.0, 3.0, 7.0, 3.0);
    batch.push_dot([0.0, 255.0, 0.0, 1.0], 6.0, 1.0, 1.0);

    let (ends, polar, color) = batch.cursors();
    assert!(ends / 4 == polar / 2, "Cursors out of step: {} {} {}", ends, polar, color);
    assert!(ends / 4 == color / 4, "Cursors out of step: {} {} {}", ends, polar, color);
    assert!(ends / 4 == batch.vertex_count());
}

#[test]
fn batch_reports_when_a_stroke_no_longer_fits() {
    let mut batch   = PenBatch::new();
    let per_line    = PenBatch::line_vertex_count(2.0);
    let mut flushes = 0;

    // Emit enough strokes to exceed capacity exactly once, applying the
    // engine's policy: flush (reset) before a stroke that does not fit
    let strokes = PEN_VERTEX_CAPACITY / per_line + 1;
    for _ in 0..strokes {
        if !batch.fits(per_line) {
            batch.reset();
            flushes += 1;
        }
        batch.push_line([10.0, 20.0, 30.0, 1.0], 2.0, 0.0, 0.0, 5.0, 5.0);
    }

    assert!(flushes == 1, "Expected exactly one implicit flush, got {}", flushes);

    // After a reset the cursors are provably zero
    batch.reset();
    assert!(batch.cursors() == (0, 0, 0));
    assert!(batch.is_empty());
}

#[test]
fn line_vertices_reconstruct_onto_the_stroke_capsule() {
    let (x1, y1, x2, y2)    = (0.0, 0.0, 10.0, 0.0);
    let thickness           = 2.0;
    let half                = thickness / 2.0;

    let mut batch = PenBatch::new();
    batch.push_line([255.0, 255.0, 255.0, 1.0], thickness, x1, y1, x2, y2);

    let vertices = reconstructed_vertices(&batch);

    // Every vertex sits on the stroke outline or at an endpoint centre
    for &(vx, vy) in vertices.iter() {
        let distance = distance_to_segment(vx, vy, x1, y1, x2, y2);
        assert!(distance <= half + 1e-4, "({}, {}) is {} from the segment", vx, vy, distance);
    }

    // The body corners are present at exactly half-thickness offsets
    for expected in [(0.0, 1.0), (0.0, -1.0), (10.0, 1.0), (10.0, -1.0)].iter() {
        assert!(
            vertices.iter().any(|&(vx, vy)| close(vx, expected.0) && close(vy, expected.1)),
            "Missing body corner {:?}", expected);
    }

    // The caps reach beyond both endpoints
    assert!(vertices.iter().any(|&(vx, _)| vx > x2 + half*0.5), "No cap geometry beyond the end point");
    assert!(vertices.iter().any(|&(vx, _)| vx < x1 - half*0.5), "No cap geometry behind the start point");
}

#[test]
fn dot_vertices_reconstruct_onto_a_circle() {
    let (cx, cy)    = (10.0, -5.0);
    let size        = 6.0;
    let radius      = size / 2.0;

    let mut batch = PenBatch::new();
    batch.push_dot([0.0, 0.0, 0.0, 1.0], size, cx, cy);

    let vertices = reconstructed_vertices(&batch);

    let mut edge_vertices = 0;
    for &(vx, vy) in vertices.iter() {
        let distance = ((vx - cx).powi(2) + (vy - cy).powi(2)).sqrt();

        // Either the circle centre or a point on the circle itself
        assert!(distance <= 1e-4 || close(distance, radius), "({}, {}) is {} from the centre", vx, vy, distance);
        if close(distance, radius) {
            edge_vertices += 1;
        }
    }
    assert!(edge_vertices > 0);

    // The circle is covered both above and below the centre
    assert!(vertices.iter().any(|&(_, vy)| vy > cy + radius*0.8));
    assert!(vertices.iter().any(|&(_, vy)| vy < cy - radius*0.8));
}

fn signed_area(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    ((b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)) / 2.0
}

fn strictly_inside(point: (f32, f32), a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> bool {
    let d0 = (b.0 - a.0) * (point.1 - a.1) - (b.1 - a.1) * (point.0 - a.0);
    let d1 = (c.0 - b.0) * (point.1 - b.1) - (c.1 - b.1) * (point.0 - b.0);
    let d2 = (a.0 - c.0) * (point.1 - c.1) - (a.1 - c.1) * (point.0 - c.0);

    (d0 > 0.0 && d1 > 0.0 && d2 > 0.0) || (d0 < 0.0 && d1 < 0.0 && d2 < 0.0)
}

#[test]
fn cap_coverage_is_a_single_layer() {
    // Translucent strokes blend once per pixel, so no two non-degenerate
    // triangles may cover the same cap interior point
    let mut batch = PenBatch::new();
    batch.push_line([255.0, 0.0, 0.0, 0.5], 2.0, 0.0, 0.0, 10.0, 0.0);

    let vertices    = reconstructed_vertices(&batch);
    let sample      = (10.5, 0.0);

    let mut covering = 0;
    for triangle in vertices.chunks_exact(3) {
        if signed_area(triangle[0], triangle[1], triangle[2]).abs() < 1e-6 {
            continue;
        }

        if strictly_inside(sample, triangle[0], triangle[1], triangle[2]) {
            covering += 1;
        }
    }

    assert!(covering == 1, "Cap point covered by {} triangles", covering);
}

#[test]
fn degenerate_polar_descriptor_resolves_to_the_start_point() {
    let position = resolve_pen_vertex([3.0, 4.0, 3.0, 4.0], [0.0, 0.0]);

    assert!(close(position.0, 3.0) && close(position.1, 4.0), "Unexpected position: {:?}", position);
}
