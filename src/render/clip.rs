//! Line-against-rectangle clipping in logical space.

use crate::types::Bounds;

/// Clips the line `line` against the rectangle `clip`.
///
/// Returns the visible part of the line, or `None` when nothing of it lies
/// inside `clip`. Edges are inclusive. Endpoints already inside the rectangle
/// are returned bit-for-bit unchanged, so a zero-length line stays
/// zero-length. Lines with non-finite coordinates and empty rectangles clip
/// to nothing.
pub fn clip_line(line: Bounds, clip: &Bounds) -> Option<Bounds> {
    let coords = [line.x0, line.y0, line.x1, line.y1];
    if clip.is_empty() || coords.iter().any(|c| !c.is_finite()) {
        return None;
    }

    // Liang-Barsky: narrow the parametric range [t0, t1] edge by edge.
    let dx = line.x1 - line.x0;
    let dy = line.y1 - line.y0;
    let edges = [
        (-dx, line.x0 - clip.x0),
        (dx, clip.x1 - line.x0),
        (-dy, line.y0 - clip.y0),
        (dy, clip.y1 - line.y0),
    ];

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: fully outside or irrelevant.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    let mut out = line;
    if t0 > 0.0 {
        out.x0 = line.x0 + t0 * dx;
        out.y0 = line.y0 + t0 * dy;
    }
    if t1 < 1.0 {
        out.x1 = line.x0 + t1 * dx;
        out.y1 = line.y0 + t1 * dy;
    }
    Some(out)
}
