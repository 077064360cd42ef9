//! Text rendering of replayed frames.

use std::fmt::Write;

use vector_crt::{Bounds, Primitive, RenderSummary};

/// How much of each frame to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Summary line followed by every primitive.
    #[default]
    Primitives,
    /// Summary line only.
    Summary,
}

/// Formats one frame.
pub fn format_frame(index: usize, summary: &RenderSummary, primitives: &[Primitive], mode: OutputMode) -> String {
    let mut out = format!(
        "frame {}: {} segments, {} clips, {} dots, {} lines, {} faded, {} clipped\n",
        index,
        summary.segments,
        summary.clips,
        summary.dots,
        summary.lines,
        summary.faded_out,
        summary.clipped
    );
    if mode == OutputMode::Summary {
        return out;
    }

    for primitive in primitives {
        // Writing to a String cannot fail
        let _ = match primitive {
            Primitive::Rect { bounds, color, flags } => writeln!(
                out,
                "  rect {} {:08x} {:?}",
                bounds_str(bounds),
                color.packed(),
                flags
            ),
            Primitive::Quad {
                bounds,
                color,
                texture,
                flags,
            } => writeln!(
                out,
                "  quad {} {:08x} tex={} {:?}",
                bounds_str(bounds),
                color.packed(),
                texture.0,
                flags
            ),
            Primitive::Line {
                line,
                width,
                color,
                flags,
            } => writeln!(
                out,
                "  line {} {:08x} width={:.5} {:?}",
                bounds_str(line),
                color.packed(),
                width,
                flags
            ),
        };
    }
    out
}

fn bounds_str(b: &Bounds) -> String {
    format!("({:.4}, {:.4})-({:.4}, {:.4})", b.x0, b.y0, b.x1, b.y1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vector_crt::{Argb, PrimitiveFlags, Rgb, TextureHandle};

    fn summary() -> RenderSummary {
        RenderSummary {
            segments: 2,
            lines: 1,
            faded_out: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_mode_prints_one_line() {
        let out = format_frame(3, &summary(), &[], OutputMode::Summary);
        assert_eq!(
            out,
            "frame 3: 2 segments, 0 clips, 0 dots, 1 lines, 1 faded, 0 clipped\n"
        );
    }

    #[test]
    fn test_primitives_listed_after_summary() {
        let primitives = [
            Primitive::Rect {
                bounds: Bounds::FULL,
                color: Argb::new(0xff, Rgb::BLACK),
                flags: PrimitiveFlags::BLEND_ALPHA,
            },
            Primitive::Quad {
                bounds: Bounds::new(0.0, 0.0, 0.5, 0.5),
                color: Argb::new(0x80, Rgb::WHITE),
                texture: TextureHandle(0),
                flags: PrimitiveFlags::BLEND_ADD,
            },
            Primitive::Line {
                line: Bounds::new(0.0, 0.0, 1.0, 1.0),
                width: 0.002,
                color: Argb::new(0x70, Rgb::new(0xff, 0, 0)),
                flags: PrimitiveFlags::VECTOR,
            },
        ];

        let out = format_frame(0, &summary(), &primitives, OutputMode::Primitives);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("  rect (0.0000, 0.0000)-(1.0000, 1.0000) ff000000"));
        assert!(lines[2].contains("80ffffff tex=0"));
        assert!(lines[3].starts_with("  line"));
        assert!(lines[3].contains("70ff0000 width=0.00200"));
    }
}
