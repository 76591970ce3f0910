use web_sys::CanvasRenderingContext2d;

use marginalia_shared::{Point, Stroke};

use crate::engine::RenderCmd;
use crate::surface::SurfaceGeometry;

pub fn clear(ctx: &CanvasRenderingContext2d, geometry: &SurfaceGeometry) {
    ctx.clear_rect(0.0, 0.0, geometry.content_width, geometry.content_height);
}

pub fn draw_dot(ctx: &CanvasRenderingContext2d, center: Point, color: &str, size: f64) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(center.x, center.y, size / 2.0, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();
}

pub fn draw_segment(ctx: &CanvasRenderingContext2d, from: Point, to: Point, color: &str, size: f64) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(size);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
}

pub fn draw_cmd(ctx: &CanvasRenderingContext2d, cmd: &RenderCmd) {
    match cmd {
        RenderCmd::Dot { center, color, size } => draw_dot(ctx, *center, color, *size),
        RenderCmd::Segment {
            from,
            to,
            color,
            size,
        } => draw_segment(ctx, *from, *to, color, *size),
    }
}

/// Strokes one committed gesture as a single polyline path; round caps and
/// joins keep segments connected regardless of point density.
pub fn draw_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
    let Some(&first) = stroke.points.first() else {
        return;
    };
    if stroke.points.len() == 1 {
        draw_dot(ctx, first, &stroke.color, stroke.size);
        return;
    }
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.size);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for point in &stroke.points[1..] {
        ctx.line_to(point.x, point.y);
    }
    ctx.stroke();
}

/// Clears the surface and re-strokes the whole collection in z-order.
pub fn redraw(ctx: &CanvasRenderingContext2d, geometry: &SurfaceGeometry, strokes: &[Stroke]) {
    clear(ctx, geometry);
    for stroke in strokes {
        draw_stroke(ctx, stroke);
    }
}
