use std::f32::consts::TAU;

use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2, pos2};

const ELLIPSE_SEGMENTS: usize = 48;

const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
const HOVER_TINT: Color32 = Color32::from_rgb(255, 164, 101);

pub(super) fn hover_tint(fill: Color32) -> Color32 {
    fill.lerp_to_gamma(HOVER_TINT, 0.35)
}

// Fades toward the chart background, not toward black.
pub(super) fn fade_into_background(color: Color32, amount: f32) -> Color32 {
    color.lerp_to_gamma(BACKGROUND, amount.clamp(0.0, 1.0))
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let step = 56.0;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (rect.width() / 2.0).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (rect.height() / 2.0).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        y += step;
    }
}

fn ellipse_points(center: Pos2, radii: Vec2) -> Vec<Pos2> {
    (0..ELLIPSE_SEGMENTS)
        .map(|segment| {
            let angle = segment as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
            pos2(
                center.x + angle.cos() * radii.x,
                center.y + angle.sin() * radii.y,
            )
        })
        .collect()
}

pub(super) fn ellipse_filled(painter: &Painter, center: Pos2, radii: Vec2, fill: Color32) {
    painter.add(Shape::convex_polygon(
        ellipse_points(center, radii),
        fill,
        Stroke::NONE,
    ));
}

pub(super) fn ellipse_stroke(painter: &Painter, center: Pos2, radii: Vec2, stroke: Stroke) {
    let mut points = ellipse_points(center, radii);
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    painter.add(Shape::line(points, stroke));
}

pub(super) fn ellipse_contains(center: Pos2, radii: Vec2, point: Pos2) -> bool {
    if radii.x <= f32::EPSILON || radii.y <= f32::EPSILON {
        return false;
    }
    let dx = (point.x - center.x) / radii.x;
    let dy = (point.y - center.y) / radii.y;
    dx * dx + dy * dy <= 1.0
}

pub(super) fn ellipse_visible(rect: Rect, center: Pos2, radii: Vec2) -> bool {
    !(center.x + radii.x < rect.left()
        || center.x - radii.x > rect.right()
        || center.y + radii.y < rect.top()
        || center.y - radii.y > rect.bottom())
}

pub(super) fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 140.0 {
        Color32::from_gray(18)
    } else {
        Color32::from_gray(238)
    }
}
