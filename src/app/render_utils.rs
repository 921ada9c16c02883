use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

pub(super) const NODE_RADIUS: f32 = 10.0;
pub(super) const NODE_LABEL_OFFSET: f32 = 15.0;
pub(super) const LABEL_FONT_SIZE: f32 = 10.0;
const STROKE_AMOUNT_SCALE: f64 = 50.0;

pub(super) const NODE_FILL: Color32 = Color32::from_rgb(0x69, 0xb3, 0xa2);
pub(super) const LINK_STROKE: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
pub(super) const NODE_LABEL: Color32 = Color32::from_rgb(0xff, 0xff, 0x11);
pub(super) const LINK_LABEL: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct EmphasisPalette {
    pub(super) center: Color32,
    pub(super) neighbor: Color32,
}

pub(super) const DRAG_PALETTE: EmphasisPalette = EmphasisPalette {
    center: Color32::from_rgb(255, 0, 0),
    neighbor: Color32::from_rgb(255, 165, 0),
};

pub(super) const SELECTION_PALETTE: EmphasisPalette = EmphasisPalette {
    center: Color32::from_rgb(0, 0, 255),
    neighbor: Color32::from_rgb(0, 128, 0),
};

pub(super) fn stroke_width(amount: f64) -> f32 {
    (amount.max(0.0) / STROKE_AMOUNT_SCALE).sqrt() as f32
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 50.0;
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + step;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid);
        x += step;
    }

    let mut y = rect.top() + step;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid);
        y += step;
    }
}

pub(super) fn canvas_to_screen(origin: Pos2, canvas: Pos2) -> Pos2 {
    origin + canvas.to_vec2()
}

pub(super) fn screen_to_canvas(origin: Pos2, screen: Pos2) -> Pos2 {
    (screen - origin).to_pos2()
}

pub(super) fn circle_contains(center: Pos2, radius: f32, point: Pos2) -> bool {
    center.distance_sq(point) <= radius * radius
}

pub(super) fn midpoint(start: Pos2, end: Pos2) -> Pos2 {
    start + (end - start) * 0.5
}

pub(super) fn label_anchor(center: Pos2) -> Pos2 {
    center - Vec2::new(0.0, NODE_LABEL_OFFSET)
}
