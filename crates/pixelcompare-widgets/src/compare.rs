//! Before/after comparison slider widget.

use egui::{
    Color32, CursorIcon, Mesh, Pos2, Rect, Response, Sense, Shape, Stroke, TextureId, Ui, Vec2,
    epaint::Vertex, pos2,
};
use kurbo::Point;
use pixelcompare_core::geometry::{self, ClipRegion, OffsetMetrics};
use pixelcompare_core::orientation::{ArrowDirection, Axis, Orientation};
use pixelcompare_core::position;

use crate::{sizing, theme};

/// Style configuration for the comparison slider.
#[derive(Clone)]
pub struct CompareSliderStyle {
    /// Divider line and handle outline color.
    pub divider_color: Color32,
    /// Divider line width.
    pub divider_width: f32,
    /// Handle knob radius.
    pub handle_radius: f32,
    /// Handle knob fill.
    pub handle_fill: Color32,
    /// Arrow glyph color.
    pub arrow_color: Color32,
    /// Whether to draw the divider and handle at all.
    pub show_handle: bool,
}

impl Default for CompareSliderStyle {
    fn default() -> Self {
        Self {
            divider_color: theme::DIVIDER,
            divider_width: sizing::DIVIDER_WIDTH,
            handle_radius: sizing::HANDLE_RADIUS,
            handle_fill: theme::HANDLE_BG,
            arrow_color: theme::ARROW,
            show_handle: true,
        }
    }
}

/// Two textures revealed by a draggable divider.
///
/// Runs the same clip geometry and position resolution as the web widget:
/// the offset fraction is clamped to [0, 1] and the images always tile the
/// allocated rect exactly.
pub struct CompareSlider<'a> {
    before: TextureId,
    after: TextureId,
    size: Vec2,
    offset_pct: &'a mut f32,
    orientation: Orientation,
    hover: bool,
    click_to_move: bool,
    style: CompareSliderStyle,
}

impl<'a> CompareSlider<'a> {
    /// Create a slider over a before/after texture pair. `offset_pct` is the
    /// divider position, updated in place while the user interacts.
    pub fn new(before: TextureId, after: TextureId, size: Vec2, offset_pct: &'a mut f32) -> Self {
        Self {
            before,
            after,
            size,
            offset_pct,
            orientation: Orientation::Horizontal,
            hover: false,
            click_to_move: false,
            style: CompareSliderStyle::default(),
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Follow the pointer while hovered instead of requiring a drag.
    pub fn hover_mode(mut self, hover: bool) -> Self {
        self.hover = hover;
        self
    }

    /// Jump the divider to a single click.
    pub fn click_to_move(mut self, click_to_move: bool) -> Self {
        self.click_to_move = click_to_move;
        self
    }

    pub fn style(mut self, style: CompareSliderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let (rect, mut response) = ui.allocate_exact_size(self.size, Sense::click_and_drag());

        let bounds = kurbo::Rect::new(
            rect.min.x as f64,
            rect.min.y as f64,
            rect.max.x as f64,
            rect.max.y as f64,
        );

        let pointer = if self.hover {
            response.hover_pos()
        } else if response.dragged() || (self.click_to_move && response.clicked()) {
            response.interact_pointer_pos()
        } else {
            None
        };
        if let Some(pos) = pointer {
            let pct = position::slider_fraction(
                Point::new(pos.x as f64, pos.y as f64),
                bounds,
                self.orientation,
            ) as f32;
            if pct != *self.offset_pct {
                *self.offset_pct = pct;
                response.mark_changed();
            }
        }

        if ui.is_rect_visible(rect) {
            let metrics = OffsetMetrics::new(*self.offset_pct as f64, bounds.size());
            let clips = geometry::clip_regions(self.orientation, &metrics);
            paint_region(ui, rect, self.before, &clips.before);
            paint_region(ui, rect, self.after, &clips.after);
            if self.style.show_handle {
                self.paint_handle(ui, rect, &metrics);
            }
        }

        let cursor = match self.orientation.axis() {
            Axis::X => CursorIcon::ResizeHorizontal,
            Axis::Y => CursorIcon::ResizeVertical,
        };
        response.on_hover_cursor(cursor)
    }

    fn paint_handle(&self, ui: &Ui, rect: Rect, metrics: &OffsetMetrics) {
        let painter = ui.painter().with_clip_rect(rect);
        let stroke = Stroke::new(self.style.divider_width, self.style.divider_color);

        let center = match self.orientation.axis() {
            Axis::X => {
                let x = rect.min.x + metrics.clip_w as f32;
                painter.line_segment([pos2(x, rect.min.y), pos2(x, rect.max.y)], stroke);
                pos2(x, rect.center().y)
            }
            Axis::Y => {
                let y = rect.min.y + metrics.clip_h as f32;
                painter.line_segment([pos2(rect.min.x, y), pos2(rect.max.x, y)], stroke);
                pos2(rect.center().x, y)
            }
        };

        painter.circle(center, self.style.handle_radius, self.style.handle_fill, stroke);

        let (toward_before, toward_after) = self.orientation.arrows();
        let spread = self.style.handle_radius * 0.45;
        let offset = match self.orientation.axis() {
            Axis::X => Vec2::new(spread, 0.0),
            Axis::Y => Vec2::new(0.0, spread),
        };
        arrow(&painter, center - offset, toward_before, sizing::ARROW_SIZE, self.style.arrow_color);
        arrow(&painter, center + offset, toward_after, sizing::ARROW_SIZE, self.style.arrow_color);
    }
}

/// Paint `texture` restricted to one clip region of the widget rect.
fn paint_region(ui: &Ui, rect: Rect, texture: TextureId, region: &ClipRegion) {
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    match region {
        ClipRegion::Rect(r) => {
            let clip = Rect::from_min_max(
                pos2(rect.min.x + r.x0 as f32, rect.min.y + r.y0 as f32),
                pos2(rect.min.x + r.x1 as f32, rect.min.y + r.y1 as f32),
            )
            .intersect(rect);
            let painter = ui.painter().with_clip_rect(clip);
            painter.add(Shape::image(texture, rect, uv, Color32::WHITE));
        }
        ClipRegion::Polygon(points) => {
            // Percent-space vertices map straight onto texture coordinates;
            // the triangle is drawn as a textured mesh.
            let mut mesh = Mesh::with_texture(texture);
            for p in points {
                let u = (p.x / 100.0) as f32;
                let v = (p.y / 100.0) as f32;
                mesh.vertices.push(Vertex {
                    pos: pos2(rect.min.x + u * rect.width(), rect.min.y + v * rect.height()),
                    uv: pos2(u, v),
                    color: Color32::WHITE,
                });
            }
            for i in 1..points.len().saturating_sub(1) {
                mesh.indices.extend([0, i as u32, i as u32 + 1]);
            }
            ui.painter().with_clip_rect(rect).add(Shape::mesh(mesh));
        }
    }
}

/// Draw one directional arrow glyph.
fn arrow(painter: &egui::Painter, center: Pos2, direction: ArrowDirection, size: f32, color: Color32) {
    let points = match direction {
        ArrowDirection::Left => vec![
            pos2(center.x - size, center.y),
            pos2(center.x, center.y - size),
            pos2(center.x, center.y + size),
        ],
        ArrowDirection::Right => vec![
            pos2(center.x + size, center.y),
            pos2(center.x, center.y + size),
            pos2(center.x, center.y - size),
        ],
        ArrowDirection::Up => vec![
            pos2(center.x, center.y - size),
            pos2(center.x + size, center.y),
            pos2(center.x - size, center.y),
        ],
        ArrowDirection::Down => vec![
            pos2(center.x, center.y + size),
            pos2(center.x - size, center.y),
            pos2(center.x + size, center.y),
        ],
    };
    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
}
