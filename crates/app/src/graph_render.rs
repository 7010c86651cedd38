//! Drawing of the graph under construction and the status overlay.

use app::camera::Camera;
use app::unpack_colour;
use app::viewer::{ViewerState, generator_summary};
use levelgen::generator::SEED_TAG;
use levelgen::{DirectedEdge, Graph, LevelGenerator, Node, XY};
use macroquad::prelude::*;

const BACKGROUND: Color = Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };
const NODE_FILL: Color = Color { r: 0.85, g: 0.85, b: 0.85, a: 1.0 };
const SEED_NODE_FILL: Color = Color { r: 0.95, g: 0.8, b: 0.3, a: 1.0 };
const NODE_OUTLINE: Color = Color { r: 0.1, g: 0.1, b: 0.1, a: 1.0 };
const ARROW_COLOUR: Color = Color { r: 0.9, g: 0.2, b: 0.2, a: 1.0 };
const MIN_EDGE_THICKNESS: f32 = 1.0;
const ARROW_LENGTH: f32 = 12.0;
const LABEL_FONT_SIZE: f32 = 16.0;
const STATUS_FONT_SIZE: f32 = 20.0;
const STATUS_LINE_STEP: f32 = 22.0;

pub fn draw_frame(generator: &LevelGenerator, viewer: &ViewerState, range: f64) {
    clear_background(BACKGROUND);
    let view = GraphView { graph: generator.graph(), camera: &viewer.camera, range };

    for edge in view.graph.all_edges() {
        view.draw_edge(edge, viewer.show_arrows);
    }
    for &id in view.graph.all_nodes() {
        if let Some(node) = view.graph.node(id) {
            view.draw_node(node, viewer.show_labels);
        }
    }

    draw_status(generator, viewer);
}

struct GraphView<'a> {
    graph: &'a Graph,
    camera: &'a Camera,
    range: f64,
}

impl GraphView<'_> {
    fn screen(&self, world: XY) -> Vec2 {
        let point = self.camera.to_screen(world, self.range);
        vec2(point.x as f32, point.y as f32)
    }

    fn draw_edge(&self, edge: &DirectedEdge, show_arrow: bool) {
        let start = self.screen(self.graph.pos(edge.start));
        let end = self.screen(self.graph.pos(edge.end));
        let [r, g, b, a] = unpack_colour(edge.colour);
        let thickness = (self.camera.to_screen_length(edge.half_width * 2.0) as f32)
            .max(MIN_EDGE_THICKNESS);
        draw_line(start.x, start.y, end.x, end.y, thickness, Color::from_rgba(r, g, b, a));

        if show_arrow {
            draw_arrow_head(start, end);
        }
    }

    fn draw_node(&self, node: &Node, show_label: bool) {
        let center = self.screen(node.pos);
        let radius = (self.camera.to_screen_length(node.radius) as f32).max(1.0);
        let fill = if node.template == SEED_TAG { SEED_NODE_FILL } else { NODE_FILL };
        draw_circle(center.x, center.y, radius, fill);
        draw_circle_lines(center.x, center.y, radius, 1.0, NODE_OUTLINE);

        if show_label {
            let label = if node.codes.is_empty() {
                node.name.clone()
            } else {
                format!("{} [{}]", node.name, node.codes)
            };
            draw_text(&label, center.x + radius, center.y, LABEL_FONT_SIZE, BLACK);
        }
    }
}

/// Arrow head at the midpoint of an edge, pointing from start to end.
fn draw_arrow_head(start: Vec2, end: Vec2) {
    let direction = (end - start).normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }
    let tip = (start + end) / 2.0 + direction * (ARROW_LENGTH / 2.0);
    let back = tip - direction * ARROW_LENGTH;
    let side = direction.perp() * (ARROW_LENGTH / 2.0);
    draw_triangle(tip, back + side, back - side, ARROW_COLOUR);
}

fn draw_status(generator: &LevelGenerator, viewer: &ViewerState) {
    let lines = [viewer.status_text(), generator_summary(generator), viewer.last_log.clone()];
    let mut y = STATUS_LINE_STEP;
    for line in lines.iter().filter(|line| !line.is_empty()) {
        draw_text(line, 10.0, y, STATUS_FONT_SIZE, WHITE);
        y += STATUS_LINE_STEP;
    }
}
