//! Rendering boundary for editable shapes.
//!
//! The engine does not draw anything itself. It walks the chain and emits
//! drawing calls into a [`RenderSink`]:
//! - one continuous path following VERTEX -> (MID: line | CURVE pair: cubic) -> VERTEX,
//!   closed and filled for closed shapes
//! - dashed helper lines from each curve control point to its vertex, in
//!   hit-test mode or while the shape is selected or highlighted
//! - a marker per point, larger for the highlighted handle
//! - while drawing, a rubber-band line from the last vertex to the cursor
//!
//! Colours come from a [`ColorEncoder`]. [`IndexColorEncoder`] packs
//! `index + 1` into the RGB channels in hit-test mode so a picked pixel can be
//! turned back into a [`Handle`] with [`decode_index`].

use crate::chain::PointChain;
use crate::interaction::{EditorState, Handle, PolygonEditor};
use crate::model::PointRole;
use polyedit_core::{Point, Rgba};
use polyedit_settings::StyleSettings;

/// What the drawing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Normal on-screen viewing
    View,
    /// Off-screen picking buffer
    HitTest,
}

/// Path segment emitted for the outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Stroke parameters, already divided by the canvas scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
}

/// Receiver for drawing calls.
pub trait RenderSink {
    fn path(&mut self, commands: &[PathCommand], stroke: &StrokeStyle, fill: Option<Rgba>);
    fn line(&mut self, from: Point, to: Point, stroke: &StrokeStyle);
    fn marker(&mut self, center: Point, radius: f64, color: Rgba);
}

/// Chooses colours for points and for the shape body.
pub trait ColorEncoder {
    fn point(&self, index: usize, role: PointRole, mode: RenderMode) -> Rgba;

    /// Outline colour; `len` is the chain length, the raw index of the shape.
    fn outline(&self, len: usize, mode: RenderMode) -> Rgba;

    fn fill(&self, len: usize, mode: RenderMode) -> Rgba;
}

/// Packs `index + 1` into an opaque colour. Zero stays free for "nothing".
pub fn encode_index(index: usize) -> Rgba {
    let value = (index + 1) as u32;
    Rgba::opaque(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    )
}

/// Reverses [`encode_index`]. Non-opaque or black pixels decode to `None`.
pub fn decode_index(color: Rgba) -> Option<usize> {
    if color.a != 255 {
        return None;
    }
    let value = ((color.r as usize) << 16) | ((color.g as usize) << 8) | color.b as usize;
    value.checked_sub(1)
}

/// Default encoder: style colours when viewing, index colours when picking.
#[derive(Debug, Clone)]
pub struct IndexColorEncoder {
    style: StyleSettings,
}

impl IndexColorEncoder {
    pub fn new(style: StyleSettings) -> Self {
        Self { style }
    }
}

impl ColorEncoder for IndexColorEncoder {
    fn point(&self, index: usize, role: PointRole, mode: RenderMode) -> Rgba {
        match (mode, role) {
            (RenderMode::HitTest, _) => encode_index(index),
            (RenderMode::View, PointRole::Vertex) => self.style.vertex_color,
            (RenderMode::View, _) => self.style.vertex_color.blend(
                Rgba::WHITE,
                self.style.white_blend,
                self.style.white_blend_alpha,
            ),
        }
    }

    fn outline(&self, len: usize, mode: RenderMode) -> Rgba {
        match mode {
            RenderMode::View => self.style.outline_color,
            RenderMode::HitTest => encode_index(len),
        }
    }

    fn fill(&self, len: usize, mode: RenderMode) -> Rgba {
        match mode {
            RenderMode::View => self.style.fill_color,
            RenderMode::HitTest => encode_index(len),
        }
    }
}

/// Per-frame drawing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub scale: f64,
    pub selected: bool,
    pub highlight: Option<Handle>,
    pub cursor: Option<Point>,
}

impl RenderOptions {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            scale: 1.0,
            selected: false,
            highlight: None,
            cursor: None,
        }
    }
}

/// Builds the outline path. Each vertex-to-vertex gap becomes a line, or a
/// cubic when the gap holds a control pair.
pub fn outline_path(chain: &PointChain) -> Vec<PathCommand> {
    let Some(start) = chain.points().iter().position(|p| p.is_vertex()) else {
        return Vec::new();
    };
    let position = |i: usize| chain.points()[i].position;

    let mut commands = vec![PathCommand::MoveTo(position(start))];
    let mut current = start;
    while let Some(next) = chain.next_vertex(current) {
        let mut controls = Vec::with_capacity(2);
        let mut idx = chain.next_index(current);
        while let Some(i) = idx.filter(|&i| i != next) {
            if chain.points()[i].role == PointRole::Curve {
                controls.push(position(i));
            }
            idx = chain.next_index(i);
        }

        commands.push(match controls.as_slice() {
            [c1, c2] => PathCommand::CubicTo(*c1, *c2, position(next)),
            _ => PathCommand::LineTo(position(next)),
        });

        if next == start {
            commands.push(PathCommand::Close);
            break;
        }
        current = next;
    }
    commands
}

/// Draws a chain into `sink`.
pub fn render_chain(
    chain: &PointChain,
    style: &StyleSettings,
    options: &RenderOptions,
    encoder: &dyn ColorEncoder,
    sink: &mut dyn RenderSink,
) {
    if chain.is_empty() {
        return;
    }
    let mode = options.mode;
    let scale = options.scale;
    let len = chain.len();

    let outline = StrokeStyle {
        color: encoder.outline(len, mode),
        width: style.stroke_width / scale,
        dash: None,
    };
    let fill = chain.is_closed().then(|| encoder.fill(len, mode));
    sink.path(&outline_path(chain), &outline, fill);

    let dash = [style.dash[0] / scale, style.dash[1] / scale];
    if mode == RenderMode::HitTest || options.selected || options.highlight.is_some() {
        for (i, point) in chain.points().iter().enumerate() {
            if point.role != PointRole::Curve {
                continue;
            }
            let anchor = [chain.previous_index(i), chain.next_index(i)]
                .into_iter()
                .flatten()
                .find(|&j| chain.points()[j].is_vertex());
            if let Some(anchor) = anchor {
                let helper = StrokeStyle {
                    color: encoder.point(i, point.role, mode),
                    width: style.stroke_width / scale,
                    dash: Some(dash),
                };
                sink.line(chain.points()[anchor].position, point.position, &helper);
            }
        }
    }

    if let (Some(cursor), Some(last)) = (options.cursor, chain.points().last()) {
        if mode == RenderMode::View {
            let rubber_band = StrokeStyle {
                dash: Some(dash),
                ..outline
            };
            sink.line(last.position, cursor, &rubber_band);
        }
    }

    for (i, point) in chain.points().iter().enumerate() {
        let radius = if options.highlight == Some(Handle::Point(i)) {
            style.highlight_radius
        } else {
            style.point_radius
        };
        sink.marker(point.position, radius / scale, encoder.point(i, point.role, mode));
    }
}

/// Draws an editor's chain with its current scale, highlight and cursor.
pub fn render(
    editor: &PolygonEditor,
    mode: RenderMode,
    encoder: &dyn ColorEncoder,
    sink: &mut dyn RenderSink,
) {
    let cursor = match editor.state() {
        EditorState::Draw { cursor } => *cursor,
        _ => None,
    };
    let options = RenderOptions {
        mode,
        scale: editor.scale(),
        selected: editor.is_selected(),
        highlight: editor.highlight(),
        cursor,
    };
    render_chain(editor.chain(), &editor.config().style, &options, encoder, sink);
}
