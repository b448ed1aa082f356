//! tiny-skia backed render sink and hit-test picking.

use crate::interaction::Handle;
use crate::render::{decode_index, PathCommand, RenderMode, RenderSink, StrokeStyle};
use polyedit_core::{Point, Rgba};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

fn to_color(color: Rgba) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Renders into an owned [`Pixmap`].
///
/// Hit-test pixmaps are drawn without anti-aliasing so every covered pixel
/// carries an exact index colour.
pub struct PixmapSink {
    pixmap: Pixmap,
    transform: Transform,
    anti_alias: bool,
}

impl PixmapSink {
    /// Returns `None` for a zero-sized pixmap.
    pub fn new(width: u32, height: u32, mode: RenderMode) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            transform: Transform::identity(),
            anti_alias: mode == RenderMode::View,
        })
    }

    /// Canvas to pixel transform applied to every drawing call.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn paint(&self, color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(to_color(color));
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn stroke(&mut self, path: &Path, style: &StrokeStyle) {
        let stroke = Stroke {
            width: style.width as f32,
            dash: style
                .dash
                .and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
            ..Default::default()
        };
        let paint = self.paint(style.color);
        self.pixmap
            .stroke_path(path, &paint, &stroke, self.transform, None);
    }
}

impl RenderSink for PixmapSink {
    fn path(&mut self, commands: &[PathCommand], stroke: &StrokeStyle, fill: Option<Rgba>) {
        let mut pb = PathBuilder::new();
        for command in commands {
            match *command {
                PathCommand::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
                PathCommand::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
                PathCommand::CubicTo(c1, c2, p) => pb.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                PathCommand::Close => pb.close(),
            }
        }
        let Some(path) = pb.finish() else {
            return;
        };

        if let Some(fill) = fill {
            let paint = self.paint(fill);
            self.pixmap
                .fill_path(&path, &paint, FillRule::EvenOdd, self.transform, None);
        }
        self.stroke(&path, stroke);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.stroke(&path, stroke);
        }
    }

    fn marker(&mut self, center: Point, radius: f64, color: Rgba) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            let paint = self.paint(color);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }
}

/// Decodes the hit-test pixel at `(x, y)` into a handle of a chain with
/// `len` points.
pub fn pick(pixmap: &Pixmap, x: u32, y: u32, len: usize) -> Option<Handle> {
    let pixel = pixmap.pixel(x, y)?;
    let color = Rgba::new(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
    Handle::from_index(decode_index(color)?, len)
}
