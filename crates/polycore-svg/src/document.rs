//! SVG document builder.
//!
//! Accumulates projected faces and axis arrows, then serializes them in
//! painter's order (farthest first) with one CSS class per distinct style.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use polycore_geom::Shape;
use polycore_math::{Point2, Scalar, Transformation, Vertex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::number::format_number;
use crate::style::{Style, StyleId, StyleTable};
use crate::view::View;

/// CSS fragment attaching the arrow-tip marker to the end of a line.
pub const ARROW_MARKER_END: &str = "marker-end: url(#arrowTip);";

/// The user coordinate system mapped onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl ViewBox {
    /// Create a view box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A projected primitive waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderObject {
    /// Closed polygon outline of one face.
    Path {
        /// Style class.
        style: StyleId,
        /// Projected corners in loop order.
        points: Vec<Point2>,
        /// Mean projected depth.
        z: Scalar,
    },
    /// One axis arrow.
    Axis {
        /// Style class.
        style: StyleId,
        /// Projected start.
        tail: Point2,
        /// Projected end, where the arrow tip is drawn.
        head: Point2,
        /// Projected depth of the tail.
        z: Scalar,
    },
}

impl RenderObject {
    /// Depth used for paint ordering; larger is farther away.
    pub fn z(&self) -> Scalar {
        match self {
            RenderObject::Path { z, .. } | RenderObject::Axis { z, .. } => *z,
        }
    }

    /// Style class of the object.
    pub fn style(&self) -> StyleId {
        match self {
            RenderObject::Path { style, .. } | RenderObject::Axis { style, .. } => *style,
        }
    }

    fn write_to(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            RenderObject::Path { style, points, .. } => {
                out.write_str("<path d=\"M")?;
                for p in points.iter().chain(points.first()) {
                    write!(out, " {},{}", format_number(p.x), format_number(p.y))?;
                }
                writeln!(out, "\" class=\"{style}\" />")
            }
            RenderObject::Axis {
                style, tail, head, ..
            } => writeln!(
                out,
                "<path d=\"M {},{} {},{}\" class=\"{style}\" />",
                format_number(tail.x),
                format_number(tail.y),
                format_number(head.x),
                format_number(head.y),
            ),
        }
    }
}

/// SVG document builder.
///
/// Objects are added under the current [`Style`] and [`View`]; changing
/// either only affects objects added afterwards.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    view_box: ViewBox,
    styles: StyleTable,
    style: Style,
    view: View,
    projection: Transformation,
    objects: Vec<RenderObject>,
}

impl SvgDocument {
    /// Create an empty document with a `width` x `height` canvas.
    pub fn new(width: f64, height: f64, view_box: ViewBox) -> Self {
        let view = View::default();
        Self {
            width,
            height,
            view_box,
            styles: StyleTable::new(),
            style: Style::default(),
            projection: view.transformation(),
            view,
            objects: Vec::new(),
        }
    }

    /// Style applied to objects added from now on.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Mutable access to the current style.
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Replace the current style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Camera used for objects added from now on.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Replace the camera.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.projection = view.transformation();
    }

    /// Registered styles.
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Objects in insertion order.
    pub fn render_objects(&self) -> &[RenderObject] {
        &self.objects
    }

    /// Canvas size.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// User coordinate system.
    pub fn view_box(&self) -> &ViewBox {
        &self.view_box
    }

    /// Add one path per face of `shape`, in world space, seen through the
    /// current view.
    pub fn add_shape(&mut self, shape: &Shape) {
        let style = self.styles.intern(&self.style);
        let before = self.objects.len();
        for face in shape.transformed_faces() {
            let projected: Vec<Vertex> = face.iter().map(|v| self.projection.apply(v)).collect();
            if projected.is_empty() {
                continue;
            }
            let z = projected.iter().map(|p| p.z).sum::<Scalar>() / projected.len() as Scalar;
            self.objects.push(RenderObject::Path {
                style,
                points: projected.iter().map(|p| Point2::new(p.x, p.y)).collect(),
                z,
            });
        }
        debug!(
            paths = self.objects.len() - before,
            style = %style,
            "Added shape to SVG"
        );
    }

    /// Add X, Y and Z arrows through `center`, each running from
    /// `length / 5` behind it to `length` ahead.
    ///
    /// The arrows use the current style with the arrow-tip marker attached.
    pub fn add_axis(&mut self, center: Vertex, length: Scalar) {
        let style = self
            .styles
            .intern(&self.style.with_custom(ARROW_MARKER_END));
        let x_tail = self.projection.apply(&(center - Vertex::x() * (length / 5.0)));
        let z = x_tail.z;
        for axis in [Vertex::x(), Vertex::y(), Vertex::z()] {
            let tail = self.projection.apply(&(center - axis * (length / 5.0)));
            let head = self.projection.apply(&(center + axis * length));
            self.objects.push(RenderObject::Axis {
                style,
                tail: Point2::new(tail.x, tail.y),
                head: Point2::new(head.x, head.y),
                z,
            });
        }
    }

    /// Objects in paint order: farthest first, ties in insertion order.
    pub fn paint_order(&self) -> Vec<&RenderObject> {
        let mut ordered: Vec<&RenderObject> = self.objects.iter().collect();
        ordered.sort_by(|a, b| b.z().total_cmp(&a.z()));
        ordered
    }

    /// Serialize the whole document.
    pub fn write_to(&self, out: &mut impl fmt::Write) -> fmt::Result {
        self.write_header(out)?;
        self.write_styles(out)?;
        self.write_defs(out)?;
        for object in self.paint_order() {
            object.write_to(out)?;
        }
        writeln!(out, "</svg>")
    }

    fn write_header(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let vb = &self.view_box;
        writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
             viewBox=\"{} {} {} {}\">",
            format_number(self.width),
            format_number(self.height),
            format_number(vb.x),
            format_number(vb.y),
            format_number(vb.width),
            format_number(vb.height),
        )
    }

    fn write_styles(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "<style>")?;
        for (id, style) in self.styles.iter() {
            write!(out, ".{id} {{ ")?;
            style.write_declarations(out)?;
            writeln!(out, " }}")?;
        }
        writeln!(out, "</style>")
    }

    fn write_defs(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "<defs>")?;
        writeln!(
            out,
            "<marker id=\"arrowTip\" markerHeight=\"6.155\" markerWidth=\"5.324\" \
             orient=\"auto-start-reverse\" preserveAspectRatio=\"xMidYMid\" refX=\"0\" \
             refY=\"0\" style=\"overflow:visible\" viewBox=\"0 0 5.324 6.155\">"
        )?;
        writeln!(
            out,
            "<path d=\"m5.77 0-8.65 5V-5Z\" class=\"{}\" transform=\"scale(.5)\" />",
            StyleId::ARROW_TIP
        )?;
        writeln!(out, "</marker>")?;
        writeln!(out, "</defs>")
    }

    /// Serialize into a string.
    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }

    /// Serialize into `path`, replacing any existing file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_svg_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use polycore_geom::Face;

    fn triangle(z: f64) -> Shape {
        Shape::new(
            vec![
                Vertex::new(0.0, 0.0, z),
                Vertex::new(10.0, 0.0, z),
                Vertex::new(0.0, 10.0, z),
            ],
            vec![Face::from([0, 1, 2])],
        )
        .unwrap()
    }

    fn document() -> SvgDocument {
        SvgDocument::new(500.0, 500.0, ViewBox::new(0.0, 0.0, 200.0, 200.0))
    }

    #[test]
    fn test_empty_document() {
        let svg = document().to_svg_string();
        assert!(svg.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"500\" height=\"500\" \
             viewBox=\"0 0 200 200\">\n"
        ));
        assert!(svg.contains(".S0 { fill: context-stroke;"));
        assert!(svg.contains("<marker id=\"arrowTip\""));
        assert!(svg.contains("class=\"S0\" transform=\"scale(.5)\""));
        assert!(svg.ends_with("</svg>\n"));
        assert!(!svg.contains(".S1"));
    }

    #[test]
    fn test_path_closes_loop() {
        let mut doc = document();
        doc.add_shape(&triangle(0.0));
        let svg = doc.to_svg_string();
        assert!(
            svg.contains("<path d=\"M 0,0 10,0 0,10 0,0\" class=\"S1\" />"),
            "{svg}"
        );
    }

    #[test]
    fn test_shapes_share_equal_styles() {
        let mut doc = document();
        doc.add_shape(&triangle(0.0));
        doc.add_shape(&triangle(1.0));
        doc.style_mut().fill = Color::RED;
        doc.add_shape(&triangle(2.0));
        let styles: Vec<_> = doc.render_objects().iter().map(|o| o.style()).collect();
        assert_eq!(styles[0], styles[1]);
        assert_ne!(styles[1], styles[2]);
        assert_eq!(doc.styles().len(), 3);
    }

    #[test]
    fn test_paint_order_far_to_near() {
        let mut doc = document();
        doc.add_shape(&triangle(1.0));
        doc.add_shape(&triangle(5.0));
        doc.add_shape(&triangle(-2.0));
        doc.add_shape(&triangle(5.0));
        let depths: Vec<f64> = doc.paint_order().iter().map(|o| o.z()).collect();
        assert_eq!(depths, vec![5.0, 5.0, 1.0, -2.0]);
        // Ties keep insertion order.
        let order = doc.paint_order();
        assert!(std::ptr::eq(order[0], &doc.render_objects()[1]));
        assert!(std::ptr::eq(order[1], &doc.render_objects()[3]));
    }

    #[test]
    fn test_axis() {
        let mut doc = document();
        doc.add_axis(Vertex::new(10.0, 10.0, 0.0), 10.0);
        assert_eq!(doc.render_objects().len(), 3);
        let RenderObject::Axis { tail, head, z, .. } = &doc.render_objects()[0] else {
            panic!("expected axis");
        };
        assert_eq!(*tail, Point2::new(8.0, 10.0));
        assert_eq!(*head, Point2::new(20.0, 10.0));
        assert_eq!(*z, 0.0);

        let style = doc.styles().get(doc.render_objects()[0].style()).unwrap();
        assert_eq!(style.custom.as_deref(), Some(ARROW_MARKER_END));
        // The current style itself is untouched.
        assert_eq!(doc.style().custom, None);

        let svg = doc.to_svg_string();
        assert!(svg.contains("<path d=\"M 8,10 20,10\" class=\"S1\" />"));
        assert!(svg.contains("marker-end: url(#arrowTip);"));
    }

    #[test]
    fn test_view_applies_to_later_objects() {
        let mut doc = document();
        doc.set_view(View::looking_along(
            Vertex::new(100.0, 100.0, 0.0),
            Vertex::z(),
            Vertex::y(),
        ));
        doc.add_shape(&triangle(0.0));
        let RenderObject::Path { points, .. } = &doc.render_objects()[0] else {
            panic!("expected path");
        };
        assert_eq!(points[1], Point2::new(110.0, 100.0));
    }
}
