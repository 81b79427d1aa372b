//! TOML configuration for debug renders.
//!
//! ```toml
//! width = 800
//! height = 800
//! view_box = { x = 0, y = 0, width = 200, height = 200 }
//!
//! [shape_style]
//! fill = "#3366cc"
//! fill_opacity = 0.4
//!
//! [[views]]
//! center = [100, 100, 0]
//! direction = [1, 1, 1]
//! up = [0, -1, 0]
//! ```
//!
//! Every field is optional; omitted fields keep their defaults.

use std::fs;
use std::path::Path;

use polycore_geom::Shape;
use polycore_math::{Scalar, Vertex};
use serde::{Deserialize, Serialize};

use crate::document::{SvgDocument, ViewBox};
use crate::error::Result;
use crate::style::{Color, Style};
use crate::view::View;

/// One camera of a multi-view render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Canvas position of the world origin.
    pub center: [f64; 3],
    /// Look direction.
    pub direction: [f64; 3],
    /// Approximate up direction.
    pub up: [f64; 3],
}

impl ViewConfig {
    /// The camera described by this entry.
    pub fn view(&self) -> View {
        View::looking_along(
            Vertex::from(self.center),
            Vertex::from(self.direction),
            Vertex::from(self.up),
        )
    }
}

/// Canvas, styles and cameras for rendering shapes to SVG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// User coordinate system.
    pub view_box: ViewBox,
    /// Style for shape faces.
    pub shape_style: Style,
    /// Style for axis arrows.
    pub axis_style: Style,
    /// Cameras; the shape is drawn once per entry. Empty means the default
    /// view only.
    pub views: Vec<ViewConfig>,
}

impl Default for SvgConfig {
    /// A 500x500 canvas over a 200x200 view box with four cameras in a
    /// 2x2 grid: along +x, +y, +z and an oblique direction.
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            view_box: ViewBox::new(0.0, 0.0, 200.0, 200.0),
            shape_style: Style {
                fill: Color::RED,
                fill_opacity: 0.5,
                stroke: Color::rgb(205, 0, 0),
                ..Style::default()
            },
            axis_style: Style::default(),
            views: vec![
                ViewConfig {
                    center: [50.0, 50.0, 0.0],
                    direction: [1.0, 0.0, 0.0],
                    up: [0.0, -1.0, 0.0],
                },
                ViewConfig {
                    center: [150.0, 50.0, 0.0],
                    direction: [0.0, 1.0, 0.0],
                    up: [0.0, 0.0, -1.0],
                },
                ViewConfig {
                    center: [50.0, 150.0, 0.0],
                    direction: [0.0, 0.0, 1.0],
                    up: [-1.0, 0.0, 0.0],
                },
                ViewConfig {
                    center: [150.0, 150.0, 0.0],
                    direction: [2.0, 1.0, 1.0],
                    up: [0.0, -1.0, 0.0],
                },
            ],
        }
    }
}

impl SvgConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Empty document with this canvas, current style set to the shape
    /// style.
    pub fn document(&self) -> SvgDocument {
        let mut doc = SvgDocument::new(self.width, self.height, self.view_box);
        doc.set_style(self.shape_style.clone());
        doc
    }

    /// Render `shape` once per configured view. With `axis_length`, axis
    /// arrows of that length are drawn through each view's origin first.
    pub fn render(&self, shape: &Shape, axis_length: Option<Scalar>) -> SvgDocument {
        let mut doc = self.document();
        let views: Vec<View> = if self.views.is_empty() {
            vec![View::default()]
        } else {
            self.views.iter().map(ViewConfig::view).collect()
        };
        for view in views {
            doc.set_view(view);
            if let Some(length) = axis_length {
                doc.set_style(self.axis_style.clone());
                doc.add_axis(Vertex::zeros(), length);
            }
            doc.set_style(self.shape_style.clone());
            doc.add_shape(shape);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SvgError;
    use crate::style::FillRule;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SvgConfig::from_toml_str("").unwrap();
        assert_eq!(config, SvgConfig::default());
        assert_eq!(config.views.len(), 4);
    }

    #[test]
    fn test_partial_override() {
        let config = SvgConfig::from_toml_str(
            r##"
            width = 800
            height = 600

            [shape_style]
            fill = "#3366cc"
            fill_rule = "evenodd"
            stroke_line_join = "round"

            [[views]]
            center = [10, 20, 0]
            direction = [0, 0, 1]
            up = [0, 1, 0]
            "##,
        )
        .unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.view_box, ViewBox::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(config.shape_style.fill, Color::rgb(0x33, 0x66, 0xcc));
        assert_eq!(config.shape_style.fill_rule, FillRule::EvenOdd);
        // Unset style fields fall back to the plain style defaults.
        assert_eq!(config.shape_style.fill_opacity, 1.0);
        assert_eq!(config.views.len(), 1);
        assert_eq!(config.views[0].view().center, Vertex::new(10.0, 20.0, 0.0));
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let err = SvgConfig::from_toml_str("[axis_style]\nstroke = \"mauve\"\n").unwrap_err();
        assert!(matches!(err, SvgError::Config(_)));
        assert!(err.to_string().contains("mauve"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SvgConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SvgError::Io(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SvgConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SvgConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_document_uses_canvas_and_shape_style() {
        let config = SvgConfig::default();
        let doc = config.document();
        assert_eq!(doc.size(), (500.0, 500.0));
        assert_eq!(doc.style(), &config.shape_style);
    }
}
