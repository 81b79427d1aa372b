#![warn(missing_docs)]

//! SVG projection of polycore shapes.
//!
//! An [`SvgDocument`] collects faces and axis arrows projected through a
//! [`View`], deduplicates their [`Style`]s into CSS classes, and writes them
//! back to front so nearer faces cover farther ones. [`SvgConfig`] loads
//! canvas size, styles and a set of cameras from TOML.

pub mod config;
pub mod document;
pub mod error;
mod number;
pub mod style;
pub mod view;

pub use config::{SvgConfig, ViewConfig};
pub use document::{RenderObject, SvgDocument, ViewBox, ARROW_MARKER_END};
pub use error::{Result, SvgError};
pub use style::{Color, FillRule, NamedColor, StrokeLineJoin, Style, StyleId, StyleTable};
pub use view::View;
