//! Presentation attributes and the per-document style registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SvgError;
use crate::number::format_number;

/// Color keywords understood by the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// No paint.
    None,
    /// `black`.
    Black,
    /// `red`.
    Red,
    /// Inherit the stroke of the element referencing a marker.
    ContextStroke,
}

impl NamedColor {
    fn keyword(self) -> &'static str {
        match self {
            NamedColor::None => "none",
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::ContextStroke => "context-stroke",
        }
    }
}

/// A paint value: a keyword or an RGB triple.
///
/// Serializes as the string written into the style block, e.g. `"red"` or
/// `"#cd0000"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// A color keyword.
    Named(NamedColor),
    /// An explicit RGB color.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
}

impl Color {
    /// No paint.
    pub const NONE: Color = Color::Named(NamedColor::None);
    /// Black.
    pub const BLACK: Color = Color::Named(NamedColor::Black);
    /// Red.
    pub const RED: Color = Color::Named(NamedColor::Red);
    /// Paint inherited from the referencing element's stroke.
    pub const CONTEXT_STROKE: Color = Color::Named(NamedColor::ContextStroke);

    /// An RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => f.write_str(named.keyword()),
            Color::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = SvgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SvgError::InvalidColor(s.to_string());
        let s = s.trim();
        match s {
            "none" => return Ok(Color::NONE),
            "black" => return Ok(Color::BLACK),
            "red" => return Ok(Color::RED),
            "context-stroke" => return Ok(Color::CONTEXT_STROKE),
            _ => {}
        }
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = SvgError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

/// How the interior of a self-overlapping path is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    /// `nonzero`.
    #[default]
    NonZero,
    /// `evenodd`.
    EvenOdd,
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        })
    }
}

/// Shape drawn where two stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeLineJoin {
    /// `arcs`.
    Arcs,
    /// `bevel`.
    Bevel,
    /// `miter`.
    #[default]
    Miter,
    /// `miter-clip`.
    MiterClip,
    /// `round`.
    Round,
}

impl fmt::Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrokeLineJoin::Arcs => "arcs",
            StrokeLineJoin::Bevel => "bevel",
            StrokeLineJoin::Miter => "miter",
            StrokeLineJoin::MiterClip => "miter-clip",
            StrokeLineJoin::Round => "round",
        })
    }
}

/// Presentation attributes shared by render objects.
///
/// Two styles are the same class in the output iff they compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Interior paint.
    pub fill: Color,
    /// Interior opacity in `[0, 1]`.
    pub fill_opacity: f64,
    /// Interior rule.
    pub fill_rule: FillRule,
    /// Outline paint.
    pub stroke: Color,
    /// Outline width in user units.
    pub stroke_width: f64,
    /// Outline opacity in `[0, 1]`.
    pub stroke_opacity: f64,
    /// Outline corner shape.
    pub stroke_line_join: StrokeLineJoin,
    /// Extra CSS declarations appended verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Color::NONE,
            fill_opacity: 1.0,
            fill_rule: FillRule::NonZero,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            stroke_line_join: StrokeLineJoin::Miter,
            custom: None,
        }
    }
}

impl Style {
    /// Style of the arrow-tip marker: filled and stroked with the color of
    /// the line it decorates.
    pub fn arrow_tip() -> Self {
        Self {
            fill: Color::CONTEXT_STROKE,
            fill_rule: FillRule::EvenOdd,
            stroke: Color::CONTEXT_STROKE,
            ..Self::default()
        }
    }

    /// Copy of this style with `custom` replaced.
    pub fn with_custom(&self, custom: impl Into<String>) -> Self {
        Self {
            custom: Some(custom.into()),
            ..self.clone()
        }
    }

    /// Write the CSS declarations of this style (without selector or braces).
    pub fn write_declarations(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(
            out,
            "fill: {}; fill-opacity: {}; fill-rule: {}; stroke: {}; stroke-width: {}; \
             stroke-opacity: {}; stroke-linejoin: {};",
            self.fill,
            format_number(self.fill_opacity),
            self.fill_rule,
            self.stroke,
            format_number(self.stroke_width),
            format_number(self.stroke_opacity),
            self.stroke_line_join,
        )?;
        if let Some(custom) = &self.custom {
            write!(out, " {}", custom.trim())?;
        }
        Ok(())
    }
}

/// Handle of a style registered in a [`StyleTable`]; displays as `S{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(usize);

impl StyleId {
    /// Reserved for the arrow-tip marker.
    pub const ARROW_TIP: StyleId = StyleId(0);

    /// Position in the table.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Deduplicated list of styles used by one document.
///
/// Slot 0 always holds [`Style::arrow_tip`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    styles: Vec<Style>,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleTable {
    /// Table holding only the arrow-tip style.
    pub fn new() -> Self {
        Self {
            styles: vec![Style::arrow_tip()],
        }
    }

    /// Id of `style`, registering it if no equal style exists yet.
    pub fn intern(&mut self, style: &Style) -> StyleId {
        if let Some(id) = self.find(style) {
            return id;
        }
        self.styles.push(style.clone());
        StyleId(self.styles.len() - 1)
    }

    /// Id of a registered style equal to `style`.
    pub fn find(&self, style: &Style) -> Option<StyleId> {
        self.styles.iter().position(|s| s == style).map(StyleId)
    }

    /// Style registered under `id`.
    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id.0)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Always `false`: the arrow-tip style is pre-registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Registered styles with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &Style)> + '_ {
        self.styles.iter().enumerate().map(|(i, s)| (StyleId(i), s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display() {
        assert_eq!(Color::NONE.to_string(), "none");
        assert_eq!(Color::CONTEXT_STROKE.to_string(), "context-stroke");
        assert_eq!(Color::rgb(205, 0, 0).to_string(), "#cd0000");
        assert_eq!(Color::rgb(255, 0, 50).to_string(), "#ff0032");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!(" none ".parse::<Color>().unwrap(), Color::NONE);
        assert_eq!("#ff0032".parse::<Color>().unwrap(), Color::rgb(255, 0, 50));
        assert_eq!("#CD0000".parse::<Color>().unwrap(), Color::rgb(205, 0, 0));
        for bad in ["blue", "#12345", "#gg0000", "ff0000", "#ffééff"] {
            assert!(
                matches!(bad.parse::<Color>(), Err(SvgError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_style_declarations() {
        let mut css = String::new();
        Style::arrow_tip().write_declarations(&mut css).unwrap();
        assert_eq!(
            css,
            "fill: context-stroke; fill-opacity: 1; fill-rule: evenodd; \
             stroke: context-stroke; stroke-width: 1; stroke-opacity: 1; stroke-linejoin: miter;"
        );

        let mut css = String::new();
        Style {
            fill_opacity: 0.5,
            stroke_line_join: StrokeLineJoin::MiterClip,
            ..Style::default()
        }
        .with_custom("marker-end: url(#arrowTip);")
        .write_declarations(&mut css)
        .unwrap();
        assert!(css.contains("fill-opacity: 0.5;"));
        assert!(css.contains("stroke-linejoin: miter-clip;"));
        assert!(css.ends_with(" marker-end: url(#arrowTip);"));
    }

    #[test]
    fn test_style_table_dedup() {
        let mut table = StyleTable::new();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(&Style::arrow_tip()), Some(StyleId::ARROW_TIP));

        let a = table.intern(&Style::default());
        let red = Style {
            fill: Color::RED,
            ..Style::default()
        };
        let b = table.intern(&red);
        assert_eq!(a.to_string(), "S1");
        assert_eq!(b.to_string(), "S2");
        assert_eq!(table.intern(&Style::default()), a);
        assert_eq!(table.intern(&red.clone()), b);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b), Some(&red));
        assert_eq!(table.iter().map(|(id, _)| id.index()).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
