//! Freeform elements placed on a kanva page.

use crate::builder::{ObjectFit, TextAlign};
use crate::color::SerializableColor;
use crate::geometry::{Bounds, bounds};
use crate::guides::GuideTarget;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Size used for non-text elements that were created without one.
pub const DEFAULT_ELEMENT_SIZE: f64 = 100.0;

/// Auto-sized text is never narrower than this.
const MIN_TEXT_WIDTH: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    /// CSS weight, 100 to 900.
    pub font_weight: u16,
    pub color: SerializableColor,
    pub align: TextAlign,
    pub line_height: f64,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: "Add a heading".to_string(),
            font_family: "Inter".to_string(),
            font_size: 32.0,
            font_weight: 400,
            color: SerializableColor::black(),
            align: TextAlign::Left,
            line_height: 1.2,
        }
    }
}

impl TextContent {
    /// Rough width from the longest line and the font size.
    pub fn approximate_width(&self) -> f64 {
        let longest = self.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let factor = match self.font_weight {
            0..=300 => 0.50,
            301..=500 => 0.55,
            _ => 0.60,
        };
        (longest as f64 * self.font_size * factor).max(MIN_TEXT_WIDTH)
    }

    /// Height of all lines, counting a trailing newline as a line.
    pub fn approximate_height(&self) -> f64 {
        let mut lines = self.text.lines().count().max(1);
        if self.text.ends_with('\n') {
            lines += 1;
        }
        lines as f64 * self.font_size * self.line_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageContent {
    pub src: String,
    pub fit: ObjectFit,
    pub corner_radius: f64,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            src: String::new(),
            fit: ObjectFit::Cover,
            corner_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Line,
    Star,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeContent {
    pub shape: ShapeKind,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

impl Default for ShapeContent {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Rectangle,
            fill: Some(SerializableColor::rgb(0x8b, 0x5c, 0xf6)),
            stroke: None,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }
}

/// An SVG path scaled into the element frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathContent {
    pub d: String,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: f64,
}

impl Default for PathContent {
    fn default() -> Self {
        Self {
            d: String::new(),
            fill: Some(SerializableColor::black()),
            stroke: None,
            stroke_width: 0.0,
        }
    }
}

/// What a canvas element draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CanvasContent {
    Text(TextContent),
    Image(ImageContent),
    Shape(ShapeContent),
    Path(PathContent),
}

/// An absolutely positioned element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    pub id: Uuid,
    pub content: CanvasContent,
    pub x: f64,
    pub y: f64,
    /// `None` on text means the width follows the content.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Clockwise, in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

impl CanvasElement {
    pub fn new(content: CanvasContent, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            x,
            y,
            width: None,
            height: None,
            rotation: 0.0,
            z_index: 0,
            visible: true,
            locked: false,
            opacity: 1.0,
            group_id: None,
        }
    }

    /// Auto-sized text with default styling.
    pub fn text(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(
            CanvasContent::Text(TextContent {
                text: text.into(),
                ..TextContent::default()
            }),
            x,
            y,
        )
    }

    pub fn image(src: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let content = CanvasContent::Image(ImageContent {
            src: src.into(),
            ..ImageContent::default()
        });
        Self::new(content, x, y).with_size(width, height)
    }

    pub fn shape(shape: ShapeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        let content = CanvasContent::Shape(ShapeContent {
            shape,
            ..ShapeContent::default()
        });
        Self::new(content, x, y).with_size(width, height)
    }

    pub fn path(d: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let content = CanvasContent::Path(PathContent {
            d: d.into(),
            ..PathContent::default()
        });
        Self::new(content, x, y).with_size(width, height)
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, CanvasContent::Text(_))
    }

    /// Resolved width and height.
    pub fn size(&self) -> (f64, f64) {
        match &self.content {
            CanvasContent::Text(text) => (
                self.width.unwrap_or_else(|| text.approximate_width()),
                self.height.unwrap_or_else(|| text.approximate_height()),
            ),
            _ => (
                self.width.unwrap_or(DEFAULT_ELEMENT_SIZE),
                self.height.unwrap_or(DEFAULT_ELEMENT_SIZE),
            ),
        }
    }

    /// The unrotated frame in canvas coordinates.
    pub fn frame(&self) -> Bounds {
        let (width, height) = self.size();
        bounds(self.x, self.y, width, height)
    }

    /// Move the frame so its top-left corner lands on `b` and adopt its size.
    ///
    /// Auto-sized text keeps following its content.
    pub fn set_frame(&mut self, b: &Bounds) {
        self.x = b.left;
        self.y = b.top;
        if self.is_text() && self.width.is_none() {
            return;
        }
        self.width = Some(b.width);
        self.height = Some(b.height);
    }

    /// Check if a point lies inside the (unrotated) frame.
    pub fn contains(&self, point: Point) -> bool {
        self.frame().to_rect().contains(point)
    }

    /// Copy with a fresh id, offset by `(dx, dy)`, outside any group.
    pub fn duplicate(&self, dx: f64, dy: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: self.x + dx,
            y: self.y + dy,
            group_id: None,
            ..self.clone()
        }
    }
}

impl GuideTarget for CanvasElement {
    fn guide_id(&self) -> Uuid {
        self.id
    }

    fn guide_bounds(&self) -> Bounds {
        self.frame()
    }
}
