//! Value types shared by design nodes and widgets.

/// A color value with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create from hex string (e.g., "#FF5733" or "FF5733CC").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => {
                let mut color = Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?);
                color.a = channel(6..8)? as f32 / 255.0;
                Some(color)
            }
            _ => None,
        }
    }

    /// Returns the same color with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: (self.a as f64 * opacity) as f32,
            ..self
        }
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b), q(self.a))
    }

    /// Convert to hex string (e.g., "#FF5733"), appending alpha only when translucent.
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    /// Packed `AARRGGBB` hex digits, as used by Dart's `Color(0x...)`.
    pub fn to_argb_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        format!("{:02x}{:02x}{:02x}{:02x}", a, r, g, b)
    }

    /// CSS color value. Opaque colors use hex notation, translucent ones `rgba()`.
    pub fn to_css(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            self.to_hex()
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {})", r, g, b, alpha)
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    // Common colors
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A gradient fill.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gradient {
    Linear(LinearGradient),
    Radial(RadialGradient),
    Angular(AngularGradient),
    /// Diamond gradients have no CSS or Flutter counterpart.
    Diamond(Vec<GradientStop>),
}

impl Gradient {
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear(g) => &g.stops,
            Gradient::Radial(g) => &g.stops,
            Gradient::Angular(g) => &g.stops,
            Gradient::Diamond(stops) => stops,
        }
    }
}

/// A linear gradient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearGradient {
    /// Angle in degrees, CSS convention (0 = to top, 90 = to right, 180 = to bottom)
    pub angle: f64,
    /// Color stops
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Create a vertical gradient (top to bottom).
    pub fn vertical(stops: Vec<GradientStop>) -> Self {
        Self { angle: 180.0, stops }
    }

    /// Create a gradient with an angle.
    pub fn with_angle(angle: f64, stops: Vec<GradientStop>) -> Self {
        Self { angle, stops }
    }
}

/// A radial gradient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialGradient {
    /// Center X position (0.0 to 1.0, relative to bounds)
    pub center_x: f64,
    /// Center Y position (0.0 to 1.0, relative to bounds)
    pub center_y: f64,
    /// Radius (1.0 = extend to edge)
    pub radius: f64,
    /// Color stops
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Create a centered circular gradient.
    pub fn circle(stops: Vec<GradientStop>) -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            radius: 1.0,
            stops,
        }
    }
}

/// An angular (conic) gradient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularGradient {
    /// Starting angle in degrees
    pub start_angle: f64,
    /// Color stops
    pub stops: Vec<GradientStop>,
}

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub position: f64,
    /// Color at this position
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// How an image paint is fitted into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

/// What a paint layer draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaintKind {
    Solid(Color),
    Gradient(Gradient),
    /// Image paint; `image_ref` is the authoring tool's image hash, empty when unknown.
    Image { image_ref: String, scale_mode: ScaleMode },
}

/// A single fill or stroke layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paint {
    pub kind: PaintKind,
    pub opacity: f64,
    pub visible: bool,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid(color),
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn gradient(gradient: Gradient) -> Self {
        Self {
            kind: PaintKind::Gradient(gradient),
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn image(image_ref: impl Into<String>) -> Self {
        Self {
            kind: PaintKind::Image {
                image_ref: image_ref.into(),
                scale_mode: ScaleMode::Fill,
            },
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Solid color with the paint opacity folded into alpha.
    pub fn solid_color(&self) -> Option<Color> {
        match &self.kind {
            PaintKind::Solid(color) => Some(color.with_opacity(self.opacity)),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, PaintKind::Image { .. })
    }
}

/// The topmost visible paint of a paint list (later paints draw on top).
pub fn primary_paint(paints: &[Paint]) -> Option<&Paint> {
    paints.iter().rev().find(|p| p.visible && p.opacity > 0.0)
}

/// A shadow effect (drop shadow or inner shadow).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shadow {
    /// Horizontal offset (positive = right)
    pub offset_x: f64,
    /// Vertical offset (positive = down)
    pub offset_y: f64,
    /// Blur radius (0 = sharp edge)
    pub blur: f64,
    /// Spread radius
    pub spread: f64,
    /// Shadow color
    pub color: Color,
    /// Whether this is an inner shadow (inset)
    pub inset: bool,
}

impl Shadow {
    /// Create a new drop shadow.
    pub fn drop(offset_x: f64, offset_y: f64, blur: f64, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread: 0.0,
            color,
            inset: false,
        }
    }

    /// Create a new inner shadow.
    pub fn inner(offset_x: f64, offset_y: f64, blur: f64, color: Color) -> Self {
        Self {
            inset: true,
            ..Self::drop(offset_x, offset_y, blur, color)
        }
    }
}

/// Which pixels a blur applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlurKind {
    /// Blurs the layer's own content.
    Layer,
    /// Blurs whatever is painted behind the layer.
    Background,
}

/// A classified blur effect.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blur {
    pub kind: BlurKind,
    pub radius: f64,
}

/// A node effect.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    DropShadow(Shadow),
    InnerShadow(Shadow),
    LayerBlur { radius: f64 },
    BackgroundBlur { radius: f64 },
}

impl Effect {
    /// Classify this effect as a blur, if it is one.
    pub fn blur(&self) -> Option<Blur> {
        match *self {
            Effect::LayerBlur { radius } => Some(Blur {
                kind: BlurKind::Layer,
                radius,
            }),
            Effect::BackgroundBlur { radius } => Some(Blur {
                kind: BlurKind::Background,
                radius,
            }),
            Effect::DropShadow(_) | Effect::InnerShadow(_) => None,
        }
    }

    pub fn shadow(&self) -> Option<Shadow> {
        match *self {
            Effect::DropShadow(s) | Effect::InnerShadow(s) => Some(s),
            _ => None,
        }
    }
}

/// Per-corner radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerRadius {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadius {
    pub fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }

    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
    }
}

/// Insets on four sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeInsets {
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let c = Color::from_hex("#FF5733").unwrap();
        assert_eq!(c.to_hex(), "#FF5733");
        assert_eq!(Color::from_hex("zz"), None);
    }

    #[test]
    fn test_color_css_translucent() {
        let c = Color::from_rgb8(0, 0, 0).with_opacity(0.5);
        assert_eq!(c.to_css(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(Color::WHITE.to_css(), "#FFFFFF");
    }

    #[test]
    fn test_color_argb() {
        assert_eq!(Color::from_rgb8(0x12, 0x34, 0x56).to_argb_hex(), "ff123456");
    }

    #[test]
    fn test_primary_paint_skips_hidden() {
        let fills = vec![Paint::solid(Color::WHITE), Paint::solid(Color::BLACK).hidden()];
        assert_eq!(primary_paint(&fills).and_then(Paint::solid_color), Some(Color::WHITE));
    }

    #[test]
    fn test_effect_blur_classification() {
        assert_eq!(
            Effect::BackgroundBlur { radius: 4.0 }.blur().map(|b| b.kind),
            Some(BlurKind::Background)
        );
        assert!(Effect::DropShadow(Shadow::drop(0.0, 1.0, 2.0, Color::BLACK))
            .blur()
            .is_none());
    }
}
