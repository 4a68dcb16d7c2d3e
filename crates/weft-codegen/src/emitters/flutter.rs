//! Flutter emitter.
//!
//! Works directly from each widget's `FinalStyle`: boxes become
//! `Container`/`BoxDecoration`, layouts become `Row`/`Column`/`Stack`, and
//! every wrapper maps to the Flutter widget of the same name. Vectors are
//! embedded as SVG strings rendered by `flutter_svg`.

use super::Emitter;
use crate::config::FlutterConfig;
use crate::error::Result;
use crate::syntax::{self, dart_string, Arg, Attr, Element, Expr, Import, Language, Markup, Module, Statement};
use tracing::{debug, warn};
use weft_core::{
    Arrangement, AxisAlignment, Background, BlurKind, BoxFit, BoxShape, Color, CornerRadius,
    Direction, EdgeInsets, FinalStyle, Gradient, IconSpec, LayoutChild, StretchAxis, TextAlign,
    TextDecoration, TextSpec, Widget, WidgetKind,
};
use weft_style::{css, element_of, AttrValue, ElementSpec, ReservedWords, ScopedVariableNamer};

/// Flutter code generator.
pub struct FlutterEmitter {
    config: FlutterConfig,
}

impl FlutterEmitter {
    pub fn new(config: FlutterConfig) -> Self {
        Self { config }
    }
}

impl Emitter for FlutterEmitter {
    fn framework_name(&self) -> &'static str {
        "flutter"
    }

    fn emit(&self, entry: &Widget) -> Result<Module> {
        let mut namer = ScopedVariableNamer::new(entry.key.id.clone(), ReservedWords::Dart);
        let name = namer.name_it(entry.unwrapped().key.name());

        let mut builder = DartBuilder::default();
        let body = builder.widget(entry, None);

        let mut module = Module::new(name.clone(), self.config.language.into());
        module.export_member(&name);
        module.import(Import::bare("package:flutter/material.dart"));
        module.depend("flutter");
        if builder.uses_blur {
            module.import(Import::aliased("dart:ui", "ui"));
        }
        if builder.uses_svg {
            module.import(Import::bare("package:flutter_svg/flutter_svg.dart"));
            module.depend("flutter_svg");
        }
        module.body.push(Statement::Return(body));

        debug!(
            scope = namer.scope(),
            component = %module.name,
            "Emitted Flutter module"
        );
        Ok(module)
    }
}

/// Lowers widgets to Dart expressions, recording which optional imports
/// the output needs.
#[derive(Default)]
struct DartBuilder {
    uses_blur: bool,
    uses_svg: bool,
}

impl DartBuilder {
    /// `parent` is the direction of the enclosing flex layout, if any.
    fn widget(&mut self, widget: &Widget, parent: Option<Direction>) -> Expr {
        match &widget.kind {
            WidgetKind::Text(spec) => self.text(widget, spec),
            WidgetKind::Container(spec) => {
                let child = self.stack(&spec.children);
                container(widget, spec.shape, spec.clip, child)
            }
            WidgetKind::Layout(spec) => {
                let child = match spec.arrangement {
                    Arrangement::Flex(flex) => {
                        let callee = match flex.direction {
                            Direction::Row => "Row",
                            Direction::Column => "Column",
                        };
                        let children = self.flex_children(&spec.children, flex.direction, flex.gap);
                        Some(Expr::call(
                            callee,
                            vec![
                                Arg::named(
                                    "mainAxisAlignment",
                                    Expr::lit(format!("MainAxisAlignment.{}", main_axis(flex.main_axis))),
                                ),
                                Arg::named(
                                    "crossAxisAlignment",
                                    Expr::lit(format!("CrossAxisAlignment.{}", cross_axis(flex.cross_axis))),
                                ),
                                Arg::named("children", Expr::List(children)),
                            ],
                        ))
                    }
                    Arrangement::Stack => self.stack(&spec.children),
                };
                let clip = spec.is_root;
                container(widget, BoxShape::Rectangle, clip, child)
            }
            WidgetKind::Group(children) => {
                let mut args = size_args(&widget.style);
                if let Some(stack) = self.stack(children) {
                    args.push(Arg::named("child", stack));
                }
                Expr::call("SizedBox", args)
            }
            WidgetKind::Image(spec) => {
                let fit = match spec.fit {
                    BoxFit::Cover => "cover",
                    BoxFit::Contain => "contain",
                    BoxFit::Fill => "fill",
                };
                let mut args = vec![Arg::Positional(Expr::lit(dart_string(&spec.src.source())))];
                args.extend(size_args(&widget.style));
                args.push(Arg::named("fit", Expr::lit(format!("BoxFit.{fit}"))));
                let image = Expr::call("Image.network", args);
                match &widget.style.border_radius {
                    Some(radius) if !radius.is_zero() => Expr::call(
                        "ClipRRect",
                        vec![
                            Arg::named("borderRadius", border_radius(radius)),
                            Arg::named("child", image),
                        ],
                    ),
                    _ => image,
                }
            }
            WidgetKind::Icon(spec) => icon(spec),
            WidgetKind::Vector(_) | WidgetKind::BooleanOperation(_) => self.svg(widget),

            WidgetKind::Opacity { opacity, child } => wrap(
                "Opacity",
                vec![Arg::named("opacity", num(*opacity))],
                self.widget(child, parent),
            ),
            WidgetKind::Stretched { axis, child } => {
                let child = self.widget(child, parent);
                let axis = match (axis, parent) {
                    (StretchAxis::Cross, Some(Direction::Row)) => StretchAxis::Vertical,
                    (StretchAxis::Cross, Some(Direction::Column)) => StretchAxis::Horizontal,
                    (StretchAxis::Cross, None) => return child,
                    (axis, _) => *axis,
                };
                match axis {
                    StretchAxis::Horizontal => {
                        wrap("SizedBox", vec![Arg::named("width", Expr::lit("double.infinity"))], child)
                    }
                    StretchAxis::Vertical => {
                        wrap("SizedBox", vec![Arg::named("height", Expr::lit("double.infinity"))], child)
                    }
                    StretchAxis::Both | StretchAxis::Cross => wrap("SizedBox.expand", vec![], child),
                }
            }
            // hoisted to the flex child boundary, see `flex_children`
            WidgetKind::Expanded { child, .. } => self.widget(child, parent),
            WidgetKind::Blurred { blur, child } => {
                self.uses_blur = true;
                let filter = Expr::call(
                    "ui.ImageFilter.blur",
                    vec![
                        Arg::named("sigmaX", num(blur.radius)),
                        Arg::named("sigmaY", num(blur.radius)),
                    ],
                );
                let child = self.widget(child, parent);
                match blur.kind {
                    BlurKind::Layer => wrap("ImageFiltered", vec![Arg::named("imageFilter", filter)], child),
                    BlurKind::Background => wrap(
                        "ClipRect",
                        vec![],
                        wrap("BackdropFilter", vec![Arg::named("filter", filter)], child),
                    ),
                }
            }
            WidgetKind::Rotation { angle, child } => wrap(
                "Transform.rotate",
                vec![Arg::named("angle", Expr::lit(format!("{angle}")))],
                self.widget(child, parent),
            ),
            WidgetKind::SizedBox {
                width,
                height,
                child,
            } => wrap(
                "SizedBox",
                vec![Arg::named("width", num(*width)), Arg::named("height", num(*height))],
                self.widget(child, parent),
            ),
            WidgetKind::OverflowBox { child } => wrap(
                "ClipRect",
                vec![],
                wrap(
                    "OverflowBox",
                    vec![Arg::named("alignment", Expr::lit("Alignment.topLeft"))],
                    self.widget(child, parent),
                ),
            ),
        }
    }

    fn text(&mut self, widget: &Widget, spec: &TextSpec) -> Expr {
        let style = &spec.style;
        let mut style_args = Vec::new();
        if let Some(c) = &spec.color {
            style_args.push(Arg::named("color", color(c)));
        }
        style_args.push(Arg::named("fontSize", num(style.font_size)));
        style_args.push(Arg::named("fontFamily", Expr::lit(dart_string(&style.font_family))));
        style_args.push(Arg::named(
            "fontWeight",
            Expr::lit(format!("FontWeight.w{}", font_weight(style.font_weight))),
        ));
        if let Some(line_height) = style.line_height.filter(|_| style.font_size > 0.0) {
            style_args.push(Arg::named("height", num(line_height / style.font_size)));
        }
        if let Some(spacing) = style.letter_spacing {
            style_args.push(Arg::named("letterSpacing", num(spacing)));
        }
        match style.decoration {
            TextDecoration::None => {}
            TextDecoration::Underline => {
                style_args.push(Arg::named("decoration", Expr::lit("TextDecoration.underline")))
            }
            TextDecoration::Strikethrough => {
                style_args.push(Arg::named("decoration", Expr::lit("TextDecoration.lineThrough")))
            }
        }

        let align = match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justified => "justify",
        };
        let text = Expr::call(
            "Text",
            vec![
                Arg::Positional(Expr::lit(dart_string(&spec.data))),
                Arg::named("style", Expr::call("TextStyle", style_args)),
                Arg::named("textAlign", Expr::lit(format!("TextAlign.{align}"))),
            ],
        );

        let mut text = match widget.style.width {
            Some(width) => wrap("SizedBox", vec![Arg::named("width", num(width))], text),
            None => text,
        };
        if let Some(constraints) = width_constraints(&widget.style) {
            text = wrap("ConstrainedBox", vec![Arg::named("constraints", constraints)], text);
        }
        text
    }

    fn svg(&mut self, widget: &Widget) -> Expr {
        self.uses_svg = true;
        let markup = syntax::render_element(&svg_element(&element_of(widget)), Language::Html);
        let inline: String = markup.lines().map(str::trim).collect();
        let mut args = vec![Arg::Positional(Expr::lit(format!("'''{inline}'''")))];
        args.extend(size_args(&widget.style));
        Expr::call("SvgPicture.string", args)
    }

    fn stack(&mut self, children: &[LayoutChild]) -> Option<Expr> {
        if children.is_empty() {
            return None;
        }
        let positioned = children
            .iter()
            .map(|child| {
                Expr::call(
                    "Positioned",
                    vec![
                        Arg::named("left", num(child.x)),
                        Arg::named("top", num(child.y)),
                        Arg::named("child", self.widget(&child.widget, None)),
                    ],
                )
            })
            .collect();
        Some(Expr::call(
            "Stack",
            vec![Arg::named("children", Expr::List(positioned))],
        ))
    }

    fn flex_children(&mut self, children: &[LayoutChild], direction: Direction, gap: f64) -> Vec<Expr> {
        let spacer = match direction {
            Direction::Row => "width",
            Direction::Column => "height",
        };
        let mut out = Vec::with_capacity(children.len() * 2);
        for (index, child) in children.iter().enumerate() {
            if index > 0 && gap > 0.0 {
                out.push(Expr::call("SizedBox", vec![Arg::named(spacer, num(gap))]));
            }
            let expr = self.widget(&child.widget, Some(direction));
            // Expanded must be a direct child of the Row/Column
            out.push(match expanded_flex(&child.widget) {
                Some(flex) => wrap("Expanded", vec![Arg::named("flex", Expr::lit(flex.to_string()))], expr),
                None => expr,
            });
        }
        out
    }
}

fn expanded_flex(head: &Widget) -> Option<u32> {
    let mut current = head;
    loop {
        if let WidgetKind::Expanded { flex, .. } = current.kind {
            return Some(flex);
        }
        current = current.wrapped()?;
    }
}

fn wrap(callee: &str, mut args: Vec<Arg>, child: Expr) -> Expr {
    args.push(Arg::named("child", child));
    Expr::call(callee, args)
}

fn container(widget: &Widget, shape: BoxShape, clip: bool, child: Option<Expr>) -> Expr {
    let style = &widget.style;
    let mut args = size_args(style);
    if let Some(constraints) = width_constraints(style) {
        args.push(Arg::named("constraints", constraints));
    }
    if let Some(padding) = style.padding.filter(|p| !p.is_zero()) {
        args.push(Arg::named("padding", edge_insets(&padding)));
    }

    let decoration = decoration(widget, shape);
    match decoration {
        Some(decoration) => args.push(Arg::named("decoration", decoration)),
        // clipping requires a decoration
        None if clip => args.push(Arg::named("decoration", Expr::call("BoxDecoration", vec![]))),
        None => {}
    }
    if clip {
        args.push(Arg::named("clipBehavior", Expr::lit("Clip.hardEdge")));
    }
    if let Some(child) = child {
        args.push(Arg::named("child", child));
    }
    Expr::call("Container", args)
}

fn decoration(widget: &Widget, shape: BoxShape) -> Option<Expr> {
    let style = &widget.style;
    let mut args = Vec::new();

    match &style.background {
        Some(Background::Color(c)) => args.push(Arg::named("color", color(c))),
        Some(Background::Gradient(g)) => match gradient(g) {
            Some(expr) => args.push(Arg::named("gradient", expr)),
            None => warn!(
                widget = %widget.key.id,
                "Gradient kind has no Flutter form, background dropped"
            ),
        },
        Some(Background::Image(src)) => args.push(Arg::named(
            "image",
            Expr::call(
                "DecorationImage",
                vec![
                    Arg::named(
                        "image",
                        Expr::call("NetworkImage", vec![Arg::Positional(Expr::lit(dart_string(&src.source())))]),
                    ),
                    Arg::named("fit", Expr::lit("BoxFit.cover")),
                ],
            ),
        )),
        None => {}
    }
    if let Some(border) = &style.border {
        args.push(Arg::named(
            "border",
            Expr::call(
                "Border.all",
                vec![
                    Arg::named("color", color(&border.color)),
                    Arg::named("width", num(border.width)),
                ],
            ),
        ));
    }
    if shape == BoxShape::Circle {
        args.push(Arg::named("shape", Expr::lit("BoxShape.circle")));
    } else if let Some(radius) = style.border_radius.filter(|r| !r.is_zero()) {
        args.push(Arg::named("borderRadius", border_radius(&radius)));
    }

    let shadows: Vec<Expr> = style
        .shadows
        .iter()
        .filter(|s| {
            if s.inset {
                warn!(widget = %widget.key.id, "Inner shadows have no Flutter form, shadow dropped");
            }
            !s.inset
        })
        .map(|s| {
            Expr::call(
                "BoxShadow",
                vec![
                    Arg::named("color", color(&s.color)),
                    Arg::named("offset", Expr::lit(format!("Offset({}, {})", css::number(s.offset_x), css::number(s.offset_y)))),
                    Arg::named("blurRadius", num(s.blur)),
                    Arg::named("spreadRadius", num(s.spread)),
                ],
            )
        })
        .collect();
    if !shadows.is_empty() {
        args.push(Arg::named("boxShadow", Expr::List(shadows)));
    }

    if args.is_empty() {
        None
    } else {
        Some(Expr::call("BoxDecoration", args))
    }
}

fn gradient(gradient: &Gradient) -> Option<Expr> {
    let stops = gradient.stops();
    let colors = Expr::List(stops.iter().map(|s| color(&s.color)).collect());
    let positions = Expr::lit(format!(
        "[{}]",
        stops
            .iter()
            .map(|s| css::number(s.position))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    match gradient {
        Gradient::Linear(linear) => {
            let radians = linear.angle.to_radians();
            let (dx, dy) = (radians.sin(), -radians.cos());
            Some(Expr::call(
                "LinearGradient",
                vec![
                    Arg::named("begin", alignment(-dx, -dy)),
                    Arg::named("end", alignment(dx, dy)),
                    Arg::named("colors", colors),
                    Arg::named("stops", positions),
                ],
            ))
        }
        Gradient::Radial(radial) => Some(Expr::call(
            "RadialGradient",
            vec![
                Arg::named(
                    "center",
                    alignment(radial.center_x * 2.0 - 1.0, radial.center_y * 2.0 - 1.0),
                ),
                Arg::named("radius", num(radial.radius * 0.5)),
                Arg::named("colors", colors),
                Arg::named("stops", positions),
            ],
        )),
        Gradient::Angular(_) | Gradient::Diamond(_) => None,
    }
}

/// Material glyphs a detected name may map to. Sorted for binary search.
const MATERIAL_ICONS: &[&str] = &[
    "account_circle", "add", "add_circle", "arrow_back", "arrow_downward", "arrow_drop_down",
    "arrow_drop_up", "arrow_forward", "arrow_upward", "bookmark", "calendar_today", "call",
    "camera_alt", "chat", "check", "check_circle", "chevron_left", "chevron_right", "close",
    "cloud", "delete", "download", "edit", "email", "error", "expand_less", "expand_more",
    "favorite", "favorite_border", "filter_list", "help", "help_outline", "home", "image",
    "info", "link", "location_on", "lock", "logout", "mail", "menu", "mic", "more_horiz",
    "more_vert", "notifications", "pause", "person", "phone", "photo_camera", "play_arrow",
    "refresh", "remove", "search", "send", "settings", "share", "shopping_cart", "sort", "star",
    "star_border", "thumb_up", "upload", "visibility", "visibility_off", "warning",
];

const FALLBACK_GLYPH: &str = "help_outline";

/// `Icons.*` member for `glyph`, or the fallback when Flutter has no such icon.
fn material_icon(glyph: &str) -> String {
    if MATERIAL_ICONS.binary_search(&glyph).is_ok() {
        return format!("Icons.{glyph}");
    }
    warn!(glyph, "No Material icon for glyph, using {FALLBACK_GLYPH}");
    format!("Icons.{FALLBACK_GLYPH}")
}

fn icon(spec: &IconSpec) -> Expr {
    match &spec.glyph {
        Some(glyph) => {
            let mut args = vec![
                Arg::Positional(Expr::lit(material_icon(glyph))),
                Arg::named("size", num(spec.size)),
            ];
            if let Some(c) = &spec.color {
                args.push(Arg::named("color", color(c)));
            }
            Expr::call("Icon", args)
        }
        None => Expr::call(
            "Image.network",
            vec![
                Arg::Positional(Expr::lit(dart_string(&spec.src.source()))),
                Arg::named("width", num(spec.size)),
                Arg::named("height", num(spec.size)),
            ],
        ),
    }
}

/// SVG markup for embedding; style records become plain `style` strings.
fn svg_element(spec: &ElementSpec) -> Element {
    Element {
        tag: spec.tag.clone(),
        attributes: spec
            .attributes
            .iter()
            .map(|a| match &a.value {
                AttrValue::Str(v) => Attr::str(a.name.clone(), v.clone()),
                AttrValue::Css(style) => Attr::str(a.name.clone(), style.to_inline()),
            })
            .collect(),
        children: spec
            .children
            .iter()
            .map(|c| Markup::Element(svg_element(c)))
            .collect(),
    }
}

fn size_args(style: &FinalStyle) -> Vec<Arg> {
    let mut args = Vec::new();
    if let Some(width) = style.width {
        args.push(Arg::named("width", num(width)));
    }
    if let Some(height) = style.height {
        args.push(Arg::named("height", num(height)));
    }
    args
}

fn width_constraints(style: &FinalStyle) -> Option<Expr> {
    let mut args = Vec::new();
    if let Some(min) = style.min_width {
        args.push(Arg::named("minWidth", num(min)));
    }
    if let Some(max) = style.max_width {
        args.push(Arg::named("maxWidth", num(max)));
    }
    (!args.is_empty()).then(|| Expr::call("BoxConstraints", args))
}

fn edge_insets(insets: &EdgeInsets) -> Expr {
    if *insets == EdgeInsets::all(insets.top) {
        return Expr::call("EdgeInsets.all", vec![Arg::Positional(num(insets.top))]);
    }
    Expr::call(
        "EdgeInsets.only",
        vec![
            Arg::named("left", num(insets.left)),
            Arg::named("top", num(insets.top)),
            Arg::named("right", num(insets.right)),
            Arg::named("bottom", num(insets.bottom)),
        ],
    )
}

fn border_radius(radius: &CornerRadius) -> Expr {
    if radius.is_uniform() {
        return Expr::call("BorderRadius.circular", vec![Arg::Positional(num(radius.top_left))]);
    }
    let corner = |value: f64| Expr::call("Radius.circular", vec![Arg::Positional(num(value))]);
    Expr::call(
        "BorderRadius.only",
        vec![
            Arg::named("topLeft", corner(radius.top_left)),
            Arg::named("topRight", corner(radius.top_right)),
            Arg::named("bottomRight", corner(radius.bottom_right)),
            Arg::named("bottomLeft", corner(radius.bottom_left)),
        ],
    )
}

fn alignment(x: f64, y: f64) -> Expr {
    Expr::lit(format!("Alignment({}, {})", css::number(x), css::number(y)))
}

fn color(color: &Color) -> Expr {
    Expr::lit(format!("Color(0x{})", color.to_argb_hex()))
}

fn num(value: f64) -> Expr {
    Expr::lit(css::number(value))
}

fn font_weight(weight: u16) -> u16 {
    (weight.saturating_add(50) / 100 * 100).clamp(100, 900)
}

fn main_axis(alignment: AxisAlignment) -> &'static str {
    match alignment {
        AxisAlignment::Min => "start",
        AxisAlignment::Center => "center",
        AxisAlignment::Max => "end",
        AxisAlignment::SpaceBetween => "spaceBetween",
    }
}

fn cross_axis(alignment: AxisAlignment) -> &'static str {
    match alignment {
        AxisAlignment::Min | AxisAlignment::SpaceBetween => "start",
        AxisAlignment::Center => "center",
        AxisAlignment::Max => "end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{
        AngularGradient, Blur, ContainerSpec, FlexSpec, GradientStop, LayoutSpec, LinearGradient,
        TextStyle, VectorPath, VectorSpec, WidgetKey,
    };

    fn boxed(id: &str, style: FinalStyle) -> Widget {
        Widget::new(
            WidgetKey::new(id, id),
            style,
            WidgetKind::Container(ContainerSpec::default()),
        )
    }

    fn emit(widget: &Widget) -> Module {
        FlutterEmitter::new(FlutterConfig::default()).emit(widget).unwrap()
    }

    #[test]
    fn test_material_icons_sorted() {
        assert!(MATERIAL_ICONS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_icon_glyphs_map_to_material_icons() {
        let glyph_icon = |glyph: &str| {
            let spec = IconSpec {
                glyph: Some(glyph.to_string()),
                size: 24.0,
                color: None,
                src: weft_core::ImageRef::Reserved("i".into()),
            };
            let widget = Widget::new(
                WidgetKey::new("1:1", "Glyph"),
                FinalStyle::sized(24.0, 24.0),
                WidgetKind::Icon(spec),
            );
            emit(&widget).to_source()
        };

        assert!(glyph_icon("close").contains("Icon(Icons.close, size: 24)"));
        assert!(glyph_icon("chevron_right").contains("Icons.chevron_right"));

        let unknown = glyph_icon("navigation_chevron_right");
        assert!(unknown.contains("Icon(Icons.help_outline, size: 24)"));
        assert!(!unknown.contains("navigation_chevron_right"));
    }

    #[test]
    fn test_container_decoration() {
        let mut style = FinalStyle::sized(100.0, 40.0);
        style.background = Some(Background::Color(Color::WHITE));
        style.border_radius = Some(CornerRadius::uniform(8.0));
        let source = emit(&boxed("Button", style)).to_source();

        assert!(source.contains("class Button extends StatelessWidget"));
        assert!(source.contains(
            "return Container(\n      width: 100,\n      height: 40,\n      decoration: BoxDecoration(\n        color: Color(0xffffffff),\n        borderRadius: BorderRadius.circular(8),\n      ),\n    );"
        ));
    }

    #[test]
    fn test_wrappers_map_to_flutter_widgets() {
        let base = boxed("card", FinalStyle::sized(10.0, 10.0));
        let wrapped = Widget::wrap(
            base.key.derived("rotation"),
            WidgetKind::Rotation {
                angle: -1.5707963267948966,
                child: Box::new(Widget::wrap(
                    base.key.derived("blur-0"),
                    WidgetKind::Blurred {
                        blur: Blur {
                            kind: BlurKind::Layer,
                            radius: 4.0,
                        },
                        child: Box::new(Widget::wrap(
                            base.key.derived("opacity"),
                            WidgetKind::Opacity {
                                opacity: 0.5,
                                child: Box::new(base),
                            },
                        )),
                    },
                )),
            },
        );
        let module = emit(&wrapped);
        let source = module.to_source();

        assert!(source.contains("return Transform.rotate(\n      angle: -1.5707963267948966,\n      child: ImageFiltered("));
        assert!(source.contains("imageFilter: ui.ImageFilter.blur(sigmaX: 4, sigmaY: 4)"));
        assert!(source.contains("child: Opacity(\n"));
        assert!(source.contains("import 'dart:ui' as ui;"));
        assert_eq!(module.dependencies, ["flutter"]);
    }

    #[test]
    fn test_expanded_hoisted_to_flex_child() {
        let child = boxed("item", FinalStyle::sized(10.0, 10.0));
        let expanded = Widget::wrap(
            child.key.derived("opacity"),
            WidgetKind::Opacity {
                opacity: 0.5,
                child: Box::new(Widget::wrap(
                    child.key.derived("expanded"),
                    WidgetKind::Expanded {
                        flex: 2,
                        child: Box::new(child),
                    },
                )),
            },
        );
        let row = Widget::new(
            WidgetKey::new("row", "row"),
            FinalStyle::default(),
            WidgetKind::Layout(LayoutSpec {
                arrangement: Arrangement::Flex(FlexSpec {
                    direction: Direction::Row,
                    main_axis: AxisAlignment::Min,
                    cross_axis: AxisAlignment::Center,
                    gap: 0.0,
                }),
                children: vec![LayoutChild {
                    x: 0.0,
                    y: 0.0,
                    widget: expanded,
                }],
                is_root: false,
            }),
        );
        let source = emit(&row).to_source();
        assert!(source.contains("Expanded(\n"));
        assert!(source.contains("child: Opacity("));
        let expanded_at = source.find("Expanded(").unwrap();
        let opacity_at = source.find("Opacity(").unwrap();
        assert!(expanded_at < opacity_at);
        assert!(source.contains("crossAxisAlignment: CrossAxisAlignment.center"));
    }

    #[test]
    fn test_angular_gradient_dropped() {
        let mut style = FinalStyle::sized(10.0, 10.0);
        style.background = Some(Background::Gradient(Gradient::Angular(AngularGradient {
            start_angle: 0.0,
            stops: vec![GradientStop::new(0.0, Color::WHITE)],
        })));
        let source = emit(&boxed("g", style)).to_source();
        assert!(!source.contains("gradient"));
        assert!(!source.contains("BoxDecoration"));
    }

    #[test]
    fn test_linear_gradient_alignment() {
        let expr = gradient(&Gradient::Linear(LinearGradient::vertical(vec![
            GradientStop::new(0.0, Color::WHITE),
            GradientStop::new(1.0, Color::BLACK),
        ])))
        .unwrap();
        let Expr::Call { args, .. } = expr else {
            panic!("expected a call");
        };
        assert_eq!(args[0], Arg::named("begin", Expr::lit("Alignment(0, -1)")));
        assert_eq!(args[1], Arg::named("end", Expr::lit("Alignment(0, 1)")));
    }

    #[test]
    fn test_vector_uses_flutter_svg() {
        let vector = Widget::new(
            WidgetKey::new("v", "glyph"),
            FinalStyle::sized(8.0, 8.0),
            WidgetKind::Vector(VectorSpec {
                paths: vec![VectorPath::new("M0 0L8 8")],
                fill: Some(Color::BLACK),
                stroke: None,
                width: 8.0,
                height: 8.0,
            }),
        );
        let module = emit(&vector);
        let source = module.to_source();
        assert!(source.contains("SvgPicture.string("));
        assert!(source.contains("'''<svg width=\"8\" height=\"8\""));
        assert!(source.contains("<path d=\"M0 0L8 8\" fill=\"#000000\" /></svg>'''"));
        assert_eq!(module.dependencies, ["flutter", "flutter_svg"]);
    }

    #[test]
    fn test_text_style() {
        let text = Widget::new(
            WidgetKey::new("t", "label"),
            FinalStyle::default(),
            WidgetKind::Text(TextSpec {
                data: "Price: $5".into(),
                style: TextStyle {
                    font_weight: 640,
                    ..TextStyle::default()
                },
                color: None,
                tag: None,
            }),
        );
        let source = emit(&text).to_source();
        assert!(source.contains("\"Price: \\$5\""));
        assert!(source.contains("fontWeight: FontWeight.w600"));
    }
}
