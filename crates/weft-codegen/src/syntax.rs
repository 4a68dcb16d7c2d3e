//! Abstract source files and their stringifier.
//!
//! Emitters build a [`Module`] (imports, shared declarations, a component
//! body) and leave all formatting to [`Module::to_source`]. The same module
//! model serves JSX/TSX, Dart and HTML output.

use std::fmt::Write;
use weft_style::CssProperties;

const INDENT: &str = "  ";

/// Output language of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Tsx,
    Jsx,
    Dart,
    Html,
}

impl Language {
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Tsx => "tsx",
            Language::Jsx => "jsx",
            Language::Dart => "dart",
            Language::Html => "html",
        }
    }

    fn is_script(&self) -> bool {
        matches!(self, Language::Tsx | Language::Jsx)
    }
}

/// How the component of a script module is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportStyle {
    #[default]
    Default,
    Named,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub source: String,
    pub default: Option<String>,
    pub named: Vec<String>,
    /// Namespace alias (`import 'dart:ui' as ui;`).
    pub alias: Option<String>,
}

impl Import {
    /// `import name from "source";`
    pub fn default_from(name: &str, source: &str) -> Self {
        Self {
            source: source.to_string(),
            default: Some(name.to_string()),
            named: Vec::new(),
            alias: None,
        }
    }

    /// A bare import, such as a Dart package import.
    pub fn bare(source: &str) -> Self {
        Self {
            source: source.to_string(),
            default: None,
            named: Vec::new(),
            alias: None,
        }
    }

    pub fn aliased(source: &str, alias: &str) -> Self {
        Self {
            alias: Some(alias.to_string()),
            ..Self::bare(source)
        }
    }

    fn render(&self, language: Language) -> String {
        if language == Language::Dart {
            return match &self.alias {
                Some(alias) => format!("import '{}' as {alias};", self.source),
                None => format!("import '{}';", self.source),
            };
        }
        let mut bindings = Vec::new();
        if let Some(alias) = &self.alias {
            bindings.push(format!("* as {alias}"));
        }
        if let Some(default) = &self.default {
            bindings.push(default.clone());
        }
        if !self.named.is_empty() {
            bindings.push(format!("{{ {} }}", self.named.join(", ")));
        }
        if bindings.is_empty() {
            format!("import \"{}\";", self.source)
        } else {
            format!("import {} from \"{}\";", bindings.join(", "), self.source)
        }
    }
}

/// A top-level declaration shared by the component body.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// ``const Name = styled.tag`...`;``
    StyledComponent {
        name: String,
        tag: String,
        style: CssProperties,
    },
    /// A CSS rule inside the module's `<style>` block.
    CssRule {
        selector: String,
        style: CssProperties,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrExpr {
    Str(String),
    /// An inline JS style object, camelCase keys.
    StyleObject(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: AttrExpr,
}

impl Attr {
    pub fn str(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AttrExpr::Str(value.into()),
        }
    }
}

/// A markup element (JSX or HTML).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attr>,
    pub children: Vec<Markup>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(Element),
    Text(String),
}

/// An expression in a component body.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Markup(Element),
    /// A constructor or function call, `callee(args)`.
    Call { callee: String, args: Vec<Arg> },
    /// Source text written verbatim.
    Literal(String),
    List(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Expr),
    Named(String, Expr),
}

impl Expr {
    pub fn call(callee: impl Into<String>, args: Vec<Arg>) -> Self {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn lit(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    fn is_simple(&self) -> bool {
        match self {
            Expr::Literal(_) => true,
            Expr::Call { args, .. } => args.is_empty(),
            Expr::Markup(_) | Expr::List(_) => false,
        }
    }
}

impl Arg {
    pub fn named(name: &str, value: Expr) -> Self {
        Arg::Named(name.to_string(), value)
    }

    fn expr(&self) -> &Expr {
        match self {
            Arg::Positional(e) | Arg::Named(_, e) => e,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Return(Expr),
}

/// A complete generated source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Component name, also the exported identifier.
    pub name: String,
    pub language: Language,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
    pub body: Vec<Statement>,
    /// How the component itself is exported, when it is listed in `exports`.
    pub export: ExportStyle,
    /// Exported member names. Script modules leave unlisted members private.
    pub exports: Vec<String>,
    /// Packages the generated code depends on.
    pub dependencies: Vec<String>,
}

impl Module {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            name: name.into(),
            exports: Vec::new(),
            language,
            imports: Vec::new(),
            declarations: Vec::new(),
            body: Vec::new(),
            export: ExportStyle::default(),
            dependencies: Vec::new(),
        }
    }

    /// Add an import unless one from the same source exists.
    pub fn import(&mut self, import: Import) {
        if !self.imports.iter().any(|i| i.source == import.source) {
            self.imports.push(import);
        }
    }

    /// List `name` as exported.
    pub fn export_member(&mut self, name: &str) {
        if !self.exports.iter().any(|e| e == name) {
            self.exports.push(name.to_string());
        }
    }

    pub fn depend(&mut self, package: &str) {
        if !self.dependencies.iter().any(|d| d == package) {
            self.dependencies.push(package.to_string());
        }
    }

    pub fn to_source(&self) -> String {
        let imports = self.render_imports();
        let rest = self.render_without_imports();
        if imports.is_empty() {
            rest
        } else {
            format!("{imports}\n{rest}")
        }
    }

    /// Import lines, one per import, newline terminated.
    pub fn render_imports(&self) -> String {
        self.imports
            .iter()
            .map(|i| format!("{}\n", i.render(self.language)))
            .collect()
    }

    /// Everything after the imports.
    pub fn render_without_imports(&self) -> String {
        match self.language {
            Language::Tsx | Language::Jsx => self.render_script(),
            Language::Dart => self.render_dart(),
            Language::Html => self.render_html(),
        }
    }

    fn render_script(&self) -> String {
        let exported = self.exports.iter().any(|e| *e == self.name);
        let keyword = match self.export {
            _ if !exported => "function",
            ExportStyle::Default => "export default function",
            ExportStyle::Named => "export function",
        };
        let mut out = format!("{keyword} {}() {{\n", self.name);
        for statement in &self.body {
            let Statement::Return(expr) = statement;
            out.push_str(&format!("{INDENT}return (\n"));
            out.push_str(&script_expr(expr, 2, self.language));
            out.push_str(&format!("{INDENT});\n"));
        }
        out.push_str("}\n");

        for declaration in &self.declarations {
            out.push('\n');
            out.push_str(&render_declaration(declaration));
        }

        let members: Vec<&str> = self
            .exports
            .iter()
            .filter(|e| **e != self.name)
            .map(String::as_str)
            .collect();
        if !members.is_empty() {
            let _ = writeln!(out, "\nexport {{ {} }};", members.join(", "));
        }
        out
    }

    fn render_dart(&self) -> String {
        let name = &self.name;
        let mut out = String::new();
        let _ = writeln!(out, "class {name} extends StatelessWidget {{");
        let _ = writeln!(out, "{INDENT}const {name}({{Key? key}}) : super(key: key);");
        out.push('\n');
        let _ = writeln!(out, "{INDENT}@override");
        let _ = writeln!(out, "{INDENT}Widget build(BuildContext context) {{");
        for statement in &self.body {
            let Statement::Return(expr) = statement;
            let _ = writeln!(out, "{INDENT}{INDENT}return {};", dart_expr(expr, 2));
        }
        let _ = writeln!(out, "{INDENT}}}");
        out.push_str("}\n");
        out
    }

    fn render_html(&self) -> String {
        let mut out = String::new();
        let stylesheet = self.render_stylesheet();
        if !stylesheet.is_empty() {
            out.push_str("<style>\n");
            for line in stylesheet.lines() {
                if line.is_empty() {
                    out.push('\n');
                } else {
                    let _ = writeln!(out, "{INDENT}{line}");
                }
            }
            out.push_str("</style>\n");
        }
        out.push_str(&self.render_markup());
        out
    }

    /// CSS rules of an HTML module, blank-line separated.
    pub fn render_stylesheet(&self) -> String {
        self.declarations
            .iter()
            .map(render_declaration)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Body markup of an HTML module.
    pub fn render_markup(&self) -> String {
        self.body
            .iter()
            .map(|statement| {
                let Statement::Return(expr) = statement;
                script_expr(expr, 0, Language::Html)
            })
            .collect()
    }
}

/// Markup of a single element, e.g. an inline SVG embedded in Dart.
pub(crate) fn render_element(element: &Element, language: Language) -> String {
    let mut out = String::new();
    markup(element, 0, language, &mut out);
    out
}

fn render_declaration(declaration: &Declaration) -> String {
    match declaration {
        Declaration::StyledComponent { name, tag, style } if style.is_empty() => {
            format!("const {name} = styled.{tag}``;\n")
        }
        Declaration::StyledComponent { name, tag, style } => {
            format!("const {name} = styled.{tag}`\n{}`;\n", style.to_block(2))
        }
        Declaration::CssRule { selector, style } => {
            format!("{selector} {{\n{}}}\n", style.to_block(2))
        }
    }
}

fn script_expr(expr: &Expr, depth: usize, language: Language) -> String {
    match expr {
        Expr::Markup(element) => {
            let mut out = String::new();
            markup(element, depth, language, &mut out);
            out
        }
        other => format!("{}{}\n", INDENT.repeat(depth), dart_expr(other, depth)),
    }
}

/// Elements that never carry children in HTML output.
fn self_closing_html(tag: &str) -> bool {
    matches!(tag, "img" | "path" | "br" | "hr" | "input" | "meta")
}

fn markup(element: &Element, depth: usize, language: Language, out: &mut String) {
    let pad = INDENT.repeat(depth);
    let attrs: String = element
        .attributes
        .iter()
        .map(|a| format!(" {}", attribute(a, language)))
        .collect();
    let tag = &element.tag;

    if element.children.is_empty() {
        if language.is_script() || self_closing_html(tag) {
            let _ = writeln!(out, "{pad}<{tag}{attrs} />");
        } else {
            let _ = writeln!(out, "{pad}<{tag}{attrs}></{tag}>");
        }
        return;
    }

    if let [Markup::Text(text)] = element.children.as_slice() {
        let _ = writeln!(out, "{pad}<{tag}{attrs}>{}</{tag}>", text_content(text, language));
        return;
    }

    let _ = writeln!(out, "{pad}<{tag}{attrs}>");
    for child in &element.children {
        match child {
            Markup::Element(e) => markup(e, depth + 1, language, out),
            Markup::Text(text) => {
                let _ = writeln!(out, "{pad}{INDENT}{}", text_content(text, language));
            }
        }
    }
    let _ = writeln!(out, "{pad}</{tag}>");
}

fn attribute(attr: &Attr, language: Language) -> String {
    match (&attr.value, language.is_script()) {
        (AttrExpr::Str(value), true) if value.contains('"') => {
            format!("{}={{{}}}", attr.name, js_string(value))
        }
        (AttrExpr::Str(value), true) => format!("{}=\"{}\"", attr.name, value),
        (AttrExpr::Str(value), false) => format!("{}=\"{}\"", attr.name, escape_html(value)),
        (AttrExpr::StyleObject(entries), _) => {
            let body = entries
                .iter()
                .map(|(k, v)| format!("{k}: {}", js_string(v)))
                .collect::<Vec<_>>()
                .join(", ");
            if body.is_empty() {
                format!("{}={{{{}}}}", attr.name)
            } else {
                format!("{}={{{{ {body} }}}}", attr.name)
            }
        }
    }
}

fn text_content(text: &str, language: Language) -> String {
    if language.is_script() {
        if text.contains(['{', '}', '<', '>', '\n']) {
            format!("{{{}}}", js_string(text))
        } else {
            text.to_string()
        }
    } else {
        escape_html(text)
    }
}

/// A double-quoted JS string literal.
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A double-quoted Dart string literal.
pub(crate) fn dart_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Dart-style call formatting: short calls on one line, anything nested
/// broken over lines with trailing commas.
fn dart_expr(expr: &Expr, depth: usize) -> String {
    match expr {
        Expr::Literal(text) => text.clone(),
        Expr::Markup(element) => {
            let mut out = String::new();
            markup(element, 0, Language::Html, &mut out);
            out.trim_end().to_string()
        }
        Expr::List(items) if items.is_empty() => "[]".to_string(),
        Expr::List(items) => {
            let pad = INDENT.repeat(depth);
            let mut out = "[\n".to_string();
            for item in items {
                let _ = writeln!(out, "{pad}{INDENT}{},", dart_expr(item, depth + 1));
            }
            out.push_str(&format!("{pad}]"));
            out
        }
        Expr::Call { callee, args } => {
            let inline: Vec<String> = args.iter().map(|a| dart_arg(a, depth)).collect();
            let one_line = format!("{callee}({})", inline.join(", "));
            if args.iter().all(|a| a.expr().is_simple()) && one_line.len() <= 72 {
                return one_line;
            }
            let pad = INDENT.repeat(depth);
            let mut out = format!("{callee}(\n");
            for arg in args {
                let _ = writeln!(out, "{pad}{INDENT}{},", dart_arg(arg, depth + 1));
            }
            out.push_str(&format!("{pad})"));
            out
        }
    }
}

fn dart_arg(arg: &Arg, depth: usize) -> String {
    match arg {
        Arg::Positional(e) => dart_expr(e, depth),
        Arg::Named(name, e) => format!("{name}: {}", dart_expr(e, depth)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(tag: &str, data: &str) -> Element {
        Element {
            tag: tag.to_string(),
            attributes: vec![],
            children: vec![Markup::Text(data.to_string())],
        }
    }

    #[test]
    fn test_script_module_layout() {
        let mut module = Module::new("Card", Language::Tsx);
        module.export_member("Card");
        module.import(Import::default_from("React", "react"));
        module.import(Import::default_from("React", "react"));
        let mut style = CssProperties::new();
        style.set("width", "10px");
        module.declarations.push(Declaration::StyledComponent {
            name: "Title".into(),
            tag: "span".into(),
            style,
        });
        module.body.push(Statement::Return(Expr::Markup(text("Title", "Hi"))));

        let source = module.to_source();
        assert_eq!(
            source,
            "import React from \"react\";\n\
             \n\
             export default function Card() {\n  \
               return (\n    \
                 <Title>Hi</Title>\n  \
               );\n\
             }\n\
             \n\
             const Title = styled.span`\n  \
               width: 10px;\n\
             `;\n"
        );
    }

    #[test]
    fn test_exported_members() {
        let mut module = Module::new("Card", Language::Jsx);
        module.declarations.push(Declaration::StyledComponent {
            name: "Title".into(),
            tag: "span".into(),
            style: CssProperties::new(),
        });
        module.body.push(Statement::Return(Expr::Markup(text("Title", "Hi"))));
        assert!(module.to_source().starts_with("function Card() {"));

        module.export_member("Card");
        module.export_member("Title");
        module.export_member("Title");
        assert_eq!(module.exports, ["Card", "Title"]);

        let source = module.to_source();
        assert!(source.starts_with("export default function Card() {"));
        assert!(source.ends_with("const Title = styled.span``;\n\nexport { Title };\n"));
    }

    #[test]
    fn test_jsx_escapes_braces_in_text() {
        let mut out = String::new();
        markup(&text("span", "{x}"), 0, Language::Jsx, &mut out);
        assert_eq!(out, "<span>{\"{x}\"}</span>\n");
    }

    #[test]
    fn test_html_escapes_and_closes() {
        let element = Element {
            tag: "div".into(),
            attributes: vec![Attr::str("title", "a \"b\"")],
            children: vec![],
        };
        let mut out = String::new();
        markup(&element, 0, Language::Html, &mut out);
        assert_eq!(out, "<div title=\"a &quot;b&quot;\"></div>\n");
    }

    #[test]
    fn test_style_object_attribute() {
        let attr = Attr {
            name: "style".into(),
            value: AttrExpr::StyleObject(vec![("backgroundColor".into(), "#FFFFFF".into())]),
        };
        assert_eq!(
            attribute(&attr, Language::Jsx),
            "style={{ backgroundColor: \"#FFFFFF\" }}"
        );
    }

    #[test]
    fn test_dart_call_breaks_nested_arguments() {
        let expr = Expr::call(
            "Opacity",
            vec![
                Arg::named("opacity", Expr::lit("0.5")),
                Arg::named("child", Expr::call("Text", vec![Arg::Positional(Expr::lit("\"a\""))])),
            ],
        );
        assert_eq!(
            dart_expr(&expr, 0),
            "Opacity(\n  opacity: 0.5,\n  child: Text(\"a\"),\n)"
        );
        assert_eq!(dart_string("a$b"), "\"a\\$b\"");
    }
}
