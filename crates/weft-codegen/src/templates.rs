//! Template engine for scaffolds.

use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self::register_helpers(&mut handlebars);
        Self { handlebars }
    }

    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.handlebars.has_template(name) {
            return Err(CodegenError::TemplateNotFound(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        // {{indent text 4}}: indent every non-blank line
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(2) as usize;
                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );

        handlebars.register_helper(
            "kebab_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    use convert_case::{Case, Casing};
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&param.to_case(Case::Kebab))?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_does_not_escape_code() {
        let mut engine = TemplateEngine::new();
        engine.register_template("t", "<{{tag}} />").unwrap();
        let result = engine.render("t", &json!({ "tag": "a && b" })).unwrap();
        assert_eq!(result, "<a && b />");
    }

    #[test]
    fn test_indent_helper() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{indent body 4}}", &json!({ "body": "a\n\nb" }))
            .unwrap();
        assert_eq!(result, "    a\n\n    b");
    }

    #[test]
    fn test_kebab_case_helper() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{kebab_case name}}", &json!({ "name": "RootWrapperCard" }))
            .unwrap();
        assert_eq!(result, "root-wrapper-card");
    }

    #[test]
    fn test_missing_template() {
        let engine = TemplateEngine::new();
        assert!(matches!(
            engine.render("nope", &json!({})),
            Err(CodegenError::TemplateNotFound(_))
        ));
    }
}
