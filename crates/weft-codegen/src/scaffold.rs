//! Minimal runnable wrappers around an emitted module.

use crate::error::Result;
use crate::syntax::{Language, Module};
use crate::templates::TemplateEngine;
use serde_json::json;

const REACT_PREVIEW: &str = r#"import ReactDOM from "react-dom";
{{code}}
ReactDOM.render(<{{component}} />, document.getElementById("root"));
"#;

const FLUTTER_MAIN: &str = r#"import 'package:flutter/material.dart';
{{imports}}
void main() {
  runApp(const App());
}

class App extends StatelessWidget {
  const App({Key? key}) : super(key: key);

  @override
  Widget build(BuildContext context) {
    return MaterialApp(
      title: '{{component}}',
      debugShowCheckedModeBanner: false,
      home: Scaffold(
        body: Builder(
          builder: (context) => const {{component}}(),
        ),
      ),
    );
  }
}

{{body}}"#;

const VANILLA_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{component}}</title>
    <style>
      body { margin: 0; }
{{indent styles 6}}
    </style>
  </head>
  <body id="{{kebab_case component}}">
{{indent markup 4}}
  </body>
</html>
"#;

/// Scaffold source for `module`, chosen by its language.
pub fn scaffold(module: &Module) -> Result<String> {
    let mut engine = TemplateEngine::new();
    match module.language {
        Language::Tsx | Language::Jsx => {
            engine.register_template("react-preview", REACT_PREVIEW)?;
            engine.render(
                "react-preview",
                &json!({ "code": module.to_source(), "component": module.name }),
            )
        }
        Language::Dart => {
            engine.register_template("flutter-main", FLUTTER_MAIN)?;
            // material is imported by the template itself
            let imports: String = module
                .render_imports()
                .lines()
                .filter(|line| !line.contains("package:flutter/material.dart"))
                .map(|line| format!("{line}\n"))
                .collect();
            engine.render(
                "flutter-main",
                &json!({
                    "imports": imports,
                    "body": module.render_without_imports(),
                    "component": module.name,
                }),
            )
        }
        Language::Html => {
            engine.register_template("vanilla-document", VANILLA_DOCUMENT)?;
            engine.render(
                "vanilla-document",
                &json!({
                    "styles": module.render_stylesheet(),
                    "markup": module.render_markup(),
                    "component": module.name,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Element, Expr, Import, Statement};

    fn body() -> Statement {
        Statement::Return(Expr::Markup(Element {
            tag: "div".into(),
            attributes: vec![],
            children: vec![],
        }))
    }

    #[test]
    fn test_react_preview_mounts_component() {
        let mut module = Module::new("Card", Language::Tsx);
        module.export_member("Card");
        module.body.push(body());
        let source = scaffold(&module).unwrap();
        assert!(source.starts_with("import ReactDOM from \"react-dom\";\n"));
        assert!(source.contains("export default function Card()"));
        assert!(source.ends_with("ReactDOM.render(<Card />, document.getElementById(\"root\"));\n"));
    }

    #[test]
    fn test_flutter_main_wraps_in_builder() {
        let mut module = Module::new("Card", Language::Dart);
        module.import(Import::bare("package:flutter/material.dart"));
        module.import(Import::aliased("dart:ui", "ui"));
        module.body.push(Statement::Return(Expr::lit("const SizedBox()")));

        let source = scaffold(&module).unwrap();
        assert_eq!(source.matches("package:flutter/material.dart").count(), 1);
        assert!(source.contains("import 'dart:ui' as ui;"));
        assert!(source.contains("builder: (context) => const Card(),"));
        assert!(source.contains("class Card extends StatelessWidget {"));
    }

    #[test]
    fn test_vanilla_document() {
        let mut module = Module::new("RootCard", Language::Html);
        module.body.push(body());
        let source = scaffold(&module).unwrap();
        assert!(source.starts_with("<!DOCTYPE html>"));
        assert!(source.contains("<body id=\"root-card\">\n    <div></div>\n  </body>"));
    }
}
