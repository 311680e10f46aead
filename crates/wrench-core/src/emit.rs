//! Schema declaration rendering.
//!
//! ```text
//! @export
//! @instanceSize(3, 7)
//! class Bar extends Foo {
//!   value: float64;
//! }
//! ```
//!
//! The emitter performs no validation; it renders whatever record it is given.

use crate::model::{Annotation, ClassRecord};
use crate::naming::to_camel_case;

/// Render the declaration for one class.
pub fn render_declaration(class: &ClassRecord) -> String {
    let mut code = String::new();

    for annotation in &class.annotations {
        code.push_str(&render_annotation(annotation));
        code.push('\n');
    }

    code.push_str("class ");
    code.push_str(&class.name);
    if let Some(base) = &class.base_class {
        code.push_str(" extends ");
        code.push_str(base);
    }
    code.push_str(" {\n");

    for field in &class.fields {
        code.push_str(&format!("  {}: {};\n", field.name, field.ty));
    }

    code.push_str("}\n");
    code
}

/// `@name` or `@name(arg0, arg1, ...)`
fn render_annotation(annotation: &Annotation) -> String {
    let name = to_camel_case(&annotation.name);
    if annotation.arguments.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name}({})", annotation.arguments.join(", "))
    }
}

/// Header placed at the top of every generated file
pub fn render_banner(tool_name: &str, source_location: &str) -> String {
    format!(
        "// This file is automatically generated by {tool_name}.\n\
         //\n\
         // WARNING: All modifications to this file will be lost with the next build!\n\
         //\n\
         // Source file: {source_location}\n\
         //\n\n"
    )
}

/// Full contents of a generated file: banner followed by the declaration
pub fn render_file(tool_name: &str, class: &ClassRecord) -> String {
    let mut code = render_banner(tool_name, &class.source_location);
    code.push_str(&render_declaration(class));
    code
}
