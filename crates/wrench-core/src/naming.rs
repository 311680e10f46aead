//! Naming convention utilities for code generation.
//!
//! Host classes and members use `PascalCase` identifiers while the schema
//! language wants `snake_case` field and file names and `camelCase`
//! annotation names.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `FooBarBaz` | [`to_snake_case`] | `foo_bar_baz` |
//! | `foo_bar` | [`to_camel_case`] | `fooBar` |
//!
//! Both functions work on ASCII identifiers; non-ASCII characters pass through.

/// Convert PascalCase or camelCase to snake_case.
///
/// Every uppercase letter is lowercased, and every uppercase letter other than
/// the first character gets an underscore in front of it. Already snake_case
/// input is returned unchanged.
///
/// # Examples
///
/// ```
/// use wrench_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("FooBarBaz"), "foo_bar_baz");
/// assert_eq!(to_snake_case("HeapObject"), "heap_object");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i != 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert snake_case to camelCase.
///
/// The first character is lowercased. An underscore is dropped and the
/// lowercase letter after it is capitalized; anything else after an
/// underscore passes through as-is.
///
/// # Examples
///
/// ```
/// use wrench_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("foo_bar"), "fooBar");
/// assert_eq!(to_camel_case("generate_body_descriptor"), "generateBodyDescriptor");
/// assert_eq!(to_camel_case("Export"), "export");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for (i, c) in s.chars().enumerate() {
        if i == 0 && c.is_ascii_uppercase() {
            result.push(c.to_ascii_lowercase());
        } else if c == '_' {
            capitalize_next = true;
        } else if capitalize_next && c.is_ascii_lowercase() {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
            capitalize_next = false;
        }
    }

    result
}
