//! Intermediate representation for generated classes.
//!
//! A [`ClassRecord`] is created as a stub by the query stage, filled in once by
//! the annotation and field stages, and consumed once by the emitter.

use crate::ast::DeclId;
use serde::Serialize;

/// One matched, generation-eligible class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    /// Class name, unique within a run
    pub name: String,

    /// Single direct base, if any
    pub base_class: Option<String>,

    /// Annotations in source order
    pub annotations: Vec<Annotation>,

    /// Fields in declaration order
    pub fields: Vec<Field>,

    /// Human-readable origin, used for the generated-file banner
    pub source_location: String,

    /// Handle into the analyzed forest, only valid for the current run
    #[serde(skip)]
    pub decl: DeclId,
}

impl ClassRecord {
    /// A record as produced by the query stage, before extraction and reflection
    pub fn stub(decl: DeclId, name: impl Into<String>, source_location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_class: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            source_location: source_location.into(),
            decl,
        }
    }
}

/// Class-level annotation such as `@export` or `@size(3, 7)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub name: String,

    /// Stringified argument values
    pub arguments: Vec<String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = impl ToString>) -> Self {
        self.arguments = arguments.into_iter().map(|a| a.to_string()).collect();
        self
    }
}

/// A reflected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// snake_case field name
    pub name: String,

    /// Schema type name
    #[serde(rename = "type")]
    pub ty: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}
