//! Opt-in rules deciding which classes take part in generation.
//!
//! A [`MarkerRule`] answers two questions about a record: does it opt in, and
//! which types carry its metadata. The query stage uses the first, the
//! annotation stage decodes the second.

use crate::ast::{AstForest, RecordDecl, TypeInfo, TypeRef};

/// Rule for recognizing classes opted into generation
pub trait MarkerRule {
    /// Whether `record` opts into generation
    fn is_marked(&self, forest: &dyn AstForest, record: &RecordDecl) -> bool {
        !self.markers(forest, record).is_empty()
    }

    /// Types on `record` that carry its annotations, in source order
    fn markers<'a>(&self, forest: &dyn AstForest, record: &'a RecordDecl) -> Vec<&'a TypeRef>;

    /// Name of the sentinel, for traces
    fn describe(&self) -> String;
}

/// Classes opt in by befriending a sentinel type: `friend tq::Torque<...>;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendMarker {
    sentinel: String,
}

impl FriendMarker {
    /// `sentinel` is the qualified name of the marker template, e.g. `tq::Torque`
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    fn names_sentinel(&self, forest: &dyn AstForest, ty: &TypeRef) -> bool {
        match forest.type_info(ty) {
            TypeInfo::Specialization { template, .. } => template == self.sentinel,
            TypeInfo::Record { decl, .. } => decl.qualified_name() == self.sentinel,
            _ => false,
        }
    }
}

impl MarkerRule for FriendMarker {
    fn markers<'a>(&self, forest: &dyn AstForest, record: &'a RecordDecl) -> Vec<&'a TypeRef> {
        record
            .friends
            .iter()
            .filter(|friend| self.names_sentinel(forest, friend))
            .collect()
    }

    fn describe(&self) -> String {
        format!("friend {}", self.sentinel)
    }
}
