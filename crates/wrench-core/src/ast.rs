//! Read-only view of the analyzed source.
//!
//! Parsing the host language is the job of an external analysis service. This
//! module models only what the generator needs from it:
//! - [`AstForest`]: the query capability the pipeline borrows for a run
//! - [`AstDump`]: an in-memory forest, deserialized from the service's JSON dump
//!   or assembled in code
//! - [`TypeRef`] / [`TemplateArg`]: the slice of the type system the pipeline
//!   understands (records, builtins, template specializations, qualified types)
//!
//! Declarations are addressed by [`DeclId`] handles. A handle is a plain index
//! into the forest and is only meaningful for the forest it came from.

use crate::error::{WrenchError, WrenchResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Handle to a record declaration in an [`AstForest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub usize);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of a declaration in the analyzed source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Builtin (non-record) types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinKind {
    Void,
    Bool,
    Char,
    Short,
    Int,
    Long,
    LongLong,
    UnsignedChar,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    UnsignedLongLong,
    Float,
    Double,
    LongDouble,
}

impl BuiltinKind {
    pub fn is_floating_point(self) -> bool {
        matches!(
            self,
            BuiltinKind::Float | BuiltinKind::Double | BuiltinKind::LongDouble
        )
    }

    /// Source spelling of the builtin
    pub fn spelling(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Char => "char",
            BuiltinKind::Short => "short",
            BuiltinKind::Int => "int",
            BuiltinKind::Long => "long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::UnsignedChar => "unsigned char",
            BuiltinKind::UnsignedShort => "unsigned short",
            BuiltinKind::UnsignedInt => "unsigned int",
            BuiltinKind::UnsignedLong => "unsigned long",
            BuiltinKind::UnsignedLongLong => "unsigned long long",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
        }
    }
}

/// A type as written in a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// Reference to a record declaration
    Record { decl: DeclId },

    /// Builtin type
    Builtin { builtin: BuiltinKind },

    /// Template specialization, `template` is the qualified template name
    Specialization {
        template: String,
        #[serde(default)]
        args: Vec<TemplateArg>,
    },

    /// Qualified type such as `Field<double>::Offset`
    Elaborated {
        #[serde(default)]
        qualifier: Option<Box<TypeRef>>,
        named: Box<TypeRef>,
    },

    /// Anything the pipeline does not model
    Other { spelling: String },
}

impl TypeRef {
    pub fn record(decl: DeclId) -> Self {
        TypeRef::Record { decl }
    }

    pub fn builtin(builtin: BuiltinKind) -> Self {
        TypeRef::Builtin { builtin }
    }

    pub fn specialization(template: impl Into<String>, args: Vec<TemplateArg>) -> Self {
        TypeRef::Specialization {
            template: template.into(),
            args,
        }
    }

    /// `qualifier::named`
    pub fn qualified(qualifier: TypeRef, named: TypeRef) -> Self {
        TypeRef::Elaborated {
            qualifier: Some(Box::new(qualifier)),
            named: Box::new(named),
        }
    }

    pub fn other(spelling: impl Into<String>) -> Self {
        TypeRef::Other {
            spelling: spelling.into(),
        }
    }

    /// Strip one level of qualification.
    ///
    /// An elaborated type yields its qualifier when it has one and its named
    /// type otherwise. Every other type is returned unchanged.
    pub fn strip_qualification(&self) -> &TypeRef {
        match self {
            TypeRef::Elaborated {
                qualifier: Some(qualifier),
                ..
            } => qualifier.as_ref(),
            TypeRef::Elaborated {
                qualifier: None,
                named,
            } => named.as_ref(),
            other => other,
        }
    }
}

/// Argument of a template specialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateArg {
    Type { ty: TypeRef },
    Integral { value: i64 },
    /// Any other argument kind (template, expression, pack, ...)
    Other { description: String },
}

impl TemplateArg {
    pub fn ty(ty: TypeRef) -> Self {
        TemplateArg::Type { ty }
    }

    pub fn integral(value: i64) -> Self {
        TemplateArg::Integral { value }
    }

    pub fn other(description: impl Into<String>) -> Self {
        TemplateArg::Other {
            description: description.into(),
        }
    }

    /// Short name of the argument kind, used in diagnostics
    pub fn kind_name(&self) -> &str {
        match self {
            TemplateArg::Type { .. } => "type",
            TemplateArg::Integral { .. } => "integral",
            TemplateArg::Other { description } => description,
        }
    }
}

/// A data member declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub is_static: bool,
}

/// A member of a record, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Var(VarDecl),
    /// Nested record declaration
    Record { decl: DeclId },
    /// Methods, type aliases, access specifiers, ...
    Other { name: String },
}

impl Member {
    pub fn static_var(name: impl Into<String>, ty: TypeRef) -> Self {
        Member::Var(VarDecl {
            name: name.into(),
            ty,
            is_static: true,
        })
    }

    pub fn instance_var(name: impl Into<String>, ty: TypeRef) -> Self {
        Member::Var(VarDecl {
            name: name.into(),
            ty,
            is_static: false,
        })
    }
}

/// A class, struct, or class template specialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDecl {
    pub name: String,

    /// Enclosing namespace path, e.g. `v8::internal`
    #[serde(default)]
    pub namespace: Option<String>,

    pub location: SourceLocation,

    /// Direct bases in declaration order
    #[serde(default)]
    pub bases: Vec<TypeRef>,

    /// Types named by `friend` declarations
    #[serde(default)]
    pub friends: Vec<TypeRef>,

    #[serde(default)]
    pub members: Vec<Member>,

    /// Present when the record is a template specialization
    #[serde(default)]
    pub template_args: Option<Vec<TemplateArg>>,
}

impl RecordDecl {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            location,
            bases: Vec::new(),
            friends: Vec::new(),
            members: Vec::new(),
            template_args: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_friend(mut self, friend: TypeRef) -> Self {
        self.friends.push(friend);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_template_args(mut self, args: Vec<TemplateArg>) -> Self {
        self.template_args = Some(args);
        self
    }

    /// `namespace::name`, or just `name` at global scope
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}::{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Innermost enclosing namespace, if any
    pub fn innermost_namespace(&self) -> Option<&str> {
        self.namespace
            .as_deref()
            .and_then(|ns| ns.rsplit("::").next())
            .filter(|ns| !ns.is_empty())
    }
}

/// Resolved view of a [`TypeRef`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeInfo<'a> {
    Record {
        id: DeclId,
        decl: &'a RecordDecl,
    },
    Builtin(BuiltinKind),
    Specialization {
        template: &'a str,
        args: &'a [TemplateArg],
    },
    Qualified {
        qualifier: &'a TypeRef,
        named: &'a TypeRef,
    },
    /// Dangling record handle or unmodeled type
    Unresolved,
}

/// Query capability over an analyzed source forest.
///
/// The forest is an immutable snapshot for the duration of a run; the pipeline
/// only ever borrows from it.
pub trait AstForest {
    /// All record declarations satisfying `predicate`, in traversal order.
    ///
    /// A declaration reachable from several translation units is returned once
    /// per occurrence. Fails if any translation unit failed to analyze.
    fn find_matches(&self, predicate: &dyn Fn(&RecordDecl) -> bool) -> WrenchResult<Vec<DeclId>>;

    /// Look up a record declaration
    fn record(&self, id: DeclId) -> Option<&RecordDecl>;

    /// Members of a record in declaration order
    fn members(&self, id: DeclId) -> &[Member] {
        self.record(id)
            .map(|record| record.members.as_slice())
            .unwrap_or(&[])
    }

    /// Human-readable origin of a declaration
    fn source_location(&self, id: DeclId) -> String {
        self.record(id)
            .map(|record| record.location.to_string())
            .unwrap_or_else(|| format!("<unknown declaration {id}>"))
    }

    /// Resolve a type, looking through unqualified elaborated types
    fn type_info<'a>(&'a self, ty: &'a TypeRef) -> TypeInfo<'a> {
        match ty {
            TypeRef::Record { decl } => match self.record(*decl) {
                Some(record) => TypeInfo::Record {
                    id: *decl,
                    decl: record,
                },
                None => TypeInfo::Unresolved,
            },
            TypeRef::Builtin { builtin } => TypeInfo::Builtin(*builtin),
            TypeRef::Specialization { template, args } => TypeInfo::Specialization {
                template: template.as_str(),
                args: args.as_slice(),
            },
            TypeRef::Elaborated {
                qualifier: None,
                named,
            } => self.type_info(named.as_ref()),
            TypeRef::Elaborated {
                qualifier: Some(qualifier),
                named,
            } => TypeInfo::Qualified {
                qualifier: qualifier.as_ref(),
                named: named.as_ref(),
            },
            TypeRef::Other { .. } => TypeInfo::Unresolved,
        }
    }

    /// Resolve a type, looking through every elaborated form.
    ///
    /// `Outer::Inner` resolves to `Inner` itself, so a record reached through
    /// a qualifier is still a record.
    fn resolve<'a>(&'a self, ty: &'a TypeRef) -> TypeInfo<'a> {
        match ty {
            TypeRef::Elaborated { named, .. } => self.resolve(named.as_ref()),
            other => self.type_info(other),
        }
    }

    /// Source-like spelling of a type, for diagnostics and traces
    fn spelling(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Record { decl } => match self.record(*decl) {
                Some(record) => {
                    let name = record.qualified_name();
                    match &record.template_args {
                        Some(args) => format!("{name}<{}>", self.spell_args(args)),
                        None => name,
                    }
                }
                None => format!("<unknown declaration {decl}>"),
            },
            TypeRef::Builtin { builtin } => builtin.spelling().to_string(),
            TypeRef::Specialization { template, args } => {
                format!("{template}<{}>", self.spell_args(args))
            }
            TypeRef::Elaborated { qualifier, named } => match qualifier {
                Some(qualifier) => {
                    format!("{}::{}", self.spelling(qualifier), self.spelling(named))
                }
                None => self.spelling(named),
            },
            TypeRef::Other { spelling } => spelling.clone(),
        }
    }

    /// Comma-separated spelling of template arguments
    fn spell_args(&self, args: &[TemplateArg]) -> String {
        args.iter()
            .map(|arg| match arg {
                TemplateArg::Type { ty } => self.spelling(ty),
                TemplateArg::Integral { value } => value.to_string(),
                TemplateArg::Other { description } => description.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One analyzed source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub path: String,

    /// Top-level record declarations visible in this unit
    #[serde(default)]
    pub roots: Vec<DeclId>,

    /// Set when the analysis service failed on this unit
    #[serde(default)]
    pub error: Option<String>,
}

/// In-memory [`AstForest`]
///
/// Records live in a flat arena indexed by [`DeclId`]; translation units list
/// the roots they contain. A record shared by several units (a header included
/// twice) appears once in the arena and once per unit in traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstDump {
    #[serde(default)]
    pub units: Vec<TranslationUnit>,

    #[serde(default)]
    pub decls: Vec<RecordDecl>,
}

impl AstDump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON dump
    pub fn from_json(content: &str) -> WrenchResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a JSON dump from a file
    pub fn from_file(path: impl AsRef<Path>) -> WrenchResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Add a record to the arena
    pub fn add_record(&mut self, record: RecordDecl) -> DeclId {
        self.decls.push(record);
        DeclId(self.decls.len() - 1)
    }

    /// Mutable access to a record, for assembling nested declarations
    pub fn record_mut(&mut self, id: DeclId) -> Option<&mut RecordDecl> {
        self.decls.get_mut(id.0)
    }

    /// Add a successfully analyzed translation unit
    pub fn add_unit(&mut self, path: impl Into<String>, roots: Vec<DeclId>) {
        self.units.push(TranslationUnit {
            path: path.into(),
            roots,
            error: None,
        });
    }

    /// Add a translation unit the analysis service failed on
    pub fn add_failed_unit(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.units.push(TranslationUnit {
            path: path.into(),
            roots: Vec::new(),
            error: Some(reason.into()),
        });
    }

    /// Depth-first pre-order walk from `root` over nested record members
    fn visit(
        &self,
        unit: &TranslationUnit,
        root: DeclId,
        predicate: &dyn Fn(&RecordDecl) -> bool,
        visited: &mut HashSet<DeclId>,
        matches: &mut Vec<DeclId>,
    ) -> WrenchResult<()> {
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }

            let record = self.record(id).ok_or_else(|| WrenchError::AnalysisFailure {
                unit: unit.path.clone(),
                reason: format!("reference to unknown declaration {id}"),
            })?;

            if predicate(record) {
                matches.push(id);
            }

            // Reversed so the first nested record is visited next
            stack.extend(record.members.iter().rev().filter_map(|member| match member {
                Member::Record { decl } => Some(*decl),
                _ => None,
            }));
        }

        Ok(())
    }
}

impl AstForest for AstDump {
    fn find_matches(&self, predicate: &dyn Fn(&RecordDecl) -> bool) -> WrenchResult<Vec<DeclId>> {
        let mut matches = Vec::new();

        for unit in &self.units {
            if let Some(reason) = &unit.error {
                return Err(WrenchError::AnalysisFailure {
                    unit: unit.path.clone(),
                    reason: reason.clone(),
                });
            }

            // Per-unit so that a record seen in two units is reported twice
            let mut visited = HashSet::new();
            for root in &unit.roots {
                self.visit(unit, *root, predicate, &mut visited, &mut matches)?;
            }
        }

        Ok(matches)
    }

    fn record(&self, id: DeclId) -> Option<&RecordDecl> {
        self.decls.get(id.0)
    }
}
