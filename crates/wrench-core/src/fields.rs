//! Field and base-class reflection over a class's declarations.
//!
//! Fields are not read from instance members. They are inferred from the
//! static offset constants a class declares for its layout:
//!
//! ```text
//! static constexpr Field<double>::Offset kValueOffset = ...;
//! ```
//!
//! declares a field `value` of schema type `float64`. A member describes a
//! field when it is a static data member named `k<Name>Offset` whose type,
//! with one level of qualification stripped, is a `Field<T, ...>`
//! specialization.

use crate::ast::{AstForest, Member, TemplateArg, TypeInfo, TypeRef, VarDecl};
use crate::error::{Diagnostic, Diagnostics, WrenchError, WrenchResult};
use crate::model::{ClassRecord, Field};
use crate::naming::to_snake_case;
use tracing::info;

/// Schema type for every floating-point builtin
pub const FLOAT64: &str = "float64";

/// Extract `<Name>` from a `k<Name>Offset` identifier
pub fn offset_field_name(ident: &str) -> Option<&str> {
    ident
        .strip_prefix('k')
        .and_then(|rest| rest.strip_suffix("Offset"))
        .filter(|name| !name.is_empty())
}

/// Infers fields and the base class of matched classes
pub struct FieldReflector<'a> {
    forest: &'a dyn AstForest,
    field_template: &'a str,
}

impl<'a> FieldReflector<'a> {
    /// `field_template` is the unqualified name of the field wrapper template
    pub fn new(forest: &'a dyn AstForest, field_template: &'a str) -> Self {
        Self {
            forest,
            field_template,
        }
    }

    /// Fields of `class` in declaration order.
    ///
    /// Members that do not describe a field are skipped silently. A field whose
    /// type has no schema equivalent is reported and dropped.
    pub fn reflect_fields(&self, class: &ClassRecord, diagnostics: &mut Diagnostics) -> Vec<Field> {
        info!(class = %class.name, "Detected field offsets:");

        self.forest
            .members(class.decl)
            .iter()
            .filter_map(|member| match member {
                Member::Var(var) => self.reflect_field(class, var, diagnostics),
                _ => None,
            })
            .collect()
    }

    /// The single direct base of `class`, if any.
    ///
    /// More than one direct base cannot be represented and fails the run.
    pub fn reflect_base(
        &self,
        class: &ClassRecord,
        diagnostics: &mut Diagnostics,
    ) -> WrenchResult<Option<String>> {
        let bases = self
            .forest
            .record(class.decl)
            .map(|record| record.bases.as_slice())
            .unwrap_or(&[]);

        let base = match bases {
            [] => None,
            [base] => match self.forest.resolve(base) {
                TypeInfo::Record { decl, .. } => Some(decl.name.clone()),
                _ => {
                    diagnostics.report(Diagnostic::NonRecordBase {
                        class: class.name.clone(),
                        base: self.forest.spelling(base),
                    });
                    None
                }
            },
            _ => {
                return Err(WrenchError::MultipleInheritance {
                    class: class.name.clone(),
                    count: bases.len(),
                });
            }
        };

        info!(class = %class.name, "Base class: {}", base.as_deref().unwrap_or(""));
        Ok(base)
    }

    fn reflect_field(
        &self,
        class: &ClassRecord,
        var: &VarDecl,
        diagnostics: &mut Diagnostics,
    ) -> Option<Field> {
        if !var.is_static {
            return None;
        }
        let name = offset_field_name(&var.name)?;
        let field_type = self.field_type_argument(&var.ty)?;

        let Some(ty) = self.schema_type(field_type) else {
            diagnostics.report(Diagnostic::FieldType {
                class: class.name.clone(),
                member: var.name.clone(),
                ty: self.forest.spelling(field_type),
            });
            return None;
        };

        let field = Field::new(to_snake_case(name), ty);
        info!(class = %class.name, " - '{}': {}", field.name, field.ty);
        Some(field)
    }

    /// First type argument of a `Field<T, ...>` declared type
    fn field_type_argument<'t>(&'t self, declared: &'t TypeRef) -> Option<&'t TypeRef> {
        let TypeInfo::Specialization { template, args } =
            self.forest.type_info(declared.strip_qualification())
        else {
            return None;
        };

        let unqualified = template.rsplit("::").next().unwrap_or(template);
        if unqualified != self.field_template {
            return None;
        }

        match args.first() {
            Some(TemplateArg::Type { ty }) => Some(ty),
            _ => None,
        }
    }

    fn schema_type(&self, ty: &TypeRef) -> Option<String> {
        match self.forest.resolve(ty) {
            TypeInfo::Record { decl, .. } => {
                let name = decl.name.strip_prefix('_').unwrap_or(&decl.name);
                Some(name.to_string())
            }
            TypeInfo::Builtin(kind) if kind.is_floating_point() => Some(FLOAT64.to_string()),
            _ => None,
        }
    }
}
