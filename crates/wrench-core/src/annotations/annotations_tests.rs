#![allow(non_snake_case)]

use super::*;
use crate::ast::{AstDump, BuiltinKind, DeclId, RecordDecl, SourceLocation};
use crate::error::DiagnosticKind;
use crate::marker::FriendMarker;

fn loc() -> SourceLocation {
    SourceLocation::new("src/objects/foo.h", 5, 7)
}

fn marker_record(dump: &mut AstDump, name: &str) -> DeclId {
    dump.add_record(RecordDecl::new(name, loc()).in_namespace("tq"))
}

fn class_with_marker(dump: &mut AstDump, args: Vec<TemplateArg>) -> ClassRecord {
    let id = dump.add_record(
        RecordDecl::new("Foo", loc()).with_friend(TypeRef::specialization("tq::Torque", args)),
    );
    ClassRecord::stub(id, "Foo", "src/objects/foo.h:5:7")
}

fn extract(dump: &AstDump, class: &ClassRecord, diagnostics: &mut Diagnostics) -> Vec<Annotation> {
    let rule = FriendMarker::new("tq::Torque");
    AnnotationExtractor::new(dump, &rule, "tq").extract(class, diagnostics)
}

#[test]
fn extract___argument_less_annotation___uses_record_name() {
    let mut dump = AstDump::new();
    let export = marker_record(&mut dump, "Export");
    let class = class_with_marker(&mut dump, vec![TemplateArg::ty(TypeRef::record(export))]);
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert_eq!(annotations, vec![Annotation::new("Export")]);
    assert!(diagnostics.is_empty());
}

#[test]
fn extract___qualified_annotation_record___is_accepted() {
    let mut dump = AstDump::new();
    let scope = dump.add_record(RecordDecl::new("Scope", loc()));
    let export = marker_record(&mut dump, "export");
    let class = class_with_marker(
        &mut dump,
        vec![TemplateArg::ty(TypeRef::qualified(
            TypeRef::record(scope),
            TypeRef::record(export),
        ))],
    );
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert_eq!(annotations, vec![Annotation::new("export")]);
    assert!(diagnostics.is_empty());
}

#[test]
fn extract___integral_arguments___are_stringified_in_order() {
    let mut dump = AstDump::new();
    let size = dump.add_record(
        RecordDecl::new("instance_size", loc())
            .in_namespace("tq")
            .with_template_args(vec![TemplateArg::integral(3), TemplateArg::integral(7)]),
    );
    let class = class_with_marker(&mut dump, vec![TemplateArg::ty(TypeRef::record(size))]);
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert_eq!(
        annotations,
        vec![Annotation::new("instance_size").with_arguments([3, 7])]
    );
}

#[test]
fn extract___preserves_source_order() {
    let mut dump = AstDump::new();
    let a = marker_record(&mut dump, "abstract");
    let b = marker_record(&mut dump, "export");
    let class = class_with_marker(
        &mut dump,
        vec![
            TemplateArg::ty(TypeRef::record(b)),
            TemplateArg::ty(TypeRef::record(a)),
        ],
    );
    let mut diagnostics = Diagnostics::new();

    let names: Vec<_> = extract(&dump, &class, &mut diagnostics)
        .into_iter()
        .map(|a| a.name)
        .collect();

    assert_eq!(names, vec!["export", "abstract"]);
}

#[test]
fn extract___non_record_argument___is_skipped_with_diagnostic() {
    let mut dump = AstDump::new();
    let export = marker_record(&mut dump, "export");
    let class = class_with_marker(
        &mut dump,
        vec![
            TemplateArg::ty(TypeRef::builtin(BuiltinKind::Int)),
            TemplateArg::ty(TypeRef::record(export)),
        ],
    );
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert_eq!(annotations, vec![Annotation::new("export")]);
    assert_eq!(diagnostics.count(DiagnosticKind::AnnotationShape), 1);
    assert!(diagnostics.entries()[0].to_string().contains("'int' is not a record"));
}

#[test]
fn extract___record_outside_reserved_namespace___is_skipped() {
    let mut dump = AstDump::new();
    let foreign = dump.add_record(RecordDecl::new("export", loc()).in_namespace("v8"));
    let global = dump.add_record(RecordDecl::new("abstract", loc()));
    let class = class_with_marker(
        &mut dump,
        vec![
            TemplateArg::ty(TypeRef::record(foreign)),
            TemplateArg::ty(TypeRef::record(global)),
        ],
    );
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert!(annotations.is_empty());
    assert_eq!(diagnostics.count(DiagnosticKind::AnnotationShape), 2);
}

#[test]
fn extract___nested_reserved_namespace___is_accepted() {
    let mut dump = AstDump::new();
    let export = dump.add_record(RecordDecl::new("export", loc()).in_namespace("v8::tq"));
    let class = class_with_marker(&mut dump, vec![TemplateArg::ty(TypeRef::record(export))]);
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert_eq!(annotations.len(), 1);
}

#[test]
fn extract___unsupported_annotation_argument___keeps_partial_annotation() {
    let mut dump = AstDump::new();
    let size = dump.add_record(
        RecordDecl::new("size", loc())
            .in_namespace("tq")
            .with_template_args(vec![
                TemplateArg::integral(3),
                TemplateArg::other("expression"),
                TemplateArg::integral(7),
            ]),
    );
    let class = class_with_marker(&mut dump, vec![TemplateArg::ty(TypeRef::record(size))]);
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert_eq!(annotations, vec![Annotation::new("size").with_arguments([3, 7])]);
    assert_eq!(diagnostics.count(DiagnosticKind::AnnotationShape), 1);
    assert!(diagnostics.entries()[0].to_string().contains("expression"));
}

#[test]
fn extract___non_type_marker_argument___is_skipped() {
    let mut dump = AstDump::new();
    let class = class_with_marker(&mut dump, vec![TemplateArg::integral(1)]);
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert!(annotations.is_empty());
    assert_eq!(diagnostics.count(DiagnosticKind::AnnotationShape), 1);
}

#[test]
fn extract___unparametrized_marker___reports_and_yields_nothing() {
    let mut dump = AstDump::new();
    let torque = dump.add_record(RecordDecl::new("Torque", loc()).in_namespace("tq"));
    let id = dump.add_record(RecordDecl::new("Foo", loc()).with_friend(TypeRef::record(torque)));
    let class = ClassRecord::stub(id, "Foo", "foo.h:1:1");
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert!(annotations.is_empty());
    assert_eq!(diagnostics.count(DiagnosticKind::AnnotationShape), 1);
    assert!(
        diagnostics.entries()[0]
            .to_string()
            .contains("is not a parametrized marker")
    );
}

#[test]
fn extract___empty_marker___yields_nothing() {
    let mut dump = AstDump::new();
    let class = class_with_marker(&mut dump, vec![]);
    let mut diagnostics = Diagnostics::new();

    let annotations = extract(&dump, &class, &mut diagnostics);

    assert!(annotations.is_empty());
    assert!(diagnostics.is_empty());
}
