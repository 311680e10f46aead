//! wrench-core - Schema declarations from reflected host classes
//!
//! Host classes opt into generation by befriending a sentinel template whose
//! arguments carry class annotations:
//!
//! ```text
//! class HeapNumber : public HeapObject {
//!   friend tq::Torque<tq::generate_cpp_class>;
//!   static constexpr Field<double>::Offset kValueOffset = ...;
//! };
//! ```
//!
//! becomes
//!
//! ```text
//! @generateCppClass
//! class HeapNumber extends HeapObject {
//!   value: float64;
//! }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! AstForest
//!     ↓
//!  [query]        → Vec<ClassRecord> stubs
//!     ↓
//!  [annotations]  ┐
//!  [fields]       ┘ → populated ClassRecords
//!     ↓
//!  [emit]         → <output_dir>/<snake_case(name)>.<ext>
//! ```
//!
//! [`Generator`] drives the stages; each module can also be used on its own.

pub mod annotations;
pub mod ast;
pub mod config;
pub mod emit;
pub mod error;
pub mod fields;
pub mod generator;
pub mod marker;
pub mod model;
pub mod naming;
pub mod query;

pub use ast::{AstDump, AstForest, DeclId};
pub use config::GeneratorConfig;
pub use error::{Diagnostic, DiagnosticKind, Diagnostics, WrenchError, WrenchResult};
pub use generator::{Generator, RunReport};
pub use marker::{FriendMarker, MarkerRule};
pub use model::{Annotation, ClassRecord, Field};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AstDump, AstForest, ClassRecord, Diagnostic, Diagnostics, Generator, GeneratorConfig,
        MarkerRule, RunReport, WrenchError, WrenchResult,
    };
}
