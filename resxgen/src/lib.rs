#![forbid(unsafe_code)]
//! Build-time generator of strongly-typed resource accessor classes.
//!
//! Reads a `.resx` resource file and writes the `SR` class exposing every
//! resource key as a read-only property, in C# or Visual Basic, along with the
//! empty `FxResources.<assembly>.SR` marker type a runtime resource manager
//! uses to find the compiled resources.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resxgen::GenerateResourcesCode;
//!
//! // Same call a build step makes; the output extension picks the dialect.
//! let task = GenerateResourcesCode::new("Strings.resx", "obj/SR.cs", "System.Private.Uri");
//! let report = task.run()?;
//! println!("{} members written", report.members);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Lower-level pieces can be used on their own:
//!
//! ```rust
//! use resxgen::{CodeEmitter, Dialect, ResxDocument, traits::Parser};
//!
//! let document = ResxDocument::from_str(
//!     r#"<root><data name="Hello"><value>World</value></data></root>"#,
//! )?;
//! let emitter = CodeEmitter::new(Vec::new(), Dialect::CSharp, "Foo", true);
//! let (code, _) = emitter.emit(document)?;
//! assert!(String::from_utf8(code)?.contains(r#"SR.GetResourceString("Hello", @"World")"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dialect;
pub mod emitter;
pub mod error;
pub mod resx;
pub mod task;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    dialect::{Dialect, MemberForm, Syntax},
    emitter::{CodeEmitter, EmitSummary, escape_literal},
    error::{Error, GenerationFailure},
    resx::{ResourceEntry, ResxDocument},
    task::{GenerateResourcesCode, GenerationReport},
};
