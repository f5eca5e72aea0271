//! Emission of the `SR` accessor class from resource entries.
//!
//! A [`CodeEmitter`] owns everything a single run needs: the output writer,
//! the keys already emitted and the buffered debug-form members. The output
//! is written in a fixed order:
//!
//! 1. header (comment, `System` namespace, partial `SR` class, resources-name
//!    constant and, unless debug-only, the `DEBUGRESOURCES` guard),
//! 2. one release-form member per unique key,
//! 3. the guard's else branch holding every buffered debug-form member,
//! 4. the `ResourceType` property,
//! 5. the class and namespace ends,
//! 6. the empty marker class `FxResources.<assembly>.SR`.

use std::{
    borrow::Cow,
    collections::HashSet,
    io::Write,
};

use serde::Serialize;
use tracing::debug;

use crate::{
    dialect::{Dialect, MemberForm, Syntax},
    error::Error,
    resx::ResourceEntry,
};

/// Root namespace of the marker type.
pub const RESOURCES_NAMESPACE_ROOT: &str = "FxResources";

const GENERATED_NOTICE: &str = "Do not edit this file manually it is auto-generated during the build based on the .resx file for this project.";

const MARKER_TYPE_COMMENT: &str = "The type of this class is used to create the ResourceManager instance as the type name matches the name of the embedded resources file";

/// Counts gathered while emitting members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmitSummary {
    /// Members emitted, one per unique key.
    pub members: usize,
    /// Entries dropped because their key was already emitted.
    pub duplicates: usize,
}

/// Writes the accessor class for one run.
pub struct CodeEmitter<W: Write> {
    writer: W,
    dialect: Dialect,
    syntax: &'static Syntax,
    resources_namespace: String,
    debug_only: bool,
    keys: HashSet<String>,
    debug_code: String,
    summary: EmitSummary,
}

impl<W: Write> CodeEmitter<W> {
    /// Creates an emitter writing `dialect` code for `assembly_name` into `writer`.
    pub fn new(writer: W, dialect: Dialect, assembly_name: &str, debug_only: bool) -> Self {
        CodeEmitter {
            writer,
            dialect,
            syntax: dialect.syntax(),
            resources_namespace: resources_namespace(assembly_name),
            debug_only,
            keys: HashSet::new(),
            debug_code: String::new(),
            summary: EmitSummary::default(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Fully-qualified name of the marker type, `FxResources.<assembly>.SR`.
    pub fn resources_name(&self) -> String {
        format!("{}.SR", self.resources_namespace)
    }

    pub fn summary(&self) -> EmitSummary {
        self.summary
    }

    /// Writes every step in order and returns the writer, flushed.
    pub fn emit<I>(mut self, entries: I) -> Result<(W, EmitSummary), Error>
    where
        I: IntoIterator<Item = ResourceEntry>,
    {
        self.write_header()?;
        self.write_members(entries)?;
        self.write_footer()?;
        let summary = self.summary;
        Ok((self.finish()?, summary))
    }

    /// Writes the generated-file notice and opens the namespace and class.
    pub fn write_header(&mut self) -> Result<(), Error> {
        let syntax = self.syntax;
        self.line(&format!("{}{}", syntax.comment_prefix, GENERATED_NOTICE))?;
        self.line(&format!("{} System", syntax.namespace_keyword))?;
        self.optional_line(syntax.namespace_open)?;
        self.line(syntax.accessor_type_declaration)?;
        self.line(syntax.type_body_open)?;
        self.optional_line(syntax.suppress_unused_warning)?;
        self.line(&syntax.resources_name_constant(&self.resources_name()))?;
        self.optional_line(syntax.restore_unused_warning)?;
        self.line("")?;
        if !self.debug_only {
            self.line(syntax.if_not_directive)?;
        }
        Ok(())
    }

    /// Emits one member per entry whose key has not been seen yet.
    pub fn write_members<I>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = ResourceEntry>,
    {
        for entry in entries {
            self.write_entry(&entry.key, &entry.raw_value)?;
        }
        Ok(())
    }

    /// Emits the member for `key`, returning `false` if the key was a duplicate.
    ///
    /// The release form goes straight to the writer; the debug form is
    /// buffered until [`CodeEmitter::write_footer`].
    pub fn write_entry(&mut self, key: &str, raw_value: &str) -> Result<bool, Error> {
        if !self.keys.insert(key.to_string()) {
            debug!(key, "skipping duplicate resource key");
            self.summary.duplicates += 1;
            return Ok(false);
        }

        let syntax = self.syntax;
        let literal = syntax.string_literal(&escape_literal(raw_value));
        self.debug_code.push_str(&syntax.read_only_property(
            key,
            syntax.string_type,
            &lookup_call(key, &literal),
            MemberForm::Debug,
        ));

        if !self.debug_only {
            let release = syntax.read_only_property(
                key,
                syntax.string_type,
                &lookup_call(key, syntax.null_literal),
                MemberForm::Release,
            );
            self.writer.write_all(release.as_bytes())?;
        }

        self.summary.members += 1;
        Ok(true)
    }

    /// Writes the buffered debug-form members, the `ResourceType` property,
    /// the class and namespace ends and the marker type.
    pub fn write_footer(&mut self) -> Result<(), Error> {
        self.write_debug_code()?;
        self.write_resource_type_property()?;
        self.write_class_end()?;
        self.write_marker_type()
    }

    /// Flushes and returns the writer.
    pub fn finish(mut self) -> Result<W, Error> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_debug_code(&mut self) -> Result<(), Error> {
        if !self.debug_only {
            self.line(self.syntax.else_directive)?;
        }
        let debug_code = std::mem::take(&mut self.debug_code);
        self.line(&debug_code)?;
        if !self.debug_only {
            self.line(self.syntax.end_if_directive)?;
        }
        Ok(())
    }

    fn write_resource_type_property(&mut self) -> Result<(), Error> {
        let syntax = self.syntax;
        let property = syntax.read_only_property(
            "ResourceType",
            syntax.type_type,
            &syntax.type_of(&self.resources_name()),
            MemberForm::Release,
        );
        self.writer.write_all(property.as_bytes())?;
        Ok(())
    }

    fn write_class_end(&mut self) -> Result<(), Error> {
        self.line(self.syntax.type_body_close)?;
        self.line(self.syntax.namespace_close)
    }

    fn write_marker_type(&mut self) -> Result<(), Error> {
        let syntax = self.syntax;
        self.line(&format!(
            "{} {}",
            syntax.namespace_keyword, self.resources_namespace
        ))?;
        self.optional_line(syntax.namespace_open)?;
        self.line(&format!("    {}{}", syntax.comment_prefix, MARKER_TYPE_COMMENT))?;
        self.line(syntax.marker_type_declaration)?;
        self.line(syntax.type_body_open)?;
        self.line(syntax.type_body_close)?;
        self.line(syntax.namespace_close)
    }

    fn line(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    fn optional_line(&mut self, text: Option<&str>) -> Result<(), Error> {
        match text {
            Some(text) => self.line(text),
            None => Ok(()),
        }
    }
}

/// Namespace of the marker type for `assembly_name`, `FxResources.<assembly>`.
pub fn resources_namespace(assembly_name: &str) -> String {
    format!("{}.{}", RESOURCES_NAMESPACE_ROOT, assembly_name)
}

/// Doubles every `"` so the value can sit inside a string literal of either
/// dialect. Nothing else is touched.
pub fn escape_literal(raw: &str) -> Cow<'_, str> {
    if raw.contains('"') {
        Cow::Owned(raw.replace('"', "\"\""))
    } else {
        Cow::Borrowed(raw)
    }
}

fn lookup_call(key: &str, literal: &str) -> String {
    format!("SR.GetResourceString(\"{}\", {})", key, literal)
}
