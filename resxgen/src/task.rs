//! The build-task entry point: configuration, one run, one failure report.

use serde::Serialize;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info};

use crate::{
    dialect::Dialect,
    emitter::CodeEmitter,
    error::{Error, GenerationFailure},
    resx::ResxDocument,
    traits::Parser,
};

/// Generates the `SR` accessor source file for one `.resx` file.
///
/// # Example
///
/// ```rust,no_run
/// use resxgen::GenerateResourcesCode;
///
/// let task = GenerateResourcesCode::new("Resources/Strings.resx", "obj/SR.cs", "System.Private.Uri")
///     .with_debug_only(false);
/// if !task.execute() {
///     std::process::exit(1);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResourcesCode {
    /// The `.resx` file to read.
    pub resx_file_path: PathBuf,
    /// The source file to create; its extension selects the dialect.
    pub output_source_file_path: PathBuf,
    /// Assembly name the marker type namespace is built from.
    pub assembly_name: String,
    /// Embed literal values in every member and emit no conditional block.
    pub debug_only: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub dialect: Dialect,
    pub entries_read: usize,
    pub members: usize,
    pub duplicates: usize,
}

impl GenerateResourcesCode {
    pub fn new(
        resx_file_path: impl Into<PathBuf>,
        output_source_file_path: impl Into<PathBuf>,
        assembly_name: impl Into<String>,
    ) -> Self {
        GenerateResourcesCode {
            resx_file_path: resx_file_path.into(),
            output_source_file_path: output_source_file_path.into(),
            assembly_name: assembly_name.into(),
            debug_only: false,
        }
    }

    /// Enables/disables debug-only output.
    pub fn with_debug_only(mut self, debug_only: bool) -> Self {
        self.debug_only = debug_only;
        self
    }

    /// The dialect the output file's extension selects.
    pub fn dialect(&self) -> Dialect {
        Dialect::from_output_path(&self.output_source_file_path)
    }

    /// Runs the task, logging a failure once; returns whether it succeeded.
    pub fn execute(&self) -> bool {
        match self.run() {
            Ok(report) => {
                info!(
                    output = %report.output_path.display(),
                    dialect = %report.dialect,
                    members = report.members,
                    duplicates = report.duplicates,
                    "generated resource accessor"
                );
                true
            }
            Err(failure) => {
                error!("{}", failure);
                false
            }
        }
    }

    /// Runs the task.
    ///
    /// The output file is created (or truncated) before the input is read. On
    /// failure whatever was written so far stays on disk, and a previous
    /// output at the same path has already been overwritten.
    pub fn run(&self) -> Result<GenerationReport, GenerationFailure> {
        Ok(self.generate()?)
    }

    fn generate(&self) -> Result<GenerationReport, Error> {
        let dialect = self.dialect();
        debug!(
            input = %self.resx_file_path.display(),
            output = %self.output_source_file_path.display(),
            %dialect,
            debug_only = self.debug_only,
            "generating resource accessor"
        );

        let file = create_output(&self.output_source_file_path)?;
        let mut emitter = CodeEmitter::new(
            BufWriter::new(file),
            dialect,
            &self.assembly_name,
            self.debug_only,
        );

        emitter.write_header()?;
        let document = ResxDocument::read_from(&self.resx_file_path)?;
        let entries_read = document.len();
        emitter.write_members(document)?;
        emitter.write_footer()?;

        let summary = emitter.summary();
        emitter.finish()?;

        Ok(GenerationReport {
            output_path: self.output_source_file_path.clone(),
            dialect,
            entries_read,
            members: summary.members,
            duplicates: summary.duplicates,
        })
    }
}

fn create_output(path: &Path) -> Result<File, Error> {
    File::create(path).map_err(|source| Error::OutputNotWritable {
        path: path.to_path_buf(),
        source,
    })
}
