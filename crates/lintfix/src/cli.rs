//! Command implementations shared by the binary and the integration tests.
//!
//! Everything here returns values instead of writing to the process streams,
//! except the `render_*` functions, which take an explicit writer.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use lintfix_core::error::LintError;
use lintfix_core::output::{FileReport, FileStatus, FixResponse, TransformRecord};
use lintfix_cst::nodes::Node;
use lintfix_cst::{print, NodeRef};
use lintfix_rules::{LintConfig, Pipeline, RuleRegistry};

/// Extension given to fixed sources written to an output directory.
pub const OUTPUT_EXTENSION: &str = "java";

/// Inputs of the `fix` command.
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Rule configuration file.
    pub config: PathBuf,
    /// Compilation units, as JSON trees.
    pub files: Vec<PathBuf>,
    /// Write fixed sources here instead of returning them in the report.
    pub out_dir: Option<PathBuf>,
}

// ============================================================================
// fix
// ============================================================================

/// Run the configured pipeline over every input file.
///
/// Files are processed in parallel and reported in input order. A file that
/// fails never affects the others; only configuration and output-directory
/// problems fail the command as a whole.
pub fn run_fix(options: &FixOptions, registry: &RuleRegistry) -> Result<FixResponse, LintError> {
    let pipeline = load_pipeline(&options.config, registry)?;
    info!(
        rules = %pipeline.rule_names().collect::<Vec<_>>().join(","),
        files = options.files.len(),
        "starting fix"
    );

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir).map_err(|e| LintError::io(display(dir), &e))?;
    }

    let reports = options
        .files
        .par_iter()
        .map(|path| fix_file(&pipeline, path, options.out_dir.as_deref()))
        .collect();
    Ok(FixResponse::new(reports))
}

/// Read a configuration file and build its pipeline.
pub fn load_pipeline(path: &Path, registry: &RuleRegistry) -> Result<Pipeline, LintError> {
    let text = fs::read_to_string(path).map_err(|e| LintError::io(display(path), &e))?;
    let config = LintConfig::from_json(&text)?;
    Ok(registry.build_pipeline(&config)?)
}

/// Fix one compilation unit, turning any failure into a failed report.
pub fn fix_file(pipeline: &Pipeline, path: &Path, out_dir: Option<&Path>) -> FileReport {
    let _span = info_span!("file", path = %path.display()).entered();
    match try_fix_file(pipeline, path, out_dir) {
        Ok(report) => report,
        Err(err) => {
            warn!(error = %err, "file failed");
            FileReport::failed(display(path), &err)
        }
    }
}

fn try_fix_file(
    pipeline: &Pipeline,
    path: &Path,
    out_dir: Option<&Path>,
) -> Result<FileReport, LintError> {
    let tree = read_tree(path)?;
    let outcome = pipeline
        .run(&tree)
        .map_err(|err| err.into_lint_error(&display(path)))?;
    let printed = print(&outcome.tree);
    let transforms = outcome
        .transforms
        .iter()
        .map(|t| TransformRecord {
            rule: t.rule.clone(),
            node: t.node.as_u32(),
        })
        .collect();

    let mut report = FileReport::completed(display(path), transforms, &printed);
    debug!(status = ?report.status, transforms = report.transforms.len(), "file done");
    match out_dir {
        Some(dir) => {
            let target = output_path(dir, path);
            fs::write(&target, &printed).map_err(|e| LintError::io(display(&target), &e))?;
            report.output = Some(display(&target));
        }
        None => report.source = Some(printed),
    }
    Ok(report)
}

/// Decode a compilation unit from its JSON interchange form.
pub fn read_tree(path: &Path) -> Result<NodeRef, LintError> {
    let text = fs::read_to_string(path).map_err(|e| LintError::io(display(path), &e))?;
    let node: Node = serde_json::from_str(&text)
        .map_err(|e| LintError::invalid_input(display(path), e.to_string()))?;
    Ok(Arc::new(node))
}

/// `<dir>/<input stem>.java`; `A.json` and `A.tree.json` both become `A.java`.
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| OsStr::new("out"));
    dir.join(stem).with_extension(OUTPUT_EXTENSION)
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Text rendering
// ============================================================================

/// One status line per file, each followed by the fixed source when the
/// report carries it.
pub fn render_fix_text(response: &FixResponse, w: &mut impl Write) -> io::Result<()> {
    for file in &response.files {
        match file.status {
            FileStatus::Fixed => writeln!(
                w,
                "{}: fixed ({} {})",
                file.path,
                file.transforms.len(),
                if file.transforms.len() == 1 { "change" } else { "changes" }
            )?,
            FileStatus::Unchanged => writeln!(w, "{}: unchanged", file.path)?,
            FileStatus::Failed => {
                let message = file.error.as_ref().map_or("", |e| e.message.as_str());
                writeln!(w, "{}: failed: {}", file.path, message)?
            }
        }
        if let Some(output) = &file.output {
            writeln!(w, "  wrote {output}")?;
        }
        if let Some(source) = &file.source {
            w.write_all(source.as_bytes())?;
            if !source.ends_with('\n') {
                writeln!(w)?;
            }
        }
    }
    Ok(())
}

/// Registered rule names, one per line.
pub fn render_rules_text(registry: &RuleRegistry, w: &mut impl Write) -> io::Result<()> {
    for name in registry.names() {
        writeln!(w, "{name}")?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lintfix_core::output::ErrorInfo;

    #[test]
    fn output_path_replaces_extension() {
        let dir = Path::new("/out");
        assert_eq!(output_path(dir, Path::new("src/A.json")), PathBuf::from("/out/A.java"));
        assert_eq!(output_path(dir, Path::new("B.tree.json")), PathBuf::from("/out/B.java"));
    }

    #[test]
    fn text_rendering() {
        let mut fixed = FileReport::completed(
            "A.json",
            vec![TransformRecord {
                rule: "GenericWhitespace".to_string(),
                node: 3,
            }],
            "class A<T> {}",
        );
        fixed.source = Some("class A<T> {}".to_string());
        let mut failed = FileReport::failed("B.json", &LintError::invalid_input("B.json", "eof"));
        failed.error = Some(ErrorInfo {
            code: 3,
            message: "bad tree".to_string(),
        });
        let response = FixResponse::new(vec![fixed, failed]);

        let mut out = Vec::new();
        render_fix_text(&response, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "A.json: fixed (1 change)\nclass A<T> {}\nB.json: failed: bad tree\n"
        );
    }

    #[test]
    fn rules_rendering() {
        let mut out = Vec::new();
        render_rules_text(&RuleRegistry::with_builtin_rules(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "EmptyForInitializerPad\nFinalLocalVariable\nGenericWhitespace\nHiddenField\n"
        );
    }
}
