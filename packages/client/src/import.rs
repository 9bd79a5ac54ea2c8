//! Bulk statement import from a JSON file.

use std::path::Path;

use gorod_api_models::Statement;
use serde::Deserialize;

use crate::progress::ProgressCallback;
use crate::{ClientError, GorodApi};

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<Statement>),
    One(Box<Statement>),
}

/// Reads statements from `path`. Accepts a JSON array or a single object.
///
/// # Errors
///
/// Returns [`ClientError`] if the file cannot be read or parsed.
pub fn read_statements(path: &Path) -> Result<Vec<Statement>, ClientError> {
    let text = std::fs::read_to_string(path)?;
    let statements = match serde_json::from_str::<ImportFile>(&text)? {
        ImportFile::Many(statements) => statements,
        ImportFile::One(statement) => vec![*statement],
    };
    log::info!("Read {} statements from {}", statements.len(), path.display());
    Ok(statements)
}

/// Result of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Statements the backend accepted.
    pub imported: usize,
    /// Statements that were rejected or could not be sent.
    pub failed: usize,
}

/// Submits each statement in turn. A rejected statement is logged and
/// counted; the rest are still sent.
pub async fn import_statements<A: GorodApi + ?Sized>(
    api: &A,
    statements: &[Statement],
    progress: &dyn ProgressCallback,
) -> ImportReport {
    let mut report = ImportReport::default();
    progress.set_total(statements.len() as u64);
    for (idx, statement) in statements.iter().enumerate() {
        match api.create_statement(statement).await {
            Ok(_) => report.imported += 1,
            Err(e) => {
                log::warn!("Statement #{idx} ({}) not imported: {e}", statement.district);
                report.failed += 1;
            }
        }
        progress.inc(1);
    }
    log::info!(
        "Imported {} statements, {} failed",
        report.imported,
        report.failed
    );
    progress.finish(format!(
        "Imported {} statements, {} failed",
        report.imported, report.failed
    ));
    report
}
