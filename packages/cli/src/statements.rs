//! `gorod submit` and `gorod import`.

use std::path::Path;

use gorod_cli_utils::{IndicatifProgress, MultiProgress};
use gorod_client::{ClientError, GorodApi, StatementDraft, import_statements, read_statements};

/// Submits one statement and prints the id it was stored under.
///
/// # Errors
///
/// * If the draft is incomplete; nothing is sent
/// * If the backend rejects the statement
pub async fn submit<A: GorodApi + ?Sized>(
    api: &A,
    draft: &StatementDraft,
) -> Result<(), ClientError> {
    let created = api.submit(draft).await?;
    for statement in &created {
        println!(
            "Statement #{} submitted for {} ({})",
            statement.id, statement.district, statement.category
        );
    }
    Ok(())
}

/// Submits every statement in `file`.
///
/// # Errors
///
/// * If the file cannot be read or parsed
/// * If any statement was rejected
pub async fn import<A: GorodApi + ?Sized>(
    api: &A,
    multi: &MultiProgress,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let statements = read_statements(file)?;
    let progress = IndicatifProgress::statements_bar(multi, "Importing statements");
    let report = import_statements(api, &statements, progress.as_ref()).await;

    println!("Imported {}, failed {}", report.imported, report.failed);
    if report.failed > 0 {
        return Err(format!("{} statements were rejected", report.failed).into());
    }
    Ok(())
}
