//! `gorod review`.

use gorod_api_models::Statement;
use gorod_client::{ClientError, GorodApi, ReviewQueue};

use crate::ReviewAction;

/// One statement as a table row.
pub fn row(statement: &Statement) -> String {
    format!(
        "#{:<5} {:<10} {:<18} {:<16} {}",
        statement.id,
        statement.created_at.format("%Y-%m-%d").to_string(),
        statement.district,
        statement.category,
        statement.description
    )
}

/// Prints the pending statements.
pub fn print_queue(items: &[Statement]) {
    if items.is_empty() {
        println!("No statements awaiting review.");
        return;
    }
    for statement in items {
        println!("{}", row(statement));
    }
}

/// Runs one review action. The caller must have logged in.
///
/// # Errors
///
/// * If the queue cannot be loaded
/// * If the accept or reject request fails
pub async fn run<A: GorodApi + ?Sized>(api: &A, action: ReviewAction) -> Result<(), ClientError> {
    let mut queue = ReviewQueue::new(api);
    queue.reload().await?;

    match action {
        ReviewAction::List => {}
        ReviewAction::Accept { id } => {
            queue.accept(id).await?;
            println!("Statement #{id} accepted.");
        }
        ReviewAction::Reject { id } => {
            queue.reject(id).await?;
            println!("Statement #{id} rejected.");
        }
    }
    print_queue(queue.items());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_shows_id_date_and_district() {
        let statement: Statement = serde_json::from_value(serde_json::json!({
            "id": 42,
            "district": "nevsky",
            "category": "noise",
            "created_at": "2024-05-01T12:00:00Z",
            "description": "Шум по ночам",
        }))
        .unwrap();
        let row = row(&statement);
        assert!(row.starts_with("#42 "));
        assert!(row.contains("2024-05-01"));
        assert!(row.contains("nevsky"));
        assert!(row.ends_with("Шум по ночам"));
    }
}
