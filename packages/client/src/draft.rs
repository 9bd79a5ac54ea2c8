//! Statement submission drafts.

use chrono::Utc;
use gorod_api_models::{DEFAULT_SOURCE, Statement, StatementStatus};

use crate::ClientError;

/// What a resident fills in before submitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementDraft {
    /// District slug.
    pub district: String,
    /// Category key.
    pub category: String,
    /// Optional refinement of the category.
    pub subcategory: String,
    /// What happened. Required.
    pub description: String,
    /// Defaults to `web`.
    pub source: Option<String>,
}

impl StatementDraft {
    /// Checks that district, category and description are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::IncompleteDraft`] naming every empty field.
    pub fn validate(&self) -> Result<(), ClientError> {
        let missing: Vec<&'static str> = [
            ("district", &self.district),
            ("category", &self.category),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            log::warn!("Refusing to submit incomplete statement, missing {missing:?}");
            Err(ClientError::IncompleteDraft { missing })
        }
    }

    /// Validates and converts into the record sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::IncompleteDraft`] if validation fails.
    pub fn to_statement(&self) -> Result<Statement, ClientError> {
        self.validate()?;
        Ok(Statement {
            id: 0,
            source: self
                .source
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            district: self.district.trim().to_string(),
            category: self.category.trim().to_string(),
            subcategory: self.subcategory.trim().to_string(),
            created_at: Utc::now(),
            status: StatementStatus::New,
            description: self.description.trim().to_string(),
            admin: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GorodApi as _;
    use crate::mock::MockApi;

    fn draft() -> StatementDraft {
        StatementDraft {
            district: "nevsky".to_string(),
            category: "garbage".to_string(),
            subcategory: String::new(),
            description: "Контейнеры переполнены".to_string(),
            source: None,
        }
    }

    #[test]
    fn complete_draft_converts() {
        let statement = draft().to_statement().unwrap();
        assert_eq!(statement.source, "web");
        assert_eq!(statement.district, "nevsky");
        assert!(statement.admin);
    }

    #[test]
    fn reports_every_missing_field() {
        let empty = StatementDraft {
            description: "   ".to_string(),
            ..StatementDraft::default()
        };
        match empty.validate() {
            Err(ClientError::IncompleteDraft { missing }) => {
                assert_eq!(missing, ["district", "category", "description"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn incomplete_draft_never_reaches_the_network() {
        let api = MockApi::with_statements(Vec::new());

        let clears: [fn(&mut StatementDraft); 3] = [
            |d| d.district.clear(),
            |d| d.category.clear(),
            |d| d.description.clear(),
        ];
        for clear in clears {
            let mut incomplete = draft();
            clear(&mut incomplete);
            assert!(matches!(
                api.submit(&incomplete).await,
                Err(ClientError::IncompleteDraft { .. })
            ));
        }
        assert_eq!(api.writes(), 0);

        api.submit(&draft()).await.unwrap();
        assert_eq!(api.writes(), 1);
    }
}
