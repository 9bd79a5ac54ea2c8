#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types of the `/api` endpoints.
//!
//! Statements travel with their district as a slug and their category as a
//! snake-case key, exactly as the submission form sends them. Analytics are
//! plain `{key: count}` mappings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gorod_district_models::District;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use gorod_district_models::DistrictCounts;

/// `{ISO date: count}` returned by `GET /analitic/period`.
pub type PeriodCounts = BTreeMap<String, u64>;

/// `{category label: count}` returned by `GET /analitic/categories/{id}`.
pub type CategoryCounts = BTreeMap<String, u64>;

/// Complaint category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// Парковки
    Parking,
    /// Транспорт
    Transport,
    /// Освещение
    Lighting,
    /// ЖКХ
    HousingServices,
    /// Благоустройство
    Improvement,
    /// Мусор
    Garbage,
    /// Шум
    Noise,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 7] = [
        Self::Parking,
        Self::Transport,
        Self::Lighting,
        Self::HousingServices,
        Self::Improvement,
        Self::Garbage,
        Self::Noise,
    ];

    /// Russian label, used as the key of category analytics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parking => "Парковки",
            Self::Transport => "Транспорт",
            Self::Lighting => "Освещение",
            Self::HousingServices => "ЖКХ",
            Self::Improvement => "Благоустройство",
            Self::Garbage => "Мусор",
            Self::Noise => "Шум",
        }
    }

    /// Inverse of [`Self::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Review status of a statement.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatementStatus {
    /// Submitted, not yet reviewed.
    #[default]
    New,
    /// Accepted by an administrator.
    Accepted,
}

/// Default `source` of statements submitted without one.
pub const DEFAULT_SOURCE: &str = "web";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

const fn default_admin() -> bool {
    true
}

/// A citizen complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Assigned by the server; `0` on submission.
    #[serde(default)]
    pub id: u64,
    /// Where the statement came from; `web` unless given.
    #[serde(default = "default_source")]
    pub source: String,
    /// District slug, e.g. `admiralteysky`.
    pub district: String,
    /// Category key, e.g. `housing_services`.
    pub category: String,
    /// Free-text refinement of the category. May be empty.
    #[serde(default)]
    pub subcategory: String,
    /// Submission time; the server keeps the original on update.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Review outcome.
    #[serde(default)]
    pub status: StatementStatus,
    /// What the citizen reported.
    pub description: String,
    /// `true` while the statement awaits administrator review.
    #[serde(default = "default_admin")]
    pub admin: bool,
}

impl Statement {
    /// The district named by the slug, if it is one of the eighteen.
    #[must_use]
    pub fn district(&self) -> Option<District> {
        District::from_slug(&self.district)
    }

    /// The category named by the key, if known.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Marks the statement as reviewed and accepted.
    #[must_use]
    pub fn approved(mut self) -> Self {
        self.admin = false;
        self.status = StatementStatus::Accepted;
        self
    }
}

/// `status` field of the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStatus {
    /// `"OK"`
    #[serde(rename = "OK")]
    Ok,
    /// `"Error"`
    #[serde(rename = "Error")]
    Error,
}

/// `{status, error}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Outcome.
    pub status: ApiStatus,
    /// Message, only on errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// `{"status": "OK"}`
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: ApiStatus::Ok,
            error: None,
        }
    }

    /// An error envelope carrying `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Error,
            error: Some(message.into()),
        }
    }

    /// Whether the status is `OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ApiStatus::Ok
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Administrator name.
    pub username: String,
    /// Administrator password.
    pub password: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always `true` when the server answers.
    pub healthy: bool,
    /// Server crate version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_and_labels() {
        assert_eq!(Category::HousingServices.to_string(), "housing_services");
        assert_eq!("noise".parse::<Category>().unwrap(), Category::Noise);
        assert_eq!(Category::from_label("ЖКХ"), Some(Category::HousingServices));
        assert_eq!(Category::from_label("Пожар"), None);
    }

    #[test]
    fn submitted_statement_gets_defaults() {
        let s: Statement = serde_json::from_str(
            r#"{"district": "nevsky", "category": "garbage", "description": "Мусор во дворе"}"#,
        )
        .unwrap();
        assert_eq!(s.id, 0);
        assert_eq!(s.source, DEFAULT_SOURCE);
        assert_eq!(s.status, StatementStatus::New);
        assert!(s.admin);
        assert_eq!(s.district(), Some(District::Nevsky));
        assert_eq!(s.category(), Some(Category::Garbage));
    }

    #[test]
    fn statement_wire_format() {
        let s: Statement = serde_json::from_str(
            r#"{"id": 4, "source": "tg", "district": "kirovsky", "category": "noise",
                "subcategory": "", "created_at": "2024-03-01T10:00:00Z",
                "status": "new", "description": "Шум ночью", "admin": true}"#,
        )
        .unwrap();
        let json = serde_json::to_value(s.approved()).unwrap();
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["admin"], false);
        assert_eq!(json["created_at"], "2024-03-01T10:00:00Z");
    }

    #[test]
    fn envelope() {
        assert_eq!(
            serde_json::to_string(&ApiResponse::ok()).unwrap(),
            r#"{"status":"OK"}"#
        );
        let err: ApiResponse =
            serde_json::from_str(r#"{"status":"Error","error":"bad"}"#).unwrap();
        assert!(!err.is_ok());
        assert_eq!(err.error.as_deref(), Some("bad"));
    }
}
