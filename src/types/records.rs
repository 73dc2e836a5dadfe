//! Records returned by the DishHub API and forms sent to it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category keys arrive as numbers from the food-items endpoint but some
/// deployments send strings; both collapse to a string key.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

fn category_key<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawKey> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawKey::Int(n)) => n.to_string(),
        Some(RawKey::Float(f)) => f.to_string(),
        Some(RawKey::Text(s)) => s,
        Some(RawKey::Other(v)) => v.to_string(),
        None => String::new(),
    })
}

/// Ids and quantities. Null or non-numeric values read as 0, and fractional
/// values are truncated toward zero.
fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawKey> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawKey::Int(n)) => n,
        Some(RawKey::Float(f)) => f.trunc() as i64,
        Some(RawKey::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        Some(RawKey::Other(_)) | None => 0,
    })
}

/// `created_at` is normally a string, but epoch milliseconds also occur
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    Other(serde_json::Value),
}

/// Epoch milliseconds become RFC 3339. Anything else keeps its JSON text so
/// the month bucketer rejects it and counts it as dropped.
fn timestamp_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(s)) => s,
        Some(RawTimestamp::Millis(ms)) => DateTime::<Utc>::from_timestamp_millis(ms)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| ms.to_string()),
        Some(RawTimestamp::Other(v)) => v.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A food item tagged with its category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "category_key")]
    pub category: String,
}

/// A registered platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    /// Raw timestamp string; parsed lazily by the month bucketer
    #[serde(default, deserialize_with = "timestamp_text")]
    pub created_at: String,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Headline totals from the overview endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OverviewMetrics {
    #[serde(rename = "TotalFoodItems", default)]
    pub total_food_items: u64,
    #[serde(rename = "TotalUsers", default)]
    pub total_users: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of a successful login response (token field name varies by backend)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default, alias = "access", alias = "key")]
    pub token: Option<String>,
}

/// Persisted login state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_record_numeric_category() {
        let json = r#"{"id": 1, "name": "Pilau", "quantity": 4, "category": 2}"#;
        let record: CategoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "2");
        assert_eq!(record.quantity, 4);
    }

    #[test]
    fn test_category_record_string_category() {
        let json = r#"{"id": 1, "name": "Pilau", "quantity": 4, "category": "mains"}"#;
        let record: CategoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "mains");
    }

    #[test]
    fn test_category_record_missing_fields_default() {
        let json = r#"{"category": null}"#;
        let record: CategoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "");
        assert_eq!(record.quantity, 0);
        assert_eq!(record.name, "");
    }

    #[test]
    fn test_category_record_null_quantity_and_id() {
        let json = r#"{"id": null, "name": "Pilau", "quantity": null, "category": 1}"#;
        let record: CategoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.quantity, 0);
        assert_eq!(record.category, "1");
    }

    #[test]
    fn test_category_record_float_quantity() {
        let json = r#"[{"quantity": 2.0, "category": 1},
                       {"quantity": 2.7, "category": 1},
                       {"quantity": "3", "category": 2}]"#;
        let records: Vec<CategoryRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[1].quantity, 2);
        assert_eq!(records[2].quantity, 3);
    }

    #[test]
    fn test_category_record_odd_quantity_reads_zero() {
        let json = r#"{"quantity": true, "category": {"id": 4}}"#;
        let record: CategoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.quantity, 0);
        assert_eq!(record.category, r#"{"id":4}"#);
    }

    #[test]
    fn test_user_record_null_id() {
        let json = r#"{"id": null, "username": "ada", "created_at": "2024-03-01T10:00:00Z"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.username, "ada");
    }

    #[test]
    fn test_user_record_epoch_millis_created_at() {
        let json = r#"{"id": 1, "created_at": 1709251200000}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.created_at, "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_user_list_survives_odd_created_at() {
        let json = r#"[
            {"id": 1, "created_at": "2024-03-02T10:00:00Z"},
            {"id": 2, "created_at": 1709251200000},
            {"id": 3, "created_at": {"date": "2024-03-01"}},
            {"id": 4, "created_at": null}
        ]"#;
        let users: Vec<UserRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(users.len(), 4);
        assert_eq!(users[0].created_at, "2024-03-02T10:00:00Z");
        assert_eq!(users[2].created_at, r#"{"date":"2024-03-01"}"#);
        assert_eq!(users[3].created_at, "");
    }

    #[test]
    fn test_user_record_nulls_become_empty() {
        let json = r#"{"id": 7, "email": null, "first_name": "Ada", "username": "ada",
                       "created_at": "2024-03-01T10:00:00Z"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.email, "");
        assert_eq!(user.last_name, "");
        assert_eq!(user.first_name, "Ada");
    }

    #[test]
    fn test_user_full_name() {
        let user = UserRecord {
            first_name: "Ada ".into(),
            last_name: "Lovelace".into(),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_overview_metrics_keys() {
        let json = r#"{"TotalFoodItems": 42, "TotalUsers": 9}"#;
        let metrics: OverviewMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.total_food_items, 42);
        assert_eq!(metrics.total_users, 9);

        let empty: OverviewMetrics = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, OverviewMetrics::default());
    }

    #[test]
    fn test_login_response_token_aliases() {
        let r: LoginResponse = serde_json::from_str(r#"{"access": "abc"}"#).unwrap();
        assert_eq!(r.token.as_deref(), Some("abc"));
        let r: LoginResponse = serde_json::from_str(r#"{"token": "xyz"}"#).unwrap();
        assert_eq!(r.token.as_deref(), Some("xyz"));
        let r: LoginResponse = serde_json::from_str(r#"{"detail": "ok"}"#).unwrap();
        assert!(r.token.is_none());
    }
}
