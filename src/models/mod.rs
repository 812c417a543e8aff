use serde::{Deserialize, Serialize};
use sqlx::types::Json;

pub const DEFAULT_BUDGET: f64 = 9_000_000.0;

/// User row from the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// bcrypt hash, never serialized
    pub password: String,
    pub is_admin: bool,
    pub budget: f64,
    pub team: Json<Vec<String>>,
}

/// User fields sent to clients. Credential material stays server-side.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
    pub budget: f64,
    pub team: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
            budget: user.budget,
            team: user.team.0,
        }
    }
}

/// A user about to be inserted, with the schema defaults filled in.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub budget: f64,
    pub team: Vec<String>,
}

impl NewUser {
    pub fn with_defaults(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            is_admin: false,
            budget: DEFAULT_BUDGET,
            team: Vec::new(),
        }
    }
}

/// Body of both `/api/signup` and `/api/login`
#[derive(Debug, Deserialize, Default)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Checked username/password pair
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    pub fn validate(self) -> Result<Credentials, String> {
        let username = required("username", self.username)?;
        let password = required("password", self.password)?;
        Ok(Credentials { username, password })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default)]
    pub runs: f64,
    #[serde(default)]
    pub wickets: f64,
    #[serde(default)]
    pub strike_rate: f64,
    #[serde(default)]
    pub economy: f64,
}

/// Player as stored and as returned by the API
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub university: String,
    pub category: String,
    pub stats: PlayerStats,
    pub value: f64,
    pub points: f64,
}

/// Row from the `players` table; stats are flattened into columns
#[derive(Debug, sqlx::FromRow)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub university: String,
    pub category: String,
    pub runs: f64,
    pub wickets: f64,
    pub strike_rate: f64,
    pub economy: f64,
    pub value: f64,
    pub points: f64,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            university: row.university,
            category: row.category,
            stats: PlayerStats {
                runs: row.runs,
                wickets: row.wickets,
                strike_rate: row.strike_rate,
                economy: row.economy,
            },
            value: row.value,
            points: row.points,
        }
    }
}

/// Body of `POST /api/players`. Everything is optional at the wire level so
/// that a missing field gets a 400 naming it.
#[derive(Debug, Deserialize, Default)]
pub struct CreatePlayerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stats: Option<PlayerStats>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub points: Option<f64>,
}

/// A player about to be inserted, with numeric defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub university: String,
    pub category: String,
    pub stats: PlayerStats,
    pub value: f64,
    pub points: f64,
}

impl CreatePlayerRequest {
    pub fn validate(self) -> Result<NewPlayer, String> {
        Ok(NewPlayer {
            name: required("name", self.name)?,
            university: required("university", self.university)?,
            category: required("category", self.category)?,
            stats: self.stats.unwrap_or_default(),
            value: self.value.unwrap_or(0.0),
            points: self.points.unwrap_or(0.0),
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(format!("{field} must not be empty")),
        None => Err(format!("{field} is required")),
    }
}

/// `{message, user}` body for signup and login
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

/// `{message, player}` body for player creation
#[derive(Debug, Serialize)]
pub struct PlayerEnvelope {
    pub message: String,
    pub player: Player,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_user_gets_schema_defaults() {
        let user = NewUser::with_defaults("alice".into(), "hash".into());
        assert!(!user.is_admin);
        assert_eq!(user.budget, 9_000_000.0);
        assert!(user.team.is_empty());
    }

    #[test]
    fn user_response_drops_password_and_uses_camel_case() {
        let user = User {
            id: 7,
            username: "alice".into(),
            password: "$2b$10$secret".into(),
            is_admin: false,
            budget: DEFAULT_BUDGET,
            team: Json(vec!["p1".into()]),
        };

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(value["isAdmin"], json!(false));
        assert_eq!(value["team"], json!(["p1"]));
        assert!(value.get("password").is_none());
        assert!(!value.to_string().contains("secret"));
    }

    #[test]
    fn credentials_require_both_fields() {
        let missing: CredentialsRequest = serde_json::from_value(json!({"username": "bob"})).unwrap();
        assert_eq!(missing.validate().unwrap_err(), "password is required");

        let blank: CredentialsRequest =
            serde_json::from_value(json!({"username": "  ", "password": "pw"})).unwrap();
        assert_eq!(blank.validate().unwrap_err(), "username must not be empty");
    }

    #[test]
    fn omitted_player_numbers_default_to_zero() {
        let request: CreatePlayerRequest = serde_json::from_value(json!({
            "name": "A",
            "university": "U",
            "category": "C",
            "stats": { "runs": 10 }
        }))
        .unwrap();

        let player = request.validate().unwrap();
        assert_eq!(player.stats.runs, 10.0);
        assert_eq!(player.stats.wickets, 0.0);
        assert_eq!(player.stats.strike_rate, 0.0);
        assert_eq!(player.stats.economy, 0.0);
        assert_eq!(player.value, 0.0);
        assert_eq!(player.points, 0.0);
    }

    #[test]
    fn player_without_stats_gets_zeroed_stats() {
        let request: CreatePlayerRequest =
            serde_json::from_value(json!({"name": "A", "university": "U", "category": "C"})).unwrap();
        assert_eq!(request.validate().unwrap().stats, PlayerStats::default());
    }

    #[test]
    fn player_requires_category() {
        let request: CreatePlayerRequest =
            serde_json::from_value(json!({"name": "A", "university": "U"})).unwrap();
        assert_eq!(request.validate().unwrap_err(), "category is required");
    }
}
