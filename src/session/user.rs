use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

const SECONDS_PER_YEAR: i64 = 31_536_000;

/// The simulated account persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub karma: u32,
    pub created: i64,
    pub about: String,
    pub submissions: Vec<u64>,
    pub favorites: Vec<u64>,
    pub voted: Vec<u64>,
    /// Milliseconds since the epoch.
    pub login_time: i64,
}

impl UserRecord {
    /// Account produced by a successful login: random karma and a creation
    /// date somewhere in the past year.
    pub(super) fn for_login(username: &str, now: i64) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            id: random_id(&mut rng),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            karma: rng.gen_range(1..=1000),
            created: now - rng.gen_range(0..SECONDS_PER_YEAR),
            login_time: now * 1000,
            ..Self::default()
        }
    }

    /// Brand new account produced by signup.
    pub(super) fn for_signup(username: &str, email: &str, now: i64) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            id: random_id(&mut rng),
            username: username.to_string(),
            email: email.to_string(),
            karma: 1,
            created: now,
            login_time: now * 1000,
            ..Self::default()
        }
    }
}

fn random_id(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(9)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_record_has_plausible_values() {
        let now = 1_700_000_000;
        let user = UserRecord::for_login("pg", now);
        assert_eq!(user.id.len(), 9);
        assert_eq!(user.email, "pg@example.com");
        assert!((1..=1000).contains(&user.karma));
        assert!(user.created <= now && user.created > now - SECONDS_PER_YEAR);
        assert!(user.favorites.is_empty());
    }

    #[test]
    fn older_records_without_new_fields_still_decode() {
        let user: UserRecord = serde_json::from_str(r#"{"username":"tptacek","karma":5}"#).unwrap();
        assert_eq!(user.username, "tptacek");
        assert!(user.voted.is_empty());
        assert_eq!(user.login_time, 0);
    }
}
