use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use crate::errors::{AppError, AppResult};
use crate::models::User;

// File-backed user collection. Every operation runs a full
// read-modify-write cycle against the backing file; no state is cached
// between requests. With serialize_access enabled the whole cycle is held
// under a per-process mutex, otherwise concurrent writers can race
// (last writer wins), matching the legacy behavior.
#[derive(Clone)]
pub struct UserStore {
    path: PathBuf,
    write_lock: Option<Arc<Mutex<()>>>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>, serialize_access: bool) -> Self {
        Self {
            path: path.into(),
            write_lock: serialize_access.then(|| Arc::new(Mutex::new(()))),
        }
    }

    async fn acquire(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    // Load the full collection. Read and parse failures degrade to an
    // empty collection; they are logged, never surfaced to the caller.
    pub async fn load_users(&self) -> Vec<User> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to read users file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if data.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&data) {
            Ok(users) => users,
            Err(e) => {
                tracing::error!("Failed to parse users file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    // Persist the full collection, overwriting the backing file.
    async fn save_users(&self, users: &[User]) -> AppResult<()> {
        let data = serde_json::to_string_pretty(users)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }

    pub async fn list(&self) -> Vec<User> {
        self.load_users().await
    }

    pub async fn create(&self, user: User) -> AppResult<()> {
        let _guard = self.acquire().await;

        let mut users = self.load_users().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict);
        }

        users.push(user);

        // A failed write is logged but does not roll back the outcome
        // already computed from the in-memory append.
        if let Err(e) = self.save_users(&users).await {
            tracing::error!("Failed to persist users file {}: {}", self.path.display(), e);
        }
        Ok(())
    }

    // Removes every record whose email matches exactly.
    pub async fn delete(&self, email: &str) -> AppResult<()> {
        let _guard = self.acquire().await;

        let users = self.load_users().await;
        let remaining: Vec<User> = users
            .iter()
            .filter(|u| u.email != email)
            .cloned()
            .collect();

        if remaining.len() == users.len() {
            return Err(AppError::NotFound);
        }

        if let Err(e) = self.save_users(&remaining).await {
            tracing::error!("Failed to persist users file {}: {}", self.path.display(), e);
        }
        Ok(())
    }

    // Plain-text credential probe; a mismatch is a negative result, not an error.
    pub async fn authenticate(&self, username: &str, password: &str) -> bool {
        self.load_users()
            .await
            .iter()
            .any(|u| u.username == username && u.password == password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir, serialize_access: bool) -> UserStore {
        UserStore::new(dir.path().join("users.json"), serialize_access)
    }

    fn sample_user(email: &str, username: &str) -> User {
        User {
            first_name: "Ada".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password: "secret".to_string(),
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_only_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);
        std::fs::write(dir.path().join("users.json"), "  \n\t ").unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);
        std::fs::write(dir.path().join("users.json"), "{ not json").unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        store.create(sample_user("a@x.com", "a")).await.unwrap();
        store.create(sample_user("b@x.com", "b")).await.unwrap();

        let users = store.list().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "a@x.com");
        assert_eq!(users[1].email, "b@x.com");

        // The backing file is the source of truth between requests
        let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["firstName"], "Ada");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        store.create(sample_user("a@x.com", "a")).await.unwrap();
        let result = store.create(sample_user("a@x.com", "other")).await;
        assert!(matches!(result, Err(AppError::Conflict)));

        // Collection unchanged after the rejected create
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        store.create(sample_user("a@x.com", "a")).await.unwrap();
        store.create(sample_user("b@x.com", "b")).await.unwrap();

        store.delete("a@x.com").await.unwrap();
        let users = store.list().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "b@x.com");

        // Second delete of the same email finds nothing
        let result = store.delete("a@x.com").await;
        assert!(matches!(result, Err(AppError::NotFound)));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_all_matching_records() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        // Duplicates cannot be created through the API, but a hand-edited
        // file can contain them; delete removes every match.
        let seeded = vec![
            sample_user("dup@x.com", "first"),
            sample_user("dup@x.com", "second"),
            sample_user("keep@x.com", "keep"),
        ];
        std::fs::write(
            dir.path().join("users.json"),
            serde_json::to_string_pretty(&seeded).unwrap(),
        )
        .unwrap();

        store.delete("dup@x.com").await.unwrap();
        let users = store.list().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "keep@x.com");
    }

    #[tokio::test]
    async fn test_delete_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        store.create(sample_user("a@x.com", "a")).await.unwrap();
        let result = store.delete("A@X.COM").await;
        assert!(matches!(result, Err(AppError::NotFound)));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        store.create(sample_user("a@x.com", "ada")).await.unwrap();

        assert!(store.authenticate("ada", "secret").await);
        assert!(!store.authenticate("ada", "wrong").await);
        assert!(!store.authenticate("nobody", "secret").await);
        assert!(!store.authenticate("Ada", "secret").await);  // case-sensitive
    }

    #[tokio::test]
    async fn test_extra_fields_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, false);

        let mut user = sample_user("a@x.com", "a");
        user.extra.insert("role".to_string(), json!("admin"));
        user.extra.insert("age".to_string(), json!(30));
        store.create(user).await.unwrap();

        let users = store.list().await;
        assert_eq!(users[0].extra["role"], json!("admin"));
        assert_eq!(users[0].extra["age"], json!(30));
    }

    #[tokio::test]
    async fn test_serialized_access_mode() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, true);

        // Same operation semantics with the mutex held across each cycle
        store.create(sample_user("a@x.com", "a")).await.unwrap();
        assert!(matches!(
            store.create(sample_user("a@x.com", "b")).await,
            Err(AppError::Conflict)
        ));
        assert!(store.authenticate("a", "secret").await);
        store.delete("a@x.com").await.unwrap();
        assert!(store.list().await.is_empty());
    }
}
