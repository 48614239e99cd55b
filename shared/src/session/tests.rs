use super::*;
use crate::UserRole;

// =========================================================
// Shared Fixtures
// =========================================================

fn student() -> User {
    User {
        id: "s1".to_string(),
        email: "sam@school.edu".to_string(),
        first_name: "Sam".to_string(),
        last_name: "Lee".to_string(),
        role: UserRole::Student,
        created_at: Some("2024-01-02T03:04:05.000Z".to_string()),
        updated_at: None,
    }
}

/// 写入总是失败的存储，用于验证内存状态与持久化解耦
#[derive(Default)]
struct FailingStore {
    inner: MemoryStore,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError("quota exceeded".to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

/// 完全不可用的存储（localStorage 被禁用）
struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError("localStorage unavailable".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError("localStorage unavailable".to_string()))
    }
}

// =========================================================
// Login / Logout
// =========================================================

#[test]
fn login_persists_both_keys() {
    let mut session = SessionStore::hydrate(MemoryStore::new());
    assert!(!session.is_authenticated());

    session.login("jwt-abc", student()).unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("jwt-abc"));
    assert_eq!(session.storage().get(TOKEN_KEY).as_deref(), Some("jwt-abc"));
    assert!(session.storage().contains(USER_KEY));
}

#[test]
fn logout_removes_both_keys() {
    let mut session = SessionStore::hydrate(MemoryStore::new());
    session.login("jwt-abc", student()).unwrap();

    session.logout().unwrap();

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(!session.storage().contains(TOKEN_KEY));
    assert!(!session.storage().contains(USER_KEY));
}

#[test]
fn empty_token_is_not_authenticated() {
    let mut session = SessionStore::hydrate(MemoryStore::new());
    session.login("", student()).unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn storage_failure_still_updates_memory() {
    let mut session = SessionStore::hydrate(FailingStore::default());
    let result = session.login("jwt-abc", student());

    assert!(matches!(result, Err(SessionError::Storage(_))));
    assert!(session.is_authenticated());
}

#[test]
fn unavailable_storage_starts_logged_out_and_still_logs_in() {
    let mut session = SessionStore::hydrate(UnavailableStore);
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());

    assert!(matches!(
        session.login("jwt-abc", student()),
        Err(SessionError::Storage(_))
    ));
    assert!(session.is_authenticated());

    assert!(session.logout().is_err());
    assert!(!session.is_authenticated());
}

// =========================================================
// Hydration
// =========================================================

#[test]
fn hydrate_restores_the_last_persisted_user() {
    let mut first = SessionStore::hydrate(MemoryStore::new());
    first.login("jwt-abc", student()).unwrap();

    let mut updated = student();
    updated.first_name = "Samantha".to_string();
    first.update_user(updated.clone()).unwrap();

    let restored = SessionStore::hydrate(first.storage().clone());
    assert!(restored.is_authenticated());
    assert_eq!(restored.user(), Some(&updated));
    assert_eq!(restored.token(), Some("jwt-abc"));
}

#[test]
fn hydrate_requires_both_keys() {
    let mut storage = MemoryStore::new();
    storage.set(TOKEN_KEY, "jwt-abc").unwrap();

    let session = SessionStore::hydrate(storage);
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
}

#[test]
fn unknown_role_clears_the_stored_session() {
    let mut storage = MemoryStore::new();
    storage.set(TOKEN_KEY, "jwt-abc").unwrap();
    storage
        .set(
            USER_KEY,
            r#"{"id":"x1","email":"x@school.edu","firstName":"X","lastName":"Y","role":"JANITOR"}"#,
        )
        .unwrap();

    let session = SessionStore::hydrate(storage);

    assert!(!session.is_authenticated());
    assert!(!session.storage().contains(TOKEN_KEY));
    assert!(!session.storage().contains(USER_KEY));
}

#[test]
fn update_user_keeps_the_token() {
    let mut session = SessionStore::hydrate(MemoryStore::new());
    session.login("jwt-abc", student()).unwrap();

    let mut renamed = student();
    renamed.last_name = "Park".to_string();
    session.update_user(renamed).unwrap();

    assert_eq!(session.token(), Some("jwt-abc"));
    assert_eq!(session.user().map(|u| u.last_name.as_str()), Some("Park"));
    let stored = session.storage().get(USER_KEY).unwrap();
    assert!(stored.contains("\"lastName\":\"Park\""));
}
