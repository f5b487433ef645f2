//! In-process fakes for exercising the sync paths without a database or
//! directory service.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::directory::{DirectoryError, UserDirectory};
use crate::models::user::{DirectoryUser, UserAttribute, UserPage};
use crate::store::{StoreError, UserStore};

/// A row as held by [`InMemoryUserStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub email: String,
    pub is_dev: bool,
}

/// In-memory [`UserStore`] with the same upsert semantics as the
/// Postgres store: insert sets `is_dev = false`, update only touches
/// email. Writes for identifiers in the failure set return an error.
#[derive(Default)]
pub struct InMemoryUserStore {
    rows: Mutex<HashMap<String, StoredUser>>,
    fail_for: HashSet<String>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes for `user_id` fail with a store error.
    pub fn with_failure_on(mut self, user_id: &str) -> Self {
        self.fail_for.insert(user_id.to_string());
        self
    }

    /// Seed a pre-existing row, bypassing upsert semantics.
    pub fn seed(&self, user_id: &str, email: &str, is_dev: bool) {
        self.rows.lock().unwrap().insert(
            user_id.to_string(),
            StoredUser {
                email: email.to_string(),
                is_dev,
            },
        );
    }

    pub fn get(&self, user_id: &str) -> Option<StoredUser> {
        self.rows.lock().unwrap().get(user_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert_user(&self, user_id: &str, email: &str) -> Result<(), StoreError> {
        if self.fail_for.contains(user_id) {
            return Err(StoreError::Write(format!(
                "injected failure for {user_id}"
            )));
        }

        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(user_id) {
            Some(row) => row.email = email.to_string(),
            None => {
                rows.insert(
                    user_id.to_string(),
                    StoredUser {
                        email: email.to_string(),
                        is_dev: false,
                    },
                );
            }
        }
        Ok(())
    }
}

/// Canned-page [`UserDirectory`].
///
/// Page tokens are page indices rendered as strings. If `fail_at_page`
/// is set, fetching that page index returns a directory error instead.
#[derive(Default)]
pub struct StaticDirectory {
    pages: Vec<Vec<DirectoryUser>>,
    fail_at_page: Option<usize>,
    calls: Mutex<u32>,
}

impl StaticDirectory {
    pub fn new(pages: Vec<Vec<DirectoryUser>>) -> Self {
        Self {
            pages,
            fail_at_page: None,
            calls: Mutex::new(0),
        }
    }

    pub fn failing_at_page(mut self, page: usize) -> Self {
        self.fail_at_page = Some(page);
        self
    }

    /// Number of page fetches served so far.
    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn list_page(
        &self,
        _pool_id: &str,
        page_token: Option<&str>,
    ) -> Result<UserPage, DirectoryError> {
        *self.calls.lock().unwrap() += 1;

        let index: usize = match page_token {
            None => 0,
            Some(token) => token
                .parse()
                .map_err(|_| DirectoryError::InvalidResponse(format!("bad token {token}")))?,
        };

        if self.fail_at_page == Some(index) {
            return Err(DirectoryError::Status(500));
        }

        let users = self.pages.get(index).cloned().unwrap_or_default();
        let page_token = if index + 1 < self.pages.len() {
            Some((index + 1).to_string())
        } else {
            None
        };

        Ok(UserPage { users, page_token })
    }
}

/// Build a directory entry with a username and an optional email.
pub fn directory_user(username: Option<&str>, email: Option<&str>) -> DirectoryUser {
    let mut attributes = vec![UserAttribute {
        name: "given_name".to_string(),
        value: Some("Test".to_string()),
    }];
    if let Some(email) = email {
        attributes.push(UserAttribute {
            name: "email".to_string(),
            value: Some(email.to_string()),
        });
    }
    DirectoryUser {
        username: username.map(String::from),
        attributes,
    }
}

/// Build a post-confirmation trigger payload.
pub fn confirmation_event(user_name: &str, email: Option<&str>) -> Value {
    let mut attributes = json!({"sub": user_name});
    if let Some(email) = email {
        attributes["email"] = json!(email);
    }
    json!({
        "userName": user_name,
        "triggerSource": "PostConfirmation_ConfirmSignUp",
        "request": {"userAttributes": attributes},
        "response": {}
    })
}

/// Build a timer-originated trigger payload.
pub fn scheduled_event() -> Value {
    json!({"source": "aws.events", "detail-type": "Scheduled Event"})
}

/// Build an on-demand full-sync trigger payload.
pub fn manual_sync_event() -> Value {
    json!({"action": "sync_users"})
}
