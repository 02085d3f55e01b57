#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use peptide::api::RevoltClient;
use peptide::auth::CredentialStore;
use peptide::session::{SessionContext, SessionCredential};
use peptide::storage::{KvStorage, StorageError};
use serde_json::{json, Value};
use wiremock::MockServer;

/// In-memory key/value store that also records the order of writes.
#[derive(Default)]
pub struct InMemoryKvStorage {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<String>>,
    fail_writes: bool,
}

impl InMemoryKvStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("store lock poisoned").clone()
    }
}

impl KvStorage for InMemoryKvStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io("read-only storage".to_string()));
        }
        self.writes
            .lock()
            .expect("store lock poisoned")
            .push(key.to_string());
        self.values
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .expect("store lock poisoned")
            .remove(key);
        Ok(())
    }
}

pub struct Harness {
    pub client: RevoltClient,
    pub session: SessionContext,
    pub storage: Arc<InMemoryKvStorage>,
    pub credentials: CredentialStore,
}

pub fn harness(server: &MockServer) -> Harness {
    harness_with_storage(server, InMemoryKvStorage::new())
}

pub fn harness_with_storage(server: &MockServer, storage: InMemoryKvStorage) -> Harness {
    let session = SessionContext::new();
    let client = RevoltClient::new(server.uri(), session.clone());
    let storage = Arc::new(storage);
    let credentials = CredentialStore::new(storage.clone());
    Harness {
        client,
        session,
        storage,
        credentials,
    }
}

/// Harness whose session is already logged in with `token`.
pub fn logged_in_harness(server: &MockServer, token: &str) -> Harness {
    let harness = harness(server);
    harness
        .session
        .login_as(SessionCredential::new(token, "session-0"));
    harness
}

pub fn success_body(token: &str, id: &str) -> Value {
    json!({
        "result": "Success",
        "_id": id,
        "user_id": "01USER",
        "token": token,
        "name": "peptide"
    })
}
