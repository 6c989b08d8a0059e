//! In-memory store doubles

use async_trait::async_trait;
use chait_common::ThesaurusRecord;
use chait_ingest::store::{StoreError, ThesaurusStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// HashMap-backed store keyed by puri
#[derive(Default)]
pub struct MemoryStore {
    connected: bool,
    rows: Mutex<HashMap<String, ThesaurusRecord>>,
    pub connects: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, puri: &str) -> Option<ThesaurusRecord> {
        self.rows.lock().unwrap().get(puri).cloned()
    }
}

#[async_trait]
impl ThesaurusStore for MemoryStore {
    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn connect(&mut self) -> Result<(), StoreError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.connected = true;
        Ok(())
    }

    async fn find_existing(&self, puri: &str) -> Result<Option<String>, StoreError> {
        Ok(self.rows.lock().unwrap().get(puri).map(|r| r.puri.clone()))
    }

    async fn upsert(&self, record: &ThesaurusRecord) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap()
            .insert(record.puri.clone(), record.clone());
        Ok(())
    }
}

/// MemoryStore whose probe and upsert fail a set number of times first
pub struct FlakyStore {
    inner: MemoryStore,
    select_failures: usize,
    upsert_failures: usize,
    pub select_attempts: AtomicUsize,
    pub upsert_attempts: AtomicUsize,
}

impl FlakyStore {
    pub fn new(select_failures: usize, upsert_failures: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            select_failures,
            upsert_failures,
            select_attempts: AtomicUsize::new(0),
            upsert_attempts: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn transient() -> StoreError {
        StoreError {
            message: "canceling statement due to lock timeout".to_string(),
            code: Some("55P03".to_string()),
            hint: Some("retry later".to_string()),
            details: None,
        }
    }
}

#[async_trait]
impl ThesaurusStore for FlakyStore {
    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    async fn connect(&mut self) -> Result<(), StoreError> {
        self.inner.connect().await
    }

    async fn find_existing(&self, puri: &str) -> Result<Option<String>, StoreError> {
        let attempt = self.select_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.select_failures {
            return Err(Self::transient());
        }
        self.inner.find_existing(puri).await
    }

    async fn upsert(&self, record: &ThesaurusRecord) -> Result<(), StoreError> {
        let attempt = self.upsert_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.upsert_failures {
            return Err(Self::transient());
        }
        self.inner.upsert(record).await
    }
}
