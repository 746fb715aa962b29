//! In-memory transport for exercising the content store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{ContentError, Result};
use crate::transport::{Method, Transport};

#[derive(Default)]
pub(crate) struct FakeTransport {
    resources: Mutex<HashMap<String, Value>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(self, endpoint: &str, value: Value) -> Self {
        self.set_resource(endpoint, value);
        self
    }

    pub fn set_resource(&self, endpoint: &str, value: Value) {
        self.resources
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), value);
    }

    pub fn resource(&self, endpoint: &str) -> Option<Value> {
        self.resources.lock().unwrap().get(endpoint).cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn read(&self, endpoint: &str) -> Result<Value> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        // Give concurrently running accessors a chance to interleave
        tokio::task::yield_now().await;

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ContentError::Status {
                status: 503,
                reason: "Service Unavailable".into(),
            });
        }

        self.resource(endpoint).ok_or_else(|| ContentError::Status {
            status: 404,
            reason: "Not Found".into(),
        })
    }

    async fn write(&self, endpoint: &str, _method: Method, body: &Value) -> Result<Value> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ContentError::Status {
                status: 500,
                reason: "Internal Server Error".into(),
            });
        }

        self.set_resource(endpoint, body.clone());
        Ok(body.clone())
    }
}
