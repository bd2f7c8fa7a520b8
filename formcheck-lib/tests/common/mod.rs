//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use formcheck_lib::config::FieldIds;
use formcheck_lib::error::TransportError;
use formcheck_lib::form::{FieldSource, Form};
use formcheck_lib::submit::Transport;
use simplelog::{Config, LevelFilter, TestLogger};
use tokio::sync::Notify;

static LOGGER: Once = Once::new();

/// Routes `log` output through the test harness.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}

/// Today's date as an HTML date input would report it.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Fills `form` with values that pass every registration rule.
pub fn fill_valid(form: &Form, ids: &FieldIds) {
    form.set_value(&ids.first_name, "John");
    form.set_value(&ids.last_name, "Doe");
    form.set_value(&ids.email, "john@doe.com");
    form.set_value(&ids.password, "abcd1234");
    form.set_value(&ids.confirm_password, "abcd1234");
    form.set_value(&ids.phone, "1234567890");
    form.set_value(&ids.date, &today());
    form.set_checked(&ids.choice_group.options[0], true);
    form.set_checked(&ids.checkbox, true);
}

enum Reply {
    Body(String),
    Fail(String),
}

struct MockInner {
    reply: Reply,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

/// Transport that records every request and answers with a fixed reply.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

impl MockTransport {
    /// Answers every request with `body`.
    pub fn replying(body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Body(body.into()))
    }

    /// Fails every request as if the network were down.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(reason.into()))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            inner: Arc::new(MockInner {
                reply,
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Every `(endpoint, payload)` received so far.
    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.inner.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<String, TransportError> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), payload.clone()));

        match &self.inner.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail(reason) => Err(TransportError::Unavailable(reason.clone())),
        }
    }
}

/// Transport that parks each request until the test releases it.
#[derive(Clone)]
pub struct GatedTransport {
    pub arrived: Arc<Notify>,
    pub release: Arc<Notify>,
    pub body: String,
}

impl GatedTransport {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            arrived: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            body: body.into(),
        }
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn post_json(
        &self,
        _endpoint: &str,
        _payload: &serde_json::Value,
    ) -> Result<String, TransportError> {
        self.arrived.notify_one();
        self.release.notified().await;
        Ok(self.body.clone())
    }
}

/// Transport that answers after a fixed delay.
pub struct SlowTransport {
    pub delay: std::time::Duration,
    pub body: String,
}

#[async_trait]
impl Transport for SlowTransport {
    async fn post_json(
        &self,
        _endpoint: &str,
        _payload: &serde_json::Value,
    ) -> Result<String, TransportError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.body.clone())
    }
}
