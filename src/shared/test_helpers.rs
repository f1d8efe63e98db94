#![cfg(test)]

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::core::config::AuthConfig;
use crate::features::auth::model::Claims;
use crate::modules::openai::{CompletionRequest, LlmError, TextGenerator};

pub const TEST_JWT_SECRET: &str = "test-secret-with-enough-length-for-hs256";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret: TEST_JWT_SECRET.to_string(),
        issuer: None,
        audience: None,
        jwt_leeway: Duration::from_secs(60),
    }
}

/// Sign a short-lived access token for `sub`
pub fn issue_token(sub: &str) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 600,
        iat: Some(now),
        iss: None,
        aud: None,
        preferred_username: Some(sub.to_string()),
        email: None,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Text generator returning a canned reply, or failing when none is set
pub struct StubGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(LlmError::Api {
                status: 500,
                message: "upstream unavailable".to_string(),
            }),
        }
    }
}
