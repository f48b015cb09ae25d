//! Canned backend for unit tests.

use async_trait::async_trait;
use gateway_client::Gateway;
use gateway_core::{
    ChatBackend, CompletionRequest, GatewayError, GatewayResult, GenerationParams, ProviderType,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(crate) struct CannedBackend {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl CannedBackend {
    pub(crate) fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatBackend for CannedBackend {
    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAI
    }

    fn model(&self) -> &str {
        "canned"
    }

    async fn complete(&self, request: &CompletionRequest) -> GatewayResult<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .ok_or_else(|| GatewayError::empty_reply("canned", "no reply left"))
    }
}

pub(crate) fn gateway(backend: &Arc<CannedBackend>) -> Arc<Gateway> {
    Arc::new(Gateway::with_backend(
        backend.clone(),
        GenerationParams::default(),
    ))
}
