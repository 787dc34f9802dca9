use crate::domain::ports::ChatClient;
use crate::utils::error::{AnalysisError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// 依序回傳預先準備好的回應，並記錄每次呼叫的 (system, user)
#[derive(Clone)]
pub(crate) struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<String>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedClient {
    pub(crate) fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_content.to_string()));

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AnalysisError::ApiStatusError {
                    status: 500,
                    body: "no scripted response left".to_string(),
                })
            })
    }
}
