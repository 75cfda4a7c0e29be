/*!
 * Mock speech engine for testing
 */

use async_trait::async_trait;
use prova::errors::SpeechError;
use prova::rehearsal::{SpeechEngine, SpeechOptions};
use std::sync::Mutex;

/// Speech engine that records utterances and can fail on demand
#[derive(Debug, Default)]
pub struct MockSpeechEngine {
    spoken: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl MockSpeechEngine {
    /// Create a mock that fails every utterance equal to `text`
    pub fn failing_on(text: &str) -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail_on: Some(text.to_string()),
        }
    }

    /// Utterances spoken so far
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for MockSpeechEngine {
    async fn speak(&self, text: &str, _options: &SpeechOptions) -> Result<(), SpeechError> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(SpeechError::Failed(format!("mock failure on '{}'", text)));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
