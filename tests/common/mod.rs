#![allow(dead_code)]

use async_trait::async_trait;
use chrono::TimeDelta;
use std::sync::{Arc, Mutex};

use summabot::BotError;
use summabot::ai::{Generator, Summarizer};
use summabot::bot::CommandRouter;
use summabot::core::config::SummarizerSettings;
use summabot::core::models::ChatId;
use summabot::core::state::BotState;
use summabot::core::usage::UsageLimiter;
use summabot::telegram::{InlineKeyboard, Messenger};
use summabot::utils::extract::PageExtractor;

/// Records every prompt and answers `<first word of the content>`, so replies
/// are deterministic whatever order concurrent calls land in.
/// Prompts containing `fail_marker` produce a generation error.
#[derive(Default)]
pub struct FakeGenerator {
    pub prompts: Mutex<Vec<String>>,
    pub fail_marker: Option<String>,
}

impl FakeGenerator {
    pub fn failing_on(marker: &str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail_marker: Some(marker.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(marker) = &self.fail_marker
            && prompt.contains(marker.as_str())
        {
            return Err(BotError::GenerationError("boom".to_string()));
        }
        Ok(fake_summary(prompt))
    }
}

pub fn fake_summary(prompt: &str) -> String {
    let content = prompt.split_once("TEXT:\n").map_or(prompt, |(_, c)| c);
    let first = content.split_whitespace().next().unwrap_or("");
    format!("<{first}>")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        chat_id: ChatId,
        text: String,
        has_keyboard: bool,
    },
    Edit {
        chat_id: ChatId,
        message_id: i64,
        text: String,
    },
    CallbackAnswer(String),
}

#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<Sent>>,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id,
            text: text.to_string(),
            has_keyboard: keyboard.is_some(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: i64,
        text: &str,
    ) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::CallbackAnswer(callback_id.to_string()));
        Ok(())
    }
}

/// Returns `page` for every URL, counting calls.
pub struct StubExtractor {
    pub page: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl StubExtractor {
    pub fn returning(page: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageExtractor for StubExtractor {
    async fn extract(&self, url: &str) -> Option<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.page.clone()
    }
}

pub struct Harness {
    pub router: CommandRouter,
    pub generator: Arc<FakeGenerator>,
    pub messenger: Arc<RecordingMessenger>,
    pub extractor: Arc<StubExtractor>,
}

pub fn harness_with(limit: u32, generator: FakeGenerator, extractor: StubExtractor) -> Harness {
    let generator = Arc::new(generator);
    let messenger = Arc::new(RecordingMessenger::default());
    let extractor = Arc::new(extractor);
    let state = Arc::new(BotState::new(UsageLimiter::new(
        limit,
        TimeDelta::hours(24),
    )));
    let summarizer = Summarizer::new(generator.clone(), SummarizerSettings::default());
    let router = CommandRouter::new(state, summarizer, messenger.clone(), extractor.clone());
    Harness {
        router,
        generator,
        messenger,
        extractor,
    }
}

pub fn harness(limit: u32) -> Harness {
    harness_with(
        limit,
        FakeGenerator::default(),
        StubExtractor::returning(Some("Extracted page body. It has facts.")),
    )
}
