//! Single-pass and map-reduce summarization over a [`Generator`].

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

use super::chunker::split_into_chunks;
use super::client::Generator;
use super::prompt_builder::{build_final_prompt, build_partial_prompt};
use crate::core::config::SummarizerSettings;
use crate::core::models::Mode;
use crate::errors::BotError;

/// Stand-in for a chunk whose partial summary could not be generated.
pub const CHUNK_FALLBACK: &str = "[summary unavailable]";

/// Partial summaries requested at the same time during the map pass.
const MAP_CONCURRENCY: usize = 3;

pub struct Summarizer {
    generator: Arc<dyn Generator>,
    settings: SummarizerSettings,
}

impl Summarizer {
    #[must_use]
    pub fn new(generator: Arc<dyn Generator>, settings: SummarizerSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Summarize `text` at the granularity of `mode`.
    ///
    /// Short inputs take one generation call. Longer inputs are chunked,
    /// each chunk is summarized tersely, and the joined partials are
    /// summarized once more. Only a failure of that last call is an error.
    ///
    /// # Errors
    ///
    /// Returns `BotError::GenerationError` if the final generation call fails.
    pub async fn summarize(&self, text: &str, mode: Mode) -> Result<String, BotError> {
        let length = text.chars().count();
        if length < self.settings.single_pass_threshold {
            info!(length, %mode, "Single-pass summarization");
            return self
                .generator
                .generate(&build_final_prompt(text, mode))
                .await;
        }

        let chunks = split_into_chunks(text, self.settings.chunk_size);
        info!(length, chunks = chunks.len(), %mode, "Map-reduce summarization");

        let partials: Vec<String> = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, chunk)| async move {
                match self.generator.generate(&build_partial_prompt(&chunk)).await {
                    Ok(partial) => partial,
                    Err(e) => {
                        warn!(chunk = index, "Partial summary failed: {}", e);
                        CHUNK_FALLBACK.to_string()
                    }
                }
            })
            .buffered(MAP_CONCURRENCY)
            .collect()
            .await;

        let combined = partials.join("\n");
        self.generator
            .generate(&build_final_prompt(&combined, mode))
            .await
    }
}
