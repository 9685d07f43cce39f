use crate::invoke::ExternalCall;

use super::backend::GenerateRequest;
use super::label::{Sentiment, normalize_reply};

/// Text shorter than this never reaches the backend.
const MIN_PROMPT_CHARS: usize = 15;

/// Keep at most `max_chars` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_lyrics(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[must_use]
pub fn build_prompt(lyrics: &str) -> String {
    format!(
        "Analise o sentimento geral desta letra de música e classifique em uma categoria:

LETRA:
{lyrics}

Classifique como:
- Positiva: se expressa alegria, amor, esperança, felicidade
- Negativa: se expressa tristeza, raiva, dor, desespero
- Neutra: se não tem sentimento forte ou é ambígua

Responda APENAS com uma palavra: Positiva, Negativa ou Neutra"
    )
}

/// Labels cleaned lyrics through a text-generation backend.
pub struct Classifier<'a, B: ?Sized> {
    backend: &'a B,
    model: String,
    temperature: f32,
    num_predict: u32,
    max_prompt_chars: usize,
}

impl<'a, B> Classifier<'a, B>
where
    B: ExternalCall<GenerateRequest, Output = String> + ?Sized,
{
    pub fn new(backend: &'a B, model: impl Into<String>, temperature: f32, num_predict: u32, max_prompt_chars: usize) -> Self {
        Self { backend, model: model.into(), temperature, num_predict, max_prompt_chars }
    }

    /// Classify one lyric. Never fails: backend errors fall back to `Neutral`.
    pub fn classify(&self, lyrics: &str) -> Sentiment {
        if lyrics.chars().count() < MIN_PROMPT_CHARS {
            return Sentiment::Neutral;
        }
        let req = GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(&truncate_lyrics(lyrics, self.max_prompt_chars)),
            temperature: self.temperature,
            num_predict: self.num_predict,
        };
        match self.backend.call(&req) {
            Ok(reply) => {
                let label = normalize_reply(&reply);
                log::debug!("classify: reply={:?} label={label}", reply.trim());
                label
            }
            Err(e) => {
                log::warn!("classify: backend request failed, defaulting to {}: {e}", Sentiment::Neutral);
                Sentiment::Neutral
            }
        }
    }
}
