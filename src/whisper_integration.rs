use once_cell::sync::Lazy;
use regex::Regex;

static SPECIAL_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[_BEG_\]|\[_TT_\d+\]|\[BLANK_AUDIO\]").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips whisper's special tags, collapses whitespace and drops the
/// trailing full stop or exclamation mark whisper likes to add. A trailing
/// `?` is kept since it marks a question.
pub fn clean_whisper_text(original: &str) -> String {
    let clean = SPECIAL_TAGS.replace_all(original, "");
    let clean = SPACES.replace_all(&clean, " ");
    clean
        .trim()
        .trim_end_matches(['.', '!'])
        .trim_end()
        .to_string()
}

#[cfg(feature = "whisper")]
pub use engine::WhisperTranscriber;

#[cfg(feature = "whisper")]
mod engine {
    use super::clean_whisper_text;
    use crate::audio::{self, Recorder};
    use crate::services::{ListenWindow, Transcriber, TranscriptionError};
    use std::error::Error;
    use std::path::Path;
    use whisper_rs::{
        FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperError,
    };

    /// Records a bounded clip from the microphone and transcribes it locally.
    pub struct WhisperTranscriber {
        ctx: WhisperContext,
        recorder: Recorder,
        language: String,
    }

    impl WhisperTranscriber {
        pub fn new(
            model_path: &Path,
            recorder: Recorder,
            language: impl Into<String>,
        ) -> Result<Self, Box<dyn Error>> {
            let path = model_path
                .to_str()
                .ok_or("Whisper model path is not valid UTF-8")?;
            log::info!("Loading Whisper model from: {}", path);
            let ctx = WhisperContext::new_with_params(path, WhisperContextParameters::default())?;
            Ok(Self {
                ctx,
                recorder,
                language: language.into(),
            })
        }

        fn transcribe(&self, audio: &[f32]) -> Result<String, WhisperError> {
            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_token_timestamps(false);
            params.set_language(Some(self.language.as_str()));

            let mut state = self.ctx.create_state()?;
            state.full(params, audio)?;

            let num_segments = state.full_n_segments()?;
            let mut result = String::new();
            for segment in 0..num_segments {
                result.push_str(&state.full_get_segment_text(segment)?);
                result.push(' ');
            }
            Ok(clean_whisper_text(&result))
        }
    }

    impl Transcriber for WhisperTranscriber {
        fn listen(&mut self, window: ListenWindow) -> Result<String, TranscriptionError> {
            let clip = self
                .recorder
                .record(window.phrase_limit)
                .map_err(|e| TranscriptionError::Engine(e.to_string()))?;
            if audio::is_silent(&clip) {
                return Err(TranscriptionError::NoSpeech);
            }

            let text = self
                .transcribe(&clip)
                .map_err(|e| TranscriptionError::Engine(e.to_string()))?;
            if text.is_empty() {
                Err(TranscriptionError::Unintelligible)
            } else {
                Ok(text)
            }
        }
    }
}
