//! What happens to utterances no intent claimed.
//!
//! Questions go to the completion service verbatim. Anything else is wrapped
//! in a prompt asking the model to interpret what the user meant.

use crate::classifier::is_question;
use crate::services::{CompletionService, Speaker};
use std::sync::Arc;

pub const QUESTION_ACK: &str = "Let me check that for you…";
pub const UNSURE_ACK: &str = "I'm not sure how to handle that. Let me think…";
pub const COMPLETION_APOLOGY: &str =
    "Sorry, I'm having trouble reaching the language model right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackBranch {
    Question,
    Interpretation,
}

pub fn interpretation_prompt(utterance: &str) -> String {
    format!(
        "A user said: '{utterance}'. They asked their voice assistant to interpret it. \
         Suggest a helpful, friendly response."
    )
}

pub struct Fallback {
    speaker: Arc<dyn Speaker>,
    completion: Arc<dyn CompletionService>,
}

impl Fallback {
    pub fn new(speaker: Arc<dyn Speaker>, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            speaker,
            completion,
        }
    }

    pub fn branch_for(utterance: &str) -> FallbackBranch {
        if is_question(utterance) {
            FallbackBranch::Question
        } else {
            FallbackBranch::Interpretation
        }
    }

    pub fn handle(&self, utterance: &str) -> FallbackBranch {
        let branch = Self::branch_for(utterance);
        log::info!("No intent for '{}', falling back to {:?}", utterance, branch);

        let prompt = match branch {
            FallbackBranch::Question => {
                self.speaker.speak(QUESTION_ACK);
                utterance.to_string()
            }
            FallbackBranch::Interpretation => {
                self.speaker.speak(UNSURE_ACK);
                interpretation_prompt(utterance)
            }
        };

        match self.completion.complete(&prompt) {
            Ok(answer) if !answer.trim().is_empty() => self.speaker.speak(answer.trim()),
            Ok(_) => {
                log::warn!("Completion service returned an empty answer");
                self.speaker.speak(COMPLETION_APOLOGY);
            }
            Err(e) => {
                log::warn!("Completion service failed: {}", e);
                self.speaker.speak(COMPLETION_APOLOGY);
            }
        }
        branch
    }
}
