use crate::config::SpeechConfig;
use crate::services::Speaker;
use std::process::Command;
use std::sync::Mutex;

/// Speaks through an external TTS program, one utterance at a time.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    // Held while the program runs so two utterances never overlap.
    busy: Mutex<()>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            busy: Mutex::new(()),
        }
    }

    pub fn command_for(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(text);
        command
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) {
        log::info!("Assistant → {}", text);
        let _guard = self.busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match self.command_for(text).status() {
            Ok(status) if status.success() => {}
            Ok(status) => log::warn!("{} exited with status: {}", self.program, status),
            Err(e) => log::warn!("Failed to run {}: {}", self.program, e),
        }
    }
}

/// Only logs what would have been said.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str) {
        log::info!("Assistant → {}", text);
    }
}

pub fn from_config(config: &SpeechConfig) -> Box<dyn Speaker> {
    match config.command.as_deref().map(str::trim) {
        Some(program) if !program.is_empty() => {
            Box::new(CommandSpeaker::new(program, config.args.clone()))
        }
        _ => Box::new(LogSpeaker),
    }
}
