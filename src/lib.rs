pub mod actions;
pub mod audio;
pub mod classifier;
pub mod completion;
pub mod config;
pub mod fallback;
pub mod launcher;
pub mod logger;
pub mod music;
pub mod news;
pub mod router;
pub mod services;
pub mod session;
pub mod speech;
pub mod transcription;
pub mod wakeword;
pub mod whisper_integration;
