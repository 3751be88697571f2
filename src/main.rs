use jarvis_voice::actions::{Actions, SiteTable};
use jarvis_voice::completion::GeminiClient;
use jarvis_voice::config::{self, Config, Credentials, DEFAULT_CONFIG_PATH};
use jarvis_voice::fallback::Fallback;
use jarvis_voice::launcher::SystemLauncher;
use jarvis_voice::logger;
use jarvis_voice::music::MusicCatalog;
use jarvis_voice::news::NewsApiProvider;
use jarvis_voice::router::Router;
use jarvis_voice::services::{Speaker, Transcriber};
use jarvis_voice::session::{Session, SessionConfig};
use jarvis_voice::speech;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init_logger();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    log::info!("Loading config from: {}", config_path);
    let config = config::load_or_default(&config_path)?;

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            log::error!("{}. Exiting.", e);
            std::process::exit(1);
        }
    };

    let mut session = build_session(&config, credentials)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();
        let mut worker = tokio::task::spawn_blocking(move || session.run(&flag));

        tokio::select! {
            finished = &mut worker => finished?,
            signal = tokio::signal::ctrl_c() => {
                signal?;
                log::info!("Interrupted, finishing current cycle");
                shutdown.store(true, Ordering::SeqCst);
                worker.await?;
            }
        }
        Ok::<(), Box<dyn Error>>(())
    })?;

    Ok(())
}

fn build_session(config: &Config, credentials: Credentials) -> Result<Session, Box<dyn Error>> {
    let timeout = Duration::from_secs(config.services.request_timeout_secs);

    let speaker: Arc<dyn Speaker> = Arc::from(speech::from_config(&config.speech));
    let completion = Arc::new(GeminiClient::new(
        credentials.gemini_api_key,
        config.services.completion_model.clone(),
        timeout,
    ));
    let headlines = Arc::new(NewsApiProvider::new(credentials.news_api_key, timeout));

    let catalog = match &config.music_catalog {
        Some(path) => MusicCatalog::load(path)?,
        None => MusicCatalog::default(),
    };
    log::info!("Music catalog holds {} songs", catalog.len());

    let actions = Actions::new(
        speaker.clone(),
        Arc::new(SystemLauncher),
        headlines,
        catalog,
        SiteTable::from_config(config),
    );
    let fallback = Fallback::new(speaker.clone(), completion);

    Ok(Session::new(
        SessionConfig::from(config),
        transcriber(config)?,
        speaker,
        Router::standard()?,
        actions,
        fallback,
    ))
}

#[cfg(feature = "whisper")]
fn transcriber(config: &Config) -> Result<Box<dyn Transcriber>, Box<dyn Error>> {
    use jarvis_voice::audio::Recorder;
    use jarvis_voice::whisper_integration::WhisperTranscriber;

    let recorder = Recorder::default_input()?;
    Ok(Box::new(WhisperTranscriber::new(
        &config.whisper_model,
        recorder,
        "en",
    )?))
}

#[cfg(not(feature = "whisper"))]
fn transcriber(_config: &Config) -> Result<Box<dyn Transcriber>, Box<dyn Error>> {
    use jarvis_voice::transcription::LineTranscriber;

    log::info!("Microphone support not compiled in, type each phrase on its own line");
    Ok(Box::new(LineTranscriber::stdin()))
}
