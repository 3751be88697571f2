mod common;

use common::{HarnessBuilder, StubCompletion, StubHeadlines, command};
use jarvis_voice::actions::{NEWS_INTRO, NEWS_QUERY, NO_NEWS, UNKNOWN_SONG};
use jarvis_voice::fallback::{COMPLETION_APOLOGY, QUESTION_ACK, UNSURE_ACK, interpretation_prompt};
use jarvis_voice::music::MusicCatalog;
use jarvis_voice::services::{ListenWindow, ServiceError, TranscriptionError};
use jarvis_voice::session::{COMMAND_PROMPT, FAREWELL, GREETING, SessionState};
use std::sync::atomic::AtomicBool;

/// Wake, then one command: returns to waiting afterwards.
fn drive(harness: &mut common::Harness) {
    assert_eq!(harness.session.step(), SessionState::AwaitingCommand);
    assert_eq!(harness.session.step(), SessionState::WaitingForWake);
}

#[test]
fn open_youtube_launches_exactly_once() {
    let mut harness = command("open youtube now").build();
    drive(&mut harness);

    assert_eq!(harness.launcher.opened(), vec!["https://www.youtube.com"]);
    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, "Opening YouTube"]
    );
    assert!(harness.completion.prompts().is_empty());
}

#[test]
fn wake_word_must_match_exactly() {
    let mut harness = HarnessBuilder::new(vec![Ok("jarvis please"), Ok("hey Jarvis"), Ok(" JARVIS ")]).build();

    assert_eq!(harness.session.step(), SessionState::WaitingForWake);
    assert_eq!(harness.session.step(), SessionState::WaitingForWake);
    assert_eq!(harness.session.step(), SessionState::AwaitingCommand);
    assert!(harness.speaker.spoken().is_empty());
}

#[test]
fn wake_failures_retry_silently() {
    let mut harness = HarnessBuilder::new(vec![
        Err(TranscriptionError::NoSpeech),
        Err(TranscriptionError::Timeout),
        Err(TranscriptionError::Unintelligible),
        Ok("jarvis"),
    ])
    .build();

    for _ in 0..3 {
        assert_eq!(harness.session.step(), SessionState::WaitingForWake);
    }
    assert_eq!(harness.session.step(), SessionState::AwaitingCommand);
    assert!(harness.speaker.spoken().is_empty());
}

#[test]
fn each_phase_uses_its_own_listen_window() {
    let mut harness = command("how are you").build();
    drive(&mut harness);

    assert_eq!(
        *harness.windows.lock().unwrap(),
        vec![ListenWindow::from_secs(10, 2), ListenWindow::from_secs(6, 6)]
    );
}

#[test]
fn failed_command_dispatches_nothing() {
    let mut harness =
        HarnessBuilder::new(vec![Ok("jarvis"), Err(TranscriptionError::Timeout)]).build();
    drive(&mut harness);

    assert_eq!(harness.speaker.spoken(), vec![COMMAND_PROMPT]);
    assert!(harness.launcher.opened().is_empty());
    assert!(harness.completion.prompts().is_empty());
}

#[test]
fn play_music_opens_the_named_song() {
    let mut harness = command("please play despacito music").build();
    drive(&mut harness);

    assert_eq!(harness.launcher.opened(), vec!["https://youtu.be/kJQP7kiw5Fk"]);
    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, "Playing despacito"]
    );
}

#[test]
fn play_music_without_a_known_song() {
    let mut harness = command("please play despacito music")
        .catalog(MusicCatalog::new([("believer", "https://youtu.be/7wtfhZwyrcc")]))
        .build();
    drive(&mut harness);

    assert!(harness.launcher.opened().is_empty());
    assert_eq!(harness.speaker.spoken(), vec![COMMAND_PROMPT, UNKNOWN_SONG]);
}

#[test]
fn news_reads_intro_and_five_headlines() {
    let mut harness = command("tell me the news")
        .headlines(StubHeadlines::titled(8))
        .build();
    drive(&mut harness);

    let mut expected = vec![COMMAND_PROMPT.to_string(), NEWS_INTRO.to_string()];
    expected.extend((1..=5).map(|i| format!("Headline {i}")));
    assert_eq!(harness.speaker.spoken(), expected);
    assert_eq!(harness.headlines.queries(), vec![NEWS_QUERY]);
}

#[test]
fn empty_news_says_so_once() {
    let mut harness = command("tell me the news")
        .headlines(StubHeadlines::replying(Ok(Vec::new())))
        .build();
    drive(&mut harness);

    assert_eq!(harness.speaker.spoken(), vec![COMMAND_PROMPT, NO_NEWS]);
}

#[test]
fn news_outage_is_apologised_for() {
    let mut harness = command("tell me the news")
        .headlines(StubHeadlines::replying(Err(ServiceError::Timeout)))
        .build();
    drive(&mut harness);

    assert_eq!(
        harness.speaker.spoken(),
        vec![
            COMMAND_PROMPT,
            "Sorry, I couldn't reach the news service: request timed out"
        ]
    );
}

#[test]
fn unmatched_question_is_asked_directly() {
    let mut harness = command("Is it raining in Paris?").build();
    drive(&mut harness);

    assert_eq!(harness.completion.prompts(), vec!["Is it raining in Paris?"]);
    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, QUESTION_ACK, "model answer"]
    );
}

#[test]
fn unmatched_statement_is_interpreted() {
    let mut harness = command("banana phone").build();
    drive(&mut harness);

    assert_eq!(
        harness.completion.prompts(),
        vec![interpretation_prompt("banana phone")]
    );
    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, UNSURE_ACK, "model answer"]
    );
}

#[test]
fn completion_outage_is_apologised_for() {
    let mut harness = command("who wrote dune")
        .completion(StubCompletion::replying(Err(ServiceError::Status(503))))
        .build();
    drive(&mut harness);

    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, QUESTION_ACK, COMPLETION_APOLOGY]
    );
}

#[test]
fn run_handles_commands_until_input_closes() {
    let mut harness = HarnessBuilder::new(vec![
        Ok("jarvis"),
        Ok("what is your name"),
        Ok("hello"),
        Ok("Jarvis"),
        Ok("open gmail"),
    ])
    .build();

    harness.session.run(&AtomicBool::new(false));

    assert!(harness.session.input_closed());
    assert_eq!(harness.launcher.opened(), vec!["https://mail.google.com/"]);
    assert_eq!(
        harness.speaker.spoken(),
        vec![
            GREETING,
            COMMAND_PROMPT,
            "I am Jarvis, your personal assistant.",
            COMMAND_PROMPT,
            "Opening Gmail",
            FAREWELL,
        ]
    );
}

#[test]
fn raised_shutdown_flag_only_says_goodbye() {
    let mut harness = command("open google").build();

    harness.session.run(&AtomicBool::new(true));

    assert!(harness.windows.lock().unwrap().is_empty());
    assert_eq!(harness.speaker.spoken(), vec![GREETING, FAREWELL]);
}

#[test]
fn open_of_unknown_site_falls_back_to_the_model() {
    let mut harness = command("open the pod bay doors?").build();
    drive(&mut harness);

    assert!(harness.launcher.opened().is_empty());
    assert_eq!(harness.completion.prompts(), vec!["open the pod bay doors?"]);
    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, QUESTION_ACK, "model answer"]
    );
}

#[test]
fn open_of_unknown_site_statement_is_interpreted() {
    let mut harness = command("open sesame").build();
    drive(&mut harness);

    assert!(harness.launcher.opened().is_empty());
    assert_eq!(
        harness.completion.prompts(),
        vec![interpretation_prompt("open sesame")]
    );
}

#[test]
fn open_of_aliased_site_is_handled() {
    let mut harness = command("open stack overflow").build();
    drive(&mut harness);

    assert_eq!(harness.launcher.opened(), vec!["https://stackoverflow.com"]);
    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, "Opening stack overflow"]
    );
    assert!(harness.completion.prompts().is_empty());
}

#[test]
fn blank_model_answer_is_apologised_for() {
    let mut harness = command("who wrote dune")
        .completion(StubCompletion::replying(Ok("   ")))
        .build();
    drive(&mut harness);

    assert_eq!(
        harness.speaker.spoken(),
        vec![COMMAND_PROMPT, QUESTION_ACK, COMPLETION_APOLOGY]
    );
}
