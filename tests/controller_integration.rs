// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the loop controller driven through its public API.
//!
//! A recording player stands in for the embedded player so every command the
//! controller issues can be checked.

use tube_looper::application::port::{
    PlayerAdapter, PlayerEvent, SearchError, SearchItem, Snippet, UrlState, VideoSession,
};
use tube_looper::controller::{
    AdvanceOutcome, ControllerOptions, HostRequest, LoopController, PlaybackNotice, QueryBounds,
    SkipReason, TickOutcome,
};
use tube_looper::domain::video::{PlayerState, RelatedVideo, Thumb, VideoId};
use tube_looper::infrastructure::MemoryUrl;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Cue(String),
    Seek(f64),
    Play,
    Pause,
}

#[derive(Debug, Default)]
struct RecordingPlayer {
    calls: Vec<Call>,
    time: Option<f64>,
    duration: f64,
}

impl PlayerAdapter for RecordingPlayer {
    fn cue_video(&mut self, id: &VideoId) {
        self.calls.push(Call::Cue(id.to_string()));
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        self.calls.push(Call::Seek(seconds));
        self.time = Some(seconds);
    }

    fn play_video(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause_video(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn current_time(&self) -> Option<f64> {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

fn id(raw: &str) -> VideoId {
    VideoId::new(raw).unwrap()
}

fn item(raw: &str) -> SearchItem {
    SearchItem {
        id: Some(raw.to_string()),
        snippet: Some(Snippet {
            title: Some(format!("Title of {raw}")),
            description: Some(format!("About {raw}")),
            thumbnail: None,
        }),
    }
}

fn session(duration_secs: u64, related: &[&str]) -> VideoSession {
    VideoSession {
        duration_secs,
        candidates: related.iter().map(|raw| item(raw)).collect(),
    }
}

fn apply_url(ctrl: &mut LoopController<RecordingPlayer>, url: &mut MemoryUrl) {
    for request in ctrl.take_requests() {
        if let HostRequest::ReplaceQuery(query) = request {
            url.replace_query(query);
        }
    }
}

fn set_time(ctrl: &mut LoopController<RecordingPlayer>, time: f64) {
    ctrl.player_mut().unwrap().time = Some(time);
}

fn take_calls(ctrl: &mut LoopController<RecordingPlayer>) -> Vec<Call> {
    std::mem::take(&mut ctrl.player_mut().unwrap().calls)
}

/// Controller bootstrapped from `query`, attached to a 100 s player, with the
/// fetch for the initial video already answered.
fn bootstrapped(
    options: ControllerOptions,
    query: &str,
    related: &[&str],
) -> (LoopController<RecordingPlayer>, MemoryUrl) {
    let mut url = MemoryUrl::new(query);
    let mut ctrl = LoopController::with_seed(options, 11);
    let ticket = ctrl.load_from_url(&url).unwrap();
    ctrl.handle_event(PlayerEvent::Ready(RecordingPlayer {
        duration: 100.0,
        ..RecordingPlayer::default()
    }));
    assert!(ctrl.complete_fetch(&ticket, Ok(session(100, related))));
    apply_url(&mut ctrl, &mut url);
    ctrl.handle_event(PlayerEvent::StateChange(PlayerState::VideoCued.code()));
    ctrl.handle_event(PlayerEvent::StateChange(PlayerState::Playing.code()));
    (ctrl, url)
}

#[test]
fn window_from_url_loops_with_repeat() {
    let (mut ctrl, url) = bootstrapped(ControllerOptions::default(), "v=abc&s=10&e=20", &["r1"]);
    assert_eq!(url.query(), "v=abc&s=10&e=20");
    assert_eq!(
        take_calls(&mut ctrl),
        vec![Call::Cue("abc".into()), Call::Seek(10.0), Call::Play]
    );

    set_time(&mut ctrl, 15.0);
    assert_eq!(ctrl.tick(), TickOutcome::Continued);

    set_time(&mut ctrl, 18.6);
    assert_eq!(
        ctrl.tick(),
        TickOutcome::Advanced(AdvanceOutcome::Repeated { start: 10.0 })
    );
    assert_eq!(take_calls(&mut ctrl), vec![Call::Seek(10.0), Call::Play]);
    assert_eq!(ctrl.active_video(), Some(&id("abc")));
}

#[test]
fn position_before_window_is_pulled_forward() {
    let (mut ctrl, _url) = bootstrapped(ControllerOptions::default(), "v=abc&s=10&e=20", &[]);
    take_calls(&mut ctrl);

    set_time(&mut ctrl, 5.0);
    assert_eq!(ctrl.tick(), TickOutcome::SoughtTo(10.0));
    assert_eq!(take_calls(&mut ctrl), vec![Call::Seek(10.0)]);
}

#[test]
fn buffering_player_is_left_alone() {
    let (mut ctrl, _url) = bootstrapped(ControllerOptions::default(), "v=abc&s=10&e=20", &[]);
    take_calls(&mut ctrl);

    ctrl.handle_event(PlayerEvent::StateChange(PlayerState::Buffering.code()));
    set_time(&mut ctrl, 19.9);
    assert_eq!(ctrl.tick(), TickOutcome::Skipped(SkipReason::Buffering));
    assert!(take_calls(&mut ctrl).is_empty());
}

#[test]
fn sequential_advance_switches_video_and_starts_new_session() {
    let options = ControllerOptions {
        repeat: false,
        ..ControllerOptions::default()
    };
    let (mut ctrl, mut url) = bootstrapped(options, "v=abc&s=10&e=20", &["r1", "r2"]);
    take_calls(&mut ctrl);

    set_time(&mut ctrl, 19.0);
    assert_eq!(
        ctrl.tick(),
        TickOutcome::Advanced(AdvanceOutcome::ChangedVideo {
            id: id("r1"),
            shuffled: false
        })
    );
    assert_eq!(take_calls(&mut ctrl), vec![Call::Cue("r1".into())]);

    let requests = ctrl.take_requests();
    let ticket = requests
        .iter()
        .find_map(|request| match request {
            HostRequest::FetchRelated(ticket) => Some(ticket.clone()),
            _ => None,
        })
        .expect("new session requested");
    assert_eq!(ticket.id(), &id("r1"));
    assert!(ctrl.related().is_empty());

    assert!(ctrl.complete_fetch(&ticket, Ok(session(240, &["r9"]))));
    apply_url(&mut ctrl, &mut url);
    assert_eq!(url.query(), "v=r1&s=0&e=240");
    assert_eq!(ctrl.related()[0].id(), &id("r9"));
}

#[test]
fn ended_state_advances_even_inside_window() {
    let options = ControllerOptions {
        repeat: false,
        ..ControllerOptions::default()
    };
    let (mut ctrl, _url) = bootstrapped(options, "v=abc", &["next"]);
    ctrl.handle_event(PlayerEvent::StateChange(PlayerState::Ended.code()));
    set_time(&mut ctrl, 50.0);
    assert!(matches!(
        ctrl.tick(),
        TickOutcome::Advanced(AdvanceOutcome::ChangedVideo { .. })
    ));
}

#[test]
fn automatic_advance_ignores_user_queue() {
    let options = ControllerOptions {
        repeat: false,
        ..ControllerOptions::default()
    };
    let (mut ctrl, _url) = bootstrapped(options, "v=abc&s=10&e=20", &["related"]);
    ctrl.queue_add(RelatedVideo::new(id("queued"), "Queued", "Picked by hand", None));

    set_time(&mut ctrl, 19.0);
    ctrl.tick();

    assert_eq!(ctrl.active_video(), Some(&id("related")));
    assert!(ctrl.queue().contains(&id("queued")));
}

#[test]
fn queued_entry_plays_on_demand_and_is_consumed() {
    let (mut ctrl, _url) = bootstrapped(ControllerOptions::default(), "v=abc", &["r1", "r2"]);
    assert!(ctrl.queue_add_related(&id("r2")));
    assert!(ctrl.queue_add_related(&id("r1")));
    let order: Vec<_> = ctrl.queue().iter().map(|e| e.id().to_string()).collect();
    assert_eq!(order, ["r1", "r2"]);

    ctrl.play_queued(&id("r2")).unwrap();
    assert_eq!(ctrl.active_video(), Some(&id("r2")));
    assert_eq!(ctrl.queue().len(), 1);

    ctrl.queue_clear();
    assert!(ctrl.queue().is_empty());
}

#[test]
fn stale_fetch_is_discarded_after_quick_switch() {
    let mut ctrl: LoopController<RecordingPlayer> =
        LoopController::new(ControllerOptions::default());
    let first = ctrl.load_video(id("first"), QueryBounds::default()).unwrap();
    let second = ctrl.load_video(id("second"), QueryBounds::default()).unwrap();

    assert!(ctrl.complete_fetch(&second, Err(SearchError::Status(403))));
    assert!(!ctrl.complete_fetch(&first, Ok(session(100, &["late"]))));
    assert!(ctrl.related().is_empty());
    assert_eq!(ctrl.active_video(), Some(&id("second")));
}

#[test]
fn dragging_thumbs_keeps_min_distance_and_updates_url() {
    let (mut ctrl, mut url) = bootstrapped(ControllerOptions::default(), "v=abc&s=10&e=40", &[]);

    ctrl.move_thumb(Thumb::Start, 35.0);
    apply_url(&mut ctrl, &mut url);
    assert_eq!(url.query(), "v=abc&s=30&e=40");

    ctrl.move_thumb(Thumb::End, 500.0);
    apply_url(&mut ctrl, &mut url);
    assert_eq!(url.query(), "v=abc&s=30&e=100");
}

#[test]
fn blocked_embed_is_reported() {
    let (mut ctrl, _url) = bootstrapped(ControllerOptions::default(), "v=abc", &["r1"]);
    ctrl.handle_event(PlayerEvent::Error(150));
    let notices: Vec<_> = ctrl
        .take_requests()
        .into_iter()
        .filter_map(|request| match request {
            HostRequest::Notice(notice) => Some(notice),
            _ => None,
        })
        .collect();
    assert!(matches!(
        notices.as_slice(),
        [PlaybackNotice::EmbedBlocked { .. }]
    ));
    assert_eq!(ctrl.active_video(), Some(&id("abc")));
}

#[test]
fn next_and_previous_walk_history() {
    let (mut ctrl, _url) = bootstrapped(ControllerOptions::default(), "v=abc", &["r1"]);
    assert_eq!(
        ctrl.skip_next(),
        AdvanceOutcome::ChangedVideo {
            id: id("r1"),
            shuffled: false
        }
    );
    assert_eq!(ctrl.skip_previous(), Some(id("abc")));
    assert_eq!(ctrl.active_video(), Some(&id("abc")));
}
