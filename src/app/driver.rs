// SPDX-License-Identifier: MPL-2.0
//! Event loop around a [`LoopController`].
//!
//! The driver owns the controller and multiplexes four inputs on one task:
//! the time-check interval, player events, user commands and finished
//! related-video fetches. Fetches run as spawned tasks; starting a new one
//! aborts the previous one, and the controller's tickets reject any result
//! that still slips through.
//!
//! The `save` command writes the current playback modes back to the
//! settings file the driver was given, or to the default location.

use super::message::Command;
use crate::application::port::{
    PlayerAdapter, PlayerEvent, RelatedVideoSource, SearchError, UrlState, VideoSession,
};
use crate::config::{self, Config, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_TICK_INTERVAL_MS};
use crate::controller::{FetchTicket, HostRequest, LoopController};
use crate::domain::video::{Thumb, VideoId};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type FetchDone = (FetchTicket, Result<VideoSession, SearchError>);

/// Timing knobs for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSettings {
    pub tick_interval: Duration,
    pub fetch_timeout: Duration,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl From<&Config> for DriverSettings {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            fetch_timeout: config.fetch_timeout(),
        }
    }
}

/// Runs a controller against a search source and a URL store.
pub struct Driver<P, S: ?Sized, U> {
    controller: LoopController<P>,
    source: Arc<S>,
    url: U,
    settings: DriverSettings,
    config: Config,
    config_path: Option<PathBuf>,
    in_flight: Option<JoinHandle<()>>,
}

impl<P, S, U> Driver<P, S, U>
where
    P: PlayerAdapter,
    S: RelatedVideoSource + ?Sized + 'static,
    U: UrlState,
{
    pub fn new(
        controller: LoopController<P>,
        source: Arc<S>,
        url: U,
        settings: DriverSettings,
    ) -> Self {
        Self {
            controller,
            source,
            url,
            settings,
            config: Config::default(),
            config_path: None,
            in_flight: None,
        }
    }

    /// Settings that `save` starts from, and the file it writes to.
    /// Without a path the default settings location is used.
    #[must_use]
    pub fn with_config(mut self, config: Config, path: Option<PathBuf>) -> Self {
        self.config = config;
        self.config_path = path;
        self
    }

    #[must_use]
    pub fn controller(&self) -> &LoopController<P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LoopController<P> {
        &mut self.controller
    }

    #[must_use]
    pub fn url(&self) -> &U {
        &self.url
    }

    /// Runs until a [`Command::Quit`] arrives or the command channel closes.
    pub async fn run(
        &mut self,
        events: &mut UnboundedReceiver<PlayerEvent<P>>,
        commands: &mut UnboundedReceiver<Command>,
    ) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchDone>();
        let mut ticker = tokio::time::interval(self.settings.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            self.flush_requests(&done_tx);

            tokio::select! {
                _ = ticker.tick() => {
                    let outcome = self.controller.tick();
                    tracing::trace!(?outcome, "Time check");
                }
                Some(event) = events.recv() => {
                    self.controller.handle_event(event);
                }
                Some((ticket, result)) = done_rx.recv() => {
                    self.controller.complete_fetch(&ticket, result);
                }
                command = commands.recv() => match command {
                    Some(Command::Quit) | None => break,
                    Some(command) => self.apply(command),
                },
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        tracing::debug!("Driver stopped");
    }

    fn flush_requests(&mut self, done_tx: &UnboundedSender<FetchDone>) {
        for request in self.controller.take_requests() {
            match request {
                HostRequest::FetchRelated(ticket) => self.spawn_fetch(ticket, done_tx.clone()),
                HostRequest::ReplaceQuery(query) => self.url.replace_query(query),
                HostRequest::ScrollToTop => tracing::debug!("Scroll to top"),
                HostRequest::Notice(notice) => tracing::warn!("{notice}"),
            }
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket, done: UnboundedSender<FetchDone>) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
            tracing::debug!("Aborted superseded related-video fetch");
        }

        let source = Arc::clone(&self.source);
        let timeout = self.settings.fetch_timeout;
        self.in_flight = Some(tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, source.fetch(ticket.id())).await {
                Ok(result) => result,
                Err(_) => Err(SearchError::Timeout),
            };
            // The receiver only closes when the driver stops.
            let _ = done.send((ticket, result));
        }));
    }

    fn apply(&mut self, command: Command) {
        let ctrl = &mut self.controller;
        match command {
            Command::TogglePlay => {
                let action = ctrl.toggle_play_pause();
                tracing::info!(?action, "Toggled playback");
            }
            Command::Next => {
                ctrl.skip_next();
            }
            Command::Previous => {
                if ctrl.skip_previous().is_none() {
                    tracing::info!("No previous video");
                }
            }
            Command::ToggleRepeat => {
                ctrl.toggle_repeat();
            }
            Command::ToggleShuffle => {
                ctrl.toggle_shuffle();
            }
            Command::SetStart(secs) => {
                ctrl.move_thumb(Thumb::Start, secs);
            }
            Command::SetEnd(secs) => {
                ctrl.move_thumb(Thumb::End, secs);
            }
            Command::Load(raw) => match VideoId::from_url_or_id(&raw) {
                Some(id) => {
                    ctrl.load_video(id, Default::default());
                }
                None => tracing::warn!(input = %raw, "Not a video id or URL"),
            },
            Command::Queue(raw) => {
                let queued = VideoId::new(&raw).is_some_and(|id| ctrl.queue_add_related(&id));
                if !queued {
                    tracing::warn!(input = %raw, "Not in the related list");
                }
            }
            Command::PlayQueued(raw) => match VideoId::new(&raw) {
                Some(id) if ctrl.active_video() == Some(&id) => {
                    tracing::info!(video = %id, "Already playing");
                }
                Some(id) => {
                    if ctrl.play_queued(&id).is_none() {
                        tracing::warn!(video = %id, "Not in the queue");
                    }
                }
                None => tracing::warn!(input = %raw, "Not a video id"),
            },
            Command::ClearQueue => ctrl.queue_clear(),
            Command::Status => self.log_status(),
            Command::SaveSettings => self.save_settings(),
            Command::Quit => {}
        }
    }

    fn save_settings(&mut self) {
        let ctrl = &self.controller;
        self.config.autoplay = Some(ctrl.autoplay());
        self.config.repeat = Some(ctrl.repeat());
        self.config.shuffle = Some(ctrl.shuffle());

        let result = match &self.config_path {
            Some(path) => config::save_to_path(&self.config, path),
            None => config::save(&self.config),
        };
        match result {
            Ok(()) => tracing::info!("Settings saved"),
            Err(err) => tracing::warn!("Failed to save settings: {err}"),
        }
    }

    fn log_status(&self) {
        let ctrl = &self.controller;
        let window = ctrl
            .window()
            .map(|window| {
                let [start, end] = window.marks();
                format!("{}-{}", start.label, end.label)
            })
            .unwrap_or_else(|| "whole video".to_string());
        let position = ctrl.player().and_then(|player| player.current_time());

        tracing::info!(
            video = ?ctrl.active_video().map(VideoId::as_str),
            state = ?ctrl.state(),
            %window,
            ?position,
            repeat = ctrl.repeat(),
            shuffle = ctrl.shuffle(),
            related = ctrl.related().len(),
            queued = ctrl.queue().len(),
            query = %self.url.query(),
            "Status"
        );
        for (index, entry) in ctrl.queue().iter().enumerate() {
            tracing::info!("  queue {}: {} [{}]", index + 1, entry.short_title(50), entry.id());
        }
    }
}
