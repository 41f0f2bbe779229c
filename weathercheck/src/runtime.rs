//! Event/action/render loop
//!
//! Terminal input becomes actions through `map_event`; actions run through the
//! store; declared effects go to the [`EffectHandler`], whose tasks feed
//! result actions back into the same channel. The screen is redrawn only when
//! a dispatch reports a change or an event asks for it.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use weathercheck_core::state::LOADING_ANIM_TICK_MS;
use weathercheck_core::{Action, AppState, EffectHandler, Middleware, Store, TaskManager};

use crate::event::{spawn_event_poller, EventKind, PollerConfig};

/// Actions produced by one input event, plus a render hint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventOutcome {
    pub actions: Vec<Action>,
    pub needs_render: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn action(action: Action) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn from_actions(iter: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

pub struct Runtime<M: Middleware> {
    store: Store<M>,
    handler: EffectHandler,
    tasks: TaskManager,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller_config: PollerConfig,
    tick_interval: Duration,
    should_render: bool,
}

impl<M: Middleware> Runtime<M> {
    pub fn new(store: Store<M>, handler: EffectHandler) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            handler,
            tasks: TaskManager::new(action_tx.clone()),
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            tick_interval: Duration::from_millis(LOADING_ANIM_TICK_MS),
            should_render: true,
        }
    }

    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Queue an action for the next loop iteration.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Whether the next loop iteration will redraw
    pub fn needs_render(&self) -> bool {
        self.should_render
    }

    /// Run one action through the store and start its effects.
    ///
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            tracing::debug!(?effect, "handling effect");
            self.handler.handle(effect, &mut self.tasks);
        }
        self.should_render |= result.changed;
        result.changed
    }

    /// Queue the actions of a mapped event.
    pub fn apply_outcome(&mut self, outcome: EventOutcome) {
        if outcome.needs_render {
            self.should_render = true;
        }
        for action in outcome.actions {
            self.enqueue(action);
        }
    }

    /// Drive the loop until a [`Action::Quit`] is received.
    pub async fn run<B, FRender, FEvent>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> EventOutcome,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<EventKind>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, self.poller_config, cancel_token.clone());

        let mut tick = tokio::time::interval(self.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let result = loop {
            if self.should_render {
                let state = self.store.state();
                if let Err(err) = terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                }) {
                    break Err(err);
                }
                self.should_render = false;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => {
                    let outcome = map_event(&event, self.store.state());
                    self.apply_outcome(outcome);
                }

                Some(action) = self.action_rx.recv() => {
                    if matches!(action, Action::Quit) {
                        tracing::info!("quit requested");
                        break Ok(());
                    }
                    self.dispatch(action);
                }

                _ = tick.tick() => {
                    self.dispatch(Action::Tick);
                }
            }
        };

        cancel_token.cancel();
        self.tasks.cancel_all();
        result
    }
}
