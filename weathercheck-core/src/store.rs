//! Centralized state store
//!
//! The store owns the single [`AppState`] and routes every action through the
//! reducer, with optional middleware hooks around each dispatch.

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::state::AppState;

/// Reducer signature used by the store
pub type Reducer = fn(&mut AppState, Action) -> DispatchResult<Effect>;

/// Hooks called around every dispatch
pub trait Middleware {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &Action);

    /// Called after the reducer, with its change flag
    fn after(&mut self, action: &Action, state_changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn before(&mut self, _action: &Action) {}
    fn after(&mut self, _action: &Action, _state_changed: bool) {}
}

/// Logs every processed action through `tracing`
///
/// Ticks are skipped unless `include_ticks` is set; they arrive every 100ms.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    pub include_ticks: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Middleware for LoggingMiddleware {
    fn before(&mut self, action: &Action) {
        if matches!(action, Action::Tick) && !self.include_ticks {
            return;
        }
        tracing::trace!(action = %action.name(), "dispatching action");
    }

    fn after(&mut self, action: &Action, state_changed: bool) {
        if matches!(action, Action::Tick) && !self.include_ticks {
            return;
        }
        tracing::debug!(
            action = %action.summary(),
            category = action.category().unwrap_or("global"),
            async_result = action.is_async_result(),
            state_changed,
            "action processed"
        );
    }
}

/// State container for the view state controller
pub struct Store<M: Middleware = NoopMiddleware> {
    state: AppState,
    reducer: Reducer,
    middleware: M,
}

impl Store<NoopMiddleware> {
    pub fn new(state: AppState, reducer: Reducer) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<M: Middleware> Store<M> {
    pub fn with_middleware(state: AppState, reducer: Reducer, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and reducer.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}
