//! Core of the WeatherCheck terminal client
//!
//! A Redux/Elm style view state controller:
//!
//! 1. An [`Action`] is dispatched to the [`Store`]
//! 2. The [`reducer`] mutates [`AppState`] and returns declared [`Effect`]s
//! 3. The [`EffectHandler`] runs each effect as a keyed task on the [`TaskManager`]
//! 4. Tasks send result actions (`*Did*`) back through the action channel
//!
//! ```ignore
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(tx);
//! let handler = EffectHandler::from_config(&Config::default())?;
//! let mut store = Store::new(AppState::default(), reducer);
//!
//! let mut pending = vec![Action::LocateRequest];
//! while let Some(action) = pending.pop().or(rx.recv().await) {
//!     for effect in store.dispatch(action).effects {
//!         handler.handle(effect, &mut tasks);
//!     }
//! }
//! ```

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod error;
pub mod format;
pub mod handler;
pub mod locate;
pub mod reducer;
pub mod state;
pub mod store;
pub mod tasks;

pub use action::Action;
pub use config::{Config, ConfigOverrides, LocateMode};
pub use effect::{DispatchResult, Effect};
pub use error::{ConfigError, FetchError, LocationError};
pub use handler::EffectHandler;
pub use locate::{FixedLocator, IpLocator, Locator, NoLocator};
pub use reducer::reducer;
pub use state::{AppState, Coordinates, Place, Status, TempUnit};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Store};
pub use tasks::{TaskKey, TaskManager};
