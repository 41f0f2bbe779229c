//! Effects - side effects declared by the reducer
//!
//! The reducer never performs I/O. It returns a [`DispatchResult`] listing the
//! work to do, and the [`EffectHandler`](crate::handler::EffectHandler) turns
//! each effect into a keyed async task.

use crate::state::Coordinates;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the locator for the current position
    Locate,
    /// Fetch the hourly forecast for the given generation
    FetchForecast {
        generation: u64,
        coordinates: Coordinates,
    },
    /// Reverse-geocode the position for the given generation
    FetchPlace {
        generation: u64,
        coordinates: Coordinates,
    },
}

/// Result of dispatching an action: change flag plus declared effects.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Render hint only when `changed` is true.
    #[inline]
    pub fn changed_if(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}
