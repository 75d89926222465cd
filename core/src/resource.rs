//! Shared view-state machine for remotely fetched data.
//!
//! # Design
//! Every screen used to carry its own copy of the {loading, error, data}
//! triple; `RemoteResource` implements it once. States:
//!
//! `Idle → Loading → { Loaded(T) | Failed(String) }`
//!
//! plus `Refreshing(T)`, a loading-equivalent sub-state that keeps the
//! currently displayed data visible until the new outcome lands. There is no
//! terminal state; the resource stays reactive for the screen's lifetime.
//!
//! Each `begin`/`begin_refresh` issues a fresh generation number and
//! `complete` drops any result carrying a stale one, so a slow in-flight
//! response can never overwrite the state of a newer request.

use crate::error::ApiError;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// The {loading, error, data} triple driving a screen's rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    /// No fetch has been started yet.
    Idle,
    /// A fetch is in flight and nothing is displayable.
    Loading,
    /// A refresh is in flight; the previous data stays visible meanwhile.
    Refreshing(T),
    Loaded(T),
    Failed(String),
}

/// One remotely fetched value and the request generation that produced it.
#[derive(Debug)]
pub struct RemoteResource<T> {
    state: ResourceState<T>,
    generation: u64,
}

impl<T> RemoteResource<T> {
    pub fn new() -> Self {
        Self {
            state: ResourceState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    /// Enter `Loading`, discarding any displayed data. Returns the generation
    /// to hand back to `complete`.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = ResourceState::Loading;
        self.generation
    }

    /// Enter the refresh sub-state: loaded data stays visible until the new
    /// outcome arrives. Without loaded data this is the same as `begin`.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.state = match std::mem::replace(&mut self.state, ResourceState::Loading) {
            ResourceState::Loaded(data) | ResourceState::Refreshing(data) => {
                ResourceState::Refreshing(data)
            }
            _ => ResourceState::Loading,
        };
        self.generation
    }

    /// Apply a fetch outcome. Returns false (and changes nothing) when
    /// `generation` is not the most recently issued one.
    ///
    /// A failure overwrites whatever was displayed, refresh included: the
    /// screen shows the error message, not stale rows.
    pub fn complete(&mut self, generation: u64, outcome: Result<T, ApiError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match outcome {
            Ok(data) => ResourceState::Loaded(data),
            Err(err) => {
                let message = err.to_string();
                ResourceState::Failed(if message.is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                })
            }
        };
        true
    }

    /// The displayable data, if any (loaded or mid-refresh).
    pub fn data(&self) -> Option<&T> {
        match &self.state {
            ResourceState::Loaded(data) | ResourceState::Refreshing(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ResourceState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// True while nothing is displayable because a fetch is pending.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResourceState::Idle | ResourceState::Loading)
    }
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self::new()
    }
}
