//! View lifecycle: Idle -> Loading -> (Ready | Error), each step taken once.

use super::token::TrendingSnapshot;

/// Prefix of every user-facing fetch failure
pub const FETCH_ERROR_PREFIX: &str = "Error fetching data:";

#[derive(Debug, Clone)]
pub enum ViewState {
    Idle,
    Loading,
    Ready(TrendingSnapshot),
    Error(String),
}

impl ViewState {
    /// Idle -> Loading. Returns false from any other state.
    pub fn begin_loading(&mut self) -> bool {
        match self {
            ViewState::Idle => {
                *self = ViewState::Loading;
                true
            }
            _ => false,
        }
    }

    /// Loading -> Ready
    pub fn finish(&mut self, snapshot: TrendingSnapshot) -> bool {
        match self {
            ViewState::Loading => {
                *self = ViewState::Ready(snapshot);
                true
            }
            _ => false,
        }
    }

    /// Loading -> Error, message prefixed with `Error fetching data:`
    pub fn fail(&mut self, reason: impl std::fmt::Display) -> bool {
        match self {
            ViewState::Loading => {
                *self = ViewState::Error(format!("{} {}", FETCH_ERROR_PREFIX, reason));
                true
            }
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Ready(_) | ViewState::Error(_))
    }

    pub fn snapshot(&self) -> Option<&TrendingSnapshot> {
        match self {
            ViewState::Ready(s) => Some(s),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Error(_) => "error",
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Idle
    }
}
