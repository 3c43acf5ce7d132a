//! Screen-level fetch state and notices.

use crate::errors::ClientError;

/// State of one data fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(ClientError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => LoadState::Ready(data),
            Err(e) => LoadState::Failed(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Ready(data) => LoadState::Ready(f(data)),
            LoadState::Failed(e) => LoadState::Failed(e),
        }
    }
}

/// Handle identifying one fetch started through [`Loadable::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A [`LoadState`] that ignores results of superseded fetches.
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Mark a new fetch as in flight. Earlier tickets become stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.generation)
    }

    /// Store the result of a fetch. Returns `false` if the ticket is stale.
    pub fn settle(&mut self, ticket: FetchTicket, result: Result<T, ClientError>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.generation,
                "Discarding stale response"
            );
            return false;
        }
        self.state = LoadState::from_result(result);
        true
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient notification shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        Notice::error(err.user_message())
    }
}
