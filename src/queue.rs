//! # Command queue
//! Hands requests from producer tasks (network handler, board glue) to the polling loop.
//!
//! The polling loop never waits on the queue: it drains whatever is pending at the start of a tick and
//! carries on with "no event" if nothing is.
use crate::command::Request;
use crate::error::Error;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Default capacity of the command queue
pub const COMMAND_QUEUE_CAPACITY: usize = 8;

/// A bounded queue of pending requests
pub struct CommandQueue<const N: usize = COMMAND_QUEUE_CAPACITY> {
    /// The underlying channel, safe to share across executors
    channel: Channel<CriticalSectionRawMutex, Request, N>,
}

impl<const N: usize> CommandQueue<N> {
    /// Create a new, empty `CommandQueue`. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue a request, waiting for room if the queue is full
    pub async fn submit(&self, request: Request) {
        self.channel.send(request).await;
    }

    /// Queue a request without waiting
    pub fn try_submit(&self, request: Request) -> Result<(), Error> {
        self.channel.try_send(request).map_err(|_| {
            warn!("command queue full, dropping {:?}", request.command);
            Error::QueueFull
        })
    }

    /// Take the oldest pending request, if any
    pub fn try_next(&self) -> Option<Request> {
        self.channel.try_receive().ok()
    }

    /// Take every request pending right now
    pub fn drain(&self) -> impl Iterator<Item = Request> + '_ {
        core::iter::from_fn(move || self.try_next())
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// Whether no request is pending
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
