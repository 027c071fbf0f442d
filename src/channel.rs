//! Bounded queue between control writers and the render loop.
//!
//! Writers may live in UI, network or interrupt context; the renderer drains
//! the queue once per tick. Access is serialized with `critical-section`, the
//! storage is a fixed `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// The queue was full, the rejected value is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Nothing was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Fixed-capacity FIFO shared by any number of senders.
///
/// Usually placed in a `static` so handles can be `'static`.
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for a control writer
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Handle for the render loop
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut Deque<T, SIZE>) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.queue.borrow(cs).borrow_mut()))
    }

    /// Append a value, or return it when the queue is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.with_queue(|queue| queue.push_back(value).map_err(TrySendError))
    }

    /// Take the oldest value.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.with_queue(|queue| queue.pop_front().ok_or(TryReceiveError))
    }

    /// Drop every queued value in one critical section.
    pub fn clear(&self) {
        self.with_queue(Deque::clear);
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Write side of a [`Channel`], cheap to copy.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Read side of a [`Channel`], owned by the renderer.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Discard everything still queued.
    pub fn clear(&self) {
        self.channel.clear();
    }
}
