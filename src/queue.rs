//! The UI-thread task queue: an MPSC queue of boxed closures with a
//! backend-specific wakeup primitive. Any thread may enqueue; only the UI
//! thread dequeues, once per loop iteration, before the render step of the
//! next iteration.
//!
//! Grounded on `event_loop/mod.rs`'s `calloop::channel` plumbing
//! (`user_events_sender` / `pending_user_events`), generalized behind a
//! `Waker` trait so each backend can plug in its own primitive:
//! `PostMessage` on Win32, a custom `NSEvent` on macOS, `SDL_PushEvent` on
//! SDL2, an `ALooper`-integrated queue on Android, an `eventfd`/pipe on
//! X11/Wayland.

use std::sync::mpsc;
use std::sync::Arc;

/// A closure posted to the UI thread.
pub type Task = Box<dyn FnOnce() + Send>;

/// Wakes the blocked event loop when a task is enqueued from another thread.
/// Each backend supplies its own implementation around its native wakeup
/// primitive (eventfd, `PostMessage`, a custom `NSEvent`, `ALooper` fd, or an
/// `SDL_PushEvent` of a registered user-event type).
pub trait Waker: Send + Sync {
    fn wake(&self);
}

/// A no-op waker for backends under test, or for a loop that polls instead
/// of blocking.
pub struct NullWaker;

impl Waker for NullWaker {
    fn wake(&self) {}
}

/// The sending half, cheaply cloneable, safe to hand to any thread.
#[derive(Clone)]
pub struct UiThreadSender {
    sender: mpsc::Sender<Task>,
    waker: Arc<dyn Waker>,
}

impl UiThreadSender {
    /// Boxes `f` and enqueues it, then wakes the event loop. The closure is
    /// freed by the receiver after invocation.
    pub fn post(&self, f: impl FnOnce() + Send + 'static) {
        // A disconnected receiver means the application has already torn
        // down; dropping the task silently matches "in-flight work
        // completes normally, no further ticks occur" on shutdown.
        let _ = self.sender.send(Box::new(f));
        self.waker.wake();
    }
}

/// The UI-thread-owned receiving half. Drained once per loop iteration.
pub struct UiThreadQueue {
    receiver: mpsc::Receiver<Task>,
    sender: mpsc::Sender<Task>,
    waker: Arc<dyn Waker>,
}

impl UiThreadQueue {
    pub fn new(waker: Arc<dyn Waker>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            receiver,
            sender,
            waker,
        }
    }

    /// Returns a sender that can be handed to any thread, including the UI
    /// thread itself.
    pub fn sender(&self) -> UiThreadSender {
        UiThreadSender {
            sender: self.sender.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Drains every currently-queued task, in FIFO order, invoking each on
    /// the calling (UI) thread. Tasks enqueued by a task running during this
    /// drain are drained too, since `try_recv` keeps observing the same
    /// channel until it is empty.
    pub fn drain(&self) {
        while let Ok(task) = self.receiver.try_recv() {
            task();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc as StdArc;

    #[test]
    fn drains_in_fifo_order() {
        let queue = UiThreadQueue::new(StdArc::new(NullWaker));
        let order = StdArc::new(std::sync::Mutex::new(Vec::new()));
        let sender = queue.sender();

        for i in 0..5 {
            let order = order.clone();
            sender.post(move || order.lock().unwrap().push(i));
        }

        queue.drain();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cross_thread_post_is_visible_to_ui_thread() {
        let queue = UiThreadQueue::new(StdArc::new(NullWaker));
        let sender = queue.sender();
        let counter = StdArc::new(AtomicUsize::new(0));

        let handle = {
            let counter = counter.clone();
            std::thread::spawn(move || {
                sender.post(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            })
        };
        handle.join().unwrap();

        queue.drain();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drain_with_no_tasks_is_a_no_op() {
        let queue = UiThreadQueue::new(StdArc::new(NullWaker));
        queue.drain();
    }
}
