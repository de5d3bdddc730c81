//! Frame-loop scheduling
//!
//! A recurring per-frame task scoped to an explicit handle. The handle owns
//! a cancellation token that is checked before every reschedule, and
//! `cancel()` also revokes any already-queued callback, so no update runs
//! after teardown. Single-threaded and cooperative: each invocation finishes
//! before the next one is scheduled.

use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag for a frame loop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop: no callback observes `false` from here on
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(target_arch = "wasm32")]
pub use raf::FrameLoop;

#[cfg(target_arch = "wasm32")]
mod raf {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use super::CancelToken;

    /// Handle to a running `requestAnimationFrame` loop
    ///
    /// Dropping the handle cancels the loop; call [`FrameLoop::forget`] to
    /// let it run for the rest of the page's lifetime.
    pub struct FrameLoop {
        token: CancelToken,
        pending: Rc<Cell<Option<i32>>>,
    }

    impl FrameLoop {
        /// Start a loop invoking `cb` once per display refresh
        pub fn start(mut cb: impl FnMut(f64) + 'static) -> Self {
            let token = CancelToken::new();
            let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

            let closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            let (token_inner, pending_inner, closure_inner) =
                (token.clone(), pending.clone(), closure.clone());

            *closure.borrow_mut() = Some(Closure::new(move |time: f64| {
                if token_inner.is_cancelled() {
                    return;
                }
                cb(time);
                // The callback may have cancelled us; check again before
                // rescheduling.
                if token_inner.is_cancelled() {
                    pending_inner.set(None);
                    return;
                }
                if let Some(ref cl) = *closure_inner.borrow() {
                    pending_inner.set(schedule(cl));
                }
            }));

            // The Rc cycle (the closure captures a handle to its own slot)
            // keeps the callback alive for the lifetime of the loop.
            if let Some(ref cl) = *closure.borrow() {
                pending.set(schedule(cl));
            }

            Self { token, pending }
        }

        /// Token shared with the running loop
        pub fn token(&self) -> CancelToken {
            self.token.clone()
        }

        /// Stop the loop and revoke any queued frame
        pub fn cancel(&self) {
            self.token.cancel();
            if let Some(id) = self.pending.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }

        /// Leak the handle; the loop runs until the page goes away
        pub fn forget(self) {
            std::mem::forget(self);
        }
    }

    impl Drop for FrameLoop {
        fn drop(&mut self) {
            self.cancel();
        }
    }

    fn schedule(closure: &Closure<dyn FnMut(f64)>) -> Option<i32> {
        web_sys::window()?
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::CancelToken;

    /// Minimal stand-in for the browser's frame queue: one queued callback
    /// runs per pumped frame and may re-queue itself.
    #[derive(Default)]
    struct FrameQueue {
        pending: VecDeque<Box<dyn FnOnce(&mut FrameQueue)>>,
    }

    impl FrameQueue {
        fn schedule(&mut self, f: impl FnOnce(&mut Self) + 'static) {
            self.pending.push_back(Box::new(f));
        }

        fn pump(&mut self, frames: usize) {
            for _ in 0..frames {
                let Some(f) = self.pending.pop_front() else {
                    break;
                };
                f(self);
            }
        }
    }

    fn schedule_counting(queue: &mut FrameQueue, token: CancelToken, count: Rc<Cell<u32>>) {
        queue.schedule(move |q| {
            if token.is_cancelled() {
                return;
            }
            count.set(count.get() + 1);
            if !token.is_cancelled() {
                schedule_counting(q, token, count);
            }
        });
    }

    #[test]
    fn test_loop_runs_once_per_frame() {
        let mut queue = FrameQueue::default();
        let token = CancelToken::new();
        let count = Rc::new(Cell::new(0u32));

        schedule_counting(&mut queue, token, count.clone());
        queue.pump(7);
        assert_eq!(count.get(), 7);
    }

    #[test]
    fn test_no_steps_after_cancel() {
        let mut queue = FrameQueue::default();
        let token = CancelToken::new();
        let count = Rc::new(Cell::new(0u32));

        schedule_counting(&mut queue, token.clone(), count.clone());
        queue.pump(5);
        assert_eq!(count.get(), 5);

        token.cancel();
        queue.pump(10);
        assert_eq!(count.get(), 5, "counter advanced after cancellation");
    }

    #[test]
    fn test_cancel_revokes_queued_frame() {
        // Cancel lands between schedule and dispatch; the queued callback
        // must be a no-op.
        let mut queue = FrameQueue::default();
        let token = CancelToken::new();
        let count = Rc::new(Cell::new(0u32));

        schedule_counting(&mut queue, token.clone(), count.clone());
        token.cancel();
        queue.pump(3);
        assert_eq!(count.get(), 0);
    }
}
