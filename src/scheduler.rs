use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Where timers and animation frames come from.
///
/// Everything on the page that waits goes through this trait so the waiting can be
/// driven by hand in tests. A `Timeout` handle cancels its callback when dropped.
pub trait Scheduler: Clone + 'static {
    type Timeout: 'static;

    fn timeout<F>(&self, millis: u32, callback: F) -> Self::Timeout
    where
        F: FnOnce() + 'static;

    /// Like `timeout`, but the callback can no longer be cancelled.
    fn detached<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static;

    fn animation_frame<F>(&self, callback: F)
    where
        F: FnOnce() + 'static;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Timeout = Timeout;

    fn timeout<F>(&self, millis: u32, callback: F) -> Timeout
    where
        F: FnOnce() + 'static,
    {
        Timeout::new(millis, callback)
    }

    fn detached<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        Timeout::new(millis, callback).forget();
    }

    fn animation_frame<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let Some(window) = web_sys::window() else {
            warn!("No window, dropping animation frame");
            return;
        };
        let callback = Closure::once_into_js(callback);
        if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
            warn!("requestAnimationFrame failed: {:?}", err);
        }
    }
}

#[cfg(test)]
pub mod manual {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Pending {
        due: u64,
        seq: u64,
        live: Rc<Cell<bool>>,
        callback: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Queue {
        now: u64,
        seq: u64,
        timers: Vec<Pending>,
        frames: Vec<Box<dyn FnOnce()>>,
    }

    /// Virtual clock. Nothing runs until the test calls `advance` or `run_frame`.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        queue: Rc<RefCell<Queue>>,
    }

    pub struct ManualTimeout {
        live: Rc<Cell<bool>>,
    }

    impl Drop for ManualTimeout {
        fn drop(&mut self) {
            self.live.set(false);
        }
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.queue.borrow().now
        }

        pub fn pending_timers(&self) -> usize {
            self.queue.borrow().timers.iter().filter(|p| p.live.get()).count()
        }

        pub fn pending_frames(&self) -> usize {
            self.queue.borrow().frames.len()
        }

        /// Moves the clock forward, firing due timers in deadline order.
        pub fn advance(&self, millis: u64) {
            let target = self.queue.borrow().now + millis;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    queue.timers.retain(|p| p.live.get());
                    let index = queue
                        .timers
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by_key(|(_, p)| (p.due, p.seq))
                        .map(|(i, _)| i);
                    index.map(|i| {
                        let pending = queue.timers.remove(i);
                        queue.now = pending.due;
                        pending.callback
                    })
                };
                match next {
                    Some(callback) => callback(),
                    None => break,
                }
            }
            self.queue.borrow_mut().now = target;
        }

        /// Runs every frame callback queued so far. Returns how many ran.
        pub fn run_frame(&self) -> usize {
            let frames = std::mem::take(&mut self.queue.borrow_mut().frames);
            let count = frames.len();
            for frame in frames {
                frame();
            }
            count
        }

        fn push(&self, millis: u32, live: Rc<Cell<bool>>, callback: Box<dyn FnOnce()>) {
            let mut queue = self.queue.borrow_mut();
            queue.seq += 1;
            let pending = Pending {
                due: queue.now + u64::from(millis),
                seq: queue.seq,
                live,
                callback,
            };
            queue.timers.push(pending);
        }
    }

    impl Scheduler for ManualScheduler {
        type Timeout = ManualTimeout;

        fn timeout<F>(&self, millis: u32, callback: F) -> ManualTimeout
        where
            F: FnOnce() + 'static,
        {
            let live = Rc::new(Cell::new(true));
            self.push(millis, live.clone(), Box::new(callback));
            ManualTimeout { live }
        }

        fn detached<F>(&self, millis: u32, callback: F)
        where
            F: FnOnce() + 'static,
        {
            self.push(millis, Rc::new(Cell::new(true)), Box::new(callback));
        }

        fn animation_frame<F>(&self, callback: F)
        where
            F: FnOnce() + 'static,
        {
            self.queue.borrow_mut().frames.push(Box::new(callback));
        }
    }

    mod tests {
        use super::*;

        #[test]
        fn timers_fire_in_deadline_order() {
            let scheduler = ManualScheduler::new();
            let log = Rc::new(RefCell::new(Vec::new()));
            for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
                let log = log.clone();
                scheduler.detached(delay, move || log.borrow_mut().push(tag));
            }
            scheduler.advance(15);
            assert_eq!(*log.borrow(), vec!["a"]);
            scheduler.advance(100);
            assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
            assert_eq!(scheduler.now(), 115);
        }

        #[test]
        fn dropping_timeout_cancels_it() {
            let scheduler = ManualScheduler::new();
            let fired = Rc::new(Cell::new(false));
            let handle = {
                let fired = fired.clone();
                scheduler.timeout(5, move || fired.set(true))
            };
            drop(handle);
            scheduler.advance(10);
            assert!(!fired.get());
            assert_eq!(scheduler.pending_timers(), 0);
        }

        #[test]
        fn frames_queued_during_a_frame_wait_for_the_next() {
            let scheduler = ManualScheduler::new();
            let count = Rc::new(Cell::new(0));
            {
                let count = count.clone();
                let inner = scheduler.clone();
                scheduler.animation_frame(move || {
                    count.set(count.get() + 1);
                    let count = count.clone();
                    inner.animation_frame(move || count.set(count.get() + 1));
                });
            }
            assert_eq!(scheduler.run_frame(), 1);
            assert_eq!(count.get(), 1);
            assert_eq!(scheduler.run_frame(), 1);
            assert_eq!(count.get(), 2);
            assert_eq!(scheduler.run_frame(), 0);
        }
    }
}
