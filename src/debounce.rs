use std::cell::RefCell;
use std::rc::Rc;

use crate::scheduler::Scheduler;

/// Collapses bursts of triggers into one trailing call.
///
/// Every `trigger` drops the previously scheduled timeout (cancelling it) and schedules
/// a fresh one, so `action` only runs once `wait_ms` pass without another trigger, and
/// it sees the arguments of the last trigger.
pub struct Debouncer<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    action: Rc<dyn Fn(A)>,
    pending: Rc<RefCell<Option<S::Timeout>>>,
}

impl<S: Scheduler, A> Clone for Debouncer<S, A> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            wait_ms: self.wait_ms,
            action: self.action.clone(),
            pending: self.pending.clone(),
        }
    }
}

pub fn debounce<S, A, F>(scheduler: S, wait_ms: u32, action: F) -> Debouncer<S, A>
where
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debouncer {
        scheduler,
        wait_ms,
        action: Rc::new(action),
        pending: Rc::new(RefCell::new(None)),
    }
}

impl<S: Scheduler, A: 'static> Debouncer<S, A> {
    pub fn trigger(&self, args: A) {
        let action = self.action.clone();
        let handle = self.scheduler.timeout(self.wait_ms, move || action(args));
        // Replacing the stored handle drops, and so cancels, the previous one.
        let previous = self.pending.borrow_mut().replace(handle);
        drop(previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;

    fn recorder() -> (Rc<RefCell<Vec<(u64, u32)>>>, ManualScheduler) {
        (Rc::new(RefCell::new(Vec::new())), ManualScheduler::new())
    }

    #[test]
    fn burst_collapses_into_one_call_with_last_args() {
        let (calls, scheduler) = recorder();
        let debounced = {
            let calls = calls.clone();
            let clock = scheduler.clone();
            debounce(scheduler.clone(), 100, move |n: u32| {
                calls.borrow_mut().push((clock.now(), n))
            })
        };

        for n in 1..=5 {
            debounced.trigger(n);
            scheduler.advance(20);
        }
        // Last trigger happened at t=80.
        scheduler.advance(79);
        assert!(calls.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*calls.borrow(), vec![(180, 5)]);

        scheduler.advance(1_000);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn separate_quiet_windows_each_fire() {
        let (calls, scheduler) = recorder();
        let debounced = {
            let calls = calls.clone();
            let clock = scheduler.clone();
            debounce(scheduler.clone(), 10, move |n: u32| {
                calls.borrow_mut().push((clock.now(), n))
            })
        };

        debounced.trigger(1);
        scheduler.advance(10);
        debounced.trigger(2);
        debounced.trigger(3);
        scheduler.advance(50);

        assert_eq!(*calls.borrow(), vec![(10, 1), (20, 3)]);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn clones_share_the_pending_slot() {
        let (calls, scheduler) = recorder();
        let first = {
            let calls = calls.clone();
            debounce(scheduler.clone(), 10, move |n: u32| calls.borrow_mut().push((0, n)))
        };
        let second = first.clone();

        first.trigger(1);
        second.trigger(2);
        scheduler.advance(10);

        assert_eq!(*calls.borrow(), vec![(0, 2)]);
    }
}
