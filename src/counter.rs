use std::rc::Rc;

use log::debug;

use crate::scheduler::Scheduler;

/// Whatever shows the counter's text. `.stats-number` elements on the page.
pub trait CounterDisplay {
    fn render(&self, text: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

/// Counts from 0 to a target in fixed 16ms ticks.
///
/// The tick length is assumed, not measured: a slow frame does not make the counter
/// catch up.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    value: f64,
    target: u64,
    increment: f64,
    suffix: String,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, suffix: impl Into<String>, duration_ms: u32, frame_ms: f64) -> Self {
        let steps = f64::from(duration_ms) / frame_ms;
        let increment = if steps > 0.0 {
            target as f64 / steps
        } else {
            target as f64
        };
        Self {
            value: 0.0,
            target,
            increment,
            suffix: suffix.into(),
            done: false,
        }
    }

    /// Reads "500+" as target 500 with suffix "+". Text with no digits has nothing to
    /// animate.
    pub fn from_text(text: &str, duration_ms: u32, frame_ms: f64) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let suffix: String = text.chars().filter(|c| !c.is_ascii_digit()).collect();
        let target = digits.parse::<u64>().ok()?;
        Some(Self::new(target, suffix, duration_ms, frame_ms))
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Advances one tick. Once done, keeps returning the final frame.
    pub fn step(&mut self) -> CounterFrame {
        if !self.done {
            self.value += self.increment;
            if self.value >= self.target as f64 {
                self.done = true;
            }
        }
        let shown = if self.done {
            self.target
        } else {
            self.value.floor() as u64
        };
        CounterFrame {
            text: format!("{}{}", shown, self.suffix),
            done: self.done,
        }
    }
}

/// Drives animations on the scheduler's animation frames.
#[derive(Clone)]
pub struct CounterAnimator<S: Scheduler> {
    scheduler: S,
}

impl<S: Scheduler> CounterAnimator<S> {
    pub fn new(scheduler: S) -> Self {
        Self { scheduler }
    }

    /// Renders the first tick right away and the rest on following frames.
    pub fn start<D>(&self, animation: CounterAnimation, display: Rc<D>)
    where
        D: CounterDisplay + ?Sized + 'static,
    {
        debug!(
            "Counting up to {}{}",
            animation.target(),
            animation.suffix()
        );
        tick(self.scheduler.clone(), animation, display);
    }
}

fn tick<S, D>(scheduler: S, mut animation: CounterAnimation, display: Rc<D>)
where
    S: Scheduler,
    D: CounterDisplay + ?Sized + 'static,
{
    let frame = animation.step();
    display.render(&frame.text);
    if !frame.done {
        let next = scheduler.clone();
        scheduler.animation_frame(move || tick(next, animation, display));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorded(RefCell<Vec<String>>);

    impl CounterDisplay for Recorded {
        fn render(&self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    fn numeric(text: &str, suffix: &str) -> u64 {
        text.strip_suffix(suffix).unwrap().parse().unwrap()
    }

    #[test]
    fn parses_target_and_suffix() {
        let animation = CounterAnimation::from_text("500+", 2000, 16.0).unwrap();
        assert_eq!(animation.target(), 500);
        assert_eq!(animation.suffix(), "+");

        let animation = CounterAnimation::from_text("98%", 2000, 16.0).unwrap();
        assert_eq!((animation.target(), animation.suffix()), (98, "%"));

        assert!(CounterAnimation::from_text("many", 2000, 16.0).is_none());
        assert!(CounterAnimation::from_text("", 2000, 16.0).is_none());
    }

    #[test]
    fn hundred_over_two_seconds_counts_up_and_lands_exactly() {
        let scheduler = ManualScheduler::new();
        let display = Rc::new(Recorded::default());
        let animation = CounterAnimation::from_text("100+", 2000, 16.0).unwrap();

        CounterAnimator::new(scheduler.clone()).start(animation, display.clone());
        assert_eq!(display.0.borrow().len(), 1, "first tick is synchronous");

        let mut frames = 0;
        while scheduler.run_frame() > 0 {
            frames += 1;
            assert!(frames < 1_000, "animation never finished");
        }

        let rendered = display.0.borrow();
        assert_eq!(rendered.last().unwrap(), "100+");
        // 2000ms / 16ms = 125 ticks of 0.8, give or take float rounding.
        assert!((125..=126).contains(&rendered.len()), "{} ticks", rendered.len());

        let values: Vec<u64> = rendered.iter().map(|t| numeric(t, "+")).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        let (last, before) = values.split_last().unwrap();
        assert_eq!(*last, 100);
        assert!(before.iter().all(|&v| v < 100));
        assert_eq!(values[0], 0);
    }

    #[test]
    fn finished_animation_does_not_restart() {
        let mut animation = CounterAnimation::new(3, "", 32, 16.0);
        assert_eq!(animation.step().text, "1");
        let last = animation.step();
        assert_eq!(last, CounterFrame { text: "3".into(), done: true });
        assert_eq!(animation.step(), last);
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let scheduler = ManualScheduler::new();
        let display = Rc::new(Recorded::default());
        let animation = CounterAnimation::from_text("0 projects", 2000, 16.0).unwrap();

        CounterAnimator::new(scheduler.clone()).start(animation, display.clone());

        assert_eq!(*display.0.borrow(), vec!["0 projects".to_string()]);
        assert_eq!(scheduler.pending_frames(), 0);
    }
}
