//! One-shot visibility tracking.
//!
//! A [`ViewportObserver`] keeps a watch set of pending entries. Feeding it intersection
//! samples fires each entry at most once; a fired entry is removed from the watch set
//! and the caller gets its key back so it can stop observing the real element too.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn overlap(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom().min(other.bottom());
        let right = self.right().min(other.right());
        (bottom >= top && right >= left).then(|| Rect::new(top, left, right - left, bottom - top))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element's area that has to be inside the root.
    pub threshold: f64,
    /// Added to the bottom edge of the root; negative values shrink it.
    pub bottom_margin_px: f64,
}

impl ObserverOptions {
    pub fn reveal(threshold: f64, bottom_margin_px: f64) -> Self {
        Self { threshold, bottom_margin_px }
    }

    /// The platform defaults, used for lazy images.
    pub fn lazy_images() -> Self {
        Self { threshold: 0.0, bottom_margin_px: 0.0 }
    }

    /// CSS `rootMargin` string understood by `IntersectionObserver`.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.bottom_margin_px)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Intersection<K> {
    pub target: K,
    pub is_intersecting: bool,
}

impl<K> Intersection<K> {
    /// Computes a sample from layout.
    ///
    /// An element counts as intersecting once `threshold` of its area is inside the
    /// root, or once it covers the whole root height (taller elements can never reach
    /// the threshold).
    pub fn measure(target: K, bounds: Rect, viewport: Rect, options: &ObserverOptions) -> Self {
        let root = Rect::new(
            viewport.top,
            viewport.left,
            viewport.width,
            (viewport.height + options.bottom_margin_px).max(0.0),
        );
        let is_intersecting = match bounds.overlap(&root) {
            Some(visible) if bounds.area() > 0.0 => {
                visible.area() / bounds.area() >= options.threshold
                    || visible.height >= root.height
            }
            // Zero-area elements count as fully visible when they touch the root.
            Some(_) => true,
            None => false,
        };
        Self { target, is_intersecting }
    }
}

struct Watched<K, P> {
    key: K,
    payload: P,
}

pub struct ViewportObserver<K, P> {
    options: ObserverOptions,
    watched: Vec<Watched<K, P>>,
}

impl<K: PartialEq, P> ViewportObserver<K, P> {
    pub fn new(options: ObserverOptions) -> Self {
        Self { options, watched: Vec::new() }
    }

    /// Starts watching `key`. Watching a key twice keeps the first payload.
    pub fn observe(&mut self, key: K, payload: P) {
        if !self.is_watching(&key) {
            self.watched.push(Watched { key, payload });
        }
    }

    /// True while `key` is pending. Fired keys are no longer watched.
    pub fn is_watching(&self, key: &K) -> bool {
        self.watched.iter().any(|w| &w.key == key)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Samples every pending entry from layout instead of waiting for the platform.
    pub fn measure_pending<F>(&self, viewport: Rect, mut bounds_of: F) -> Vec<Intersection<K>>
    where
        K: Clone,
        F: FnMut(&K) -> Rect,
    {
        self.watched
            .iter()
            .map(|w| Intersection::measure(w.key.clone(), bounds_of(&w.key), viewport, &self.options))
            .collect()
    }

    /// Fires and unwatches every pending entry whose sample is intersecting.
    pub fn process<I>(&mut self, samples: I) -> Vec<(K, P)>
    where
        I: IntoIterator<Item = Intersection<K>>,
    {
        let mut fired = Vec::new();
        for sample in samples.into_iter().filter(|s| s.is_intersecting) {
            if let Some(index) = self.watched.iter().position(|w| w.key == sample.target) {
                let Watched { key, payload } = self.watched.remove(index);
                fired.push((key, payload));
            }
        }
        fired
    }
}
