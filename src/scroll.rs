/// Hero background offset for the current scroll position, or `None` once the hero
/// has scrolled out and the background should stay where it is.
pub fn parallax_offset(scroll_y: f64, hero_height: f64, rate: f64) -> Option<f64> {
    (scroll_y < hero_height).then(|| scroll_y * rate)
}

pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

/// True once an element's top edge is at least `offset_px` above the viewport bottom.
///
/// The boundary is inclusive: a top edge exactly `offset_px` above the bottom reveals.
pub fn should_reveal(element_top: f64, viewport_height: f64, offset_px: f64) -> bool {
    element_top <= viewport_height - offset_px
}

/// Elements that fade in as they scroll into view. Revealing is one way.
pub struct RevealOnScroll<K> {
    offset_px: f64,
    pending: Vec<K>,
}

impl<K> RevealOnScroll<K> {
    pub fn new(offset_px: f64, elements: impl IntoIterator<Item = K>) -> Self {
        Self {
            offset_px,
            pending: elements.into_iter().collect(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Checks every pending element and returns the ones to reveal now.
    pub fn sweep<F>(&mut self, viewport_height: f64, mut top_of: F) -> Vec<K>
    where
        F: FnMut(&K) -> f64,
    {
        let offset_px = self.offset_px;
        let (revealed, pending): (Vec<K>, Vec<K>) = self
            .pending
            .drain(..)
            .partition(|element| should_reveal(top_of(element), viewport_height, offset_px));
        self.pending = pending;
        revealed
    }
}
