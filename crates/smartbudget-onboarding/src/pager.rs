#![forbid(unsafe_code)]

//! Horizontal paging geometry for the carousel.

/// Maps between scroll offsets and slide indices for full-width pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pager {
    page_width: f32,
}

/// One pagination dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

impl Pager {
    /// A pager for pages `page_width` points wide (usually the window width).
    #[must_use]
    pub fn new(page_width: f32) -> Self {
        Self { page_width }
    }

    #[must_use]
    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    /// Nearest page for a scroll offset.
    ///
    /// Unclamped: the controller clamps. Degenerate widths and non-finite
    /// offsets map to page 0.
    #[must_use]
    pub fn index_at(&self, offset_x: f32) -> i64 {
        if !(self.page_width.is_finite() && self.page_width > 0.0) || !offset_x.is_finite() {
            return 0;
        }
        // `as` saturates on overflow.
        (offset_x / self.page_width).round() as i64
    }

    /// Scroll offset that shows `index`.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f32 {
        index as f32 * self.page_width.max(0.0)
    }

    /// Pagination dots with the current one highlighted.
    #[must_use]
    pub fn dots(current: usize, count: usize) -> Vec<Dot> {
        (0..count)
            .map(|index| Dot {
                index,
                active: index == current,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_page() {
        let p = Pager::new(400.0);
        assert_eq!(p.index_at(0.0), 0);
        assert_eq!(p.index_at(199.0), 0);
        assert_eq!(p.index_at(200.0), 1);
        assert_eq!(p.index_at(1190.0), 3);
        assert_eq!(p.index_at(-300.0), -1);
    }

    #[test]
    fn degenerate_inputs_map_to_first_page() {
        assert_eq!(Pager::new(0.0).index_at(500.0), 0);
        assert_eq!(Pager::new(f32::NAN).index_at(500.0), 0);
        assert_eq!(Pager::new(400.0).index_at(f32::INFINITY), 0);
    }

    #[test]
    fn offset_round_trips_index() {
        let p = Pager::new(390.0);
        for i in 0..4 {
            assert_eq!(p.index_at(p.offset_for(i)), i as i64);
        }
    }

    #[test]
    fn exactly_one_active_dot() {
        let dots = Pager::dots(2, 4);
        assert_eq!(dots.len(), 4);
        assert_eq!(dots.iter().filter(|d| d.active).count(), 1);
        assert!(dots[2].active);
    }
}
