//! Scroll-spy geometry.
//!
//! A section counts as in view when at least half of it lies inside the
//! viewport shrunk from the top by the sticky header (capped at 120 px) and
//! from the bottom by 40 % of the viewport height. In the browser an
//! `IntersectionObserver` configured from [`RootMargin`] does the measuring;
//! [`evaluate`] computes the same thing from plain rectangles for headless
//! hosts and tests.

/// Upper bound on the top inset, in pixels.
pub const MAX_TOP_INSET_PX: f64 = 120.0;
/// Bottom inset, as a percentage of viewport height.
pub const BOTTOM_INSET_PERCENT: f64 = 40.0;
/// Fraction of a section that must be visible.
pub const THRESHOLD: f64 = 0.5;

/// Insets applied to the viewport before intersecting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top_px: f64,
    pub bottom_percent: f64,
}

impl RootMargin {
    /// Margin for a sticky header of `header_height` plus `offset` pixels of
    /// breathing room.
    ///
    /// ```rust
    /// use blogfront::nav::spy::RootMargin;
    ///
    /// assert_eq!(RootMargin::for_header(64.0, 8.0).to_css(), "-72px 0px -40% 0px");
    /// assert_eq!(RootMargin::for_header(200.0, 8.0).to_css(), "-120px 0px -40% 0px");
    /// ```
    #[must_use]
    pub fn for_header(header_height: f64, offset: f64) -> Self {
        Self {
            top_px: (header_height + offset).min(MAX_TOP_INSET_PX),
            bottom_percent: BOTTOM_INSET_PERCENT,
        }
    }

    /// The `rootMargin` string for `IntersectionObserverInit`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("-{}px 0px -{}% 0px", self.top_px, self.bottom_percent)
    }

    /// Visible band `(top, bottom)` in viewport coordinates.
    #[must_use]
    pub fn band(&self, viewport_height: f64) -> (f64, f64) {
        let bottom = viewport_height - viewport_height * self.bottom_percent / 100.0;
        (self.top_px, bottom.max(self.top_px))
    }
}

/// A section's layout box relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub height: f64,
}

/// One entry of an intersection batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionVisibility {
    /// The section's `id`.
    pub id: String,
    pub is_intersecting: bool,
}

/// Fraction of `rect` inside the margin-adjusted viewport, in `[0, 1]`.
#[must_use]
pub fn intersection_ratio(rect: SectionRect, viewport_height: f64, margin: RootMargin) -> f64 {
    let (band_top, band_bottom) = margin.band(viewport_height);
    let top = rect.top.max(band_top);
    let bottom = (rect.top + rect.height).min(band_bottom);

    if rect.height <= 0.0 {
        return if rect.top >= band_top && rect.top <= band_bottom { 1.0 } else { 0.0 };
    }
    ((bottom - top).max(0.0) / rect.height).clamp(0.0, 1.0)
}

/// Builds a visibility batch for `sections`, in the order given.
#[must_use]
pub fn evaluate(
    sections: &[(String, SectionRect)],
    viewport_height: f64,
    margin: RootMargin,
) -> Vec<SectionVisibility> {
    sections
        .iter()
        .map(|(id, rect)| SectionVisibility {
            id: id.clone(),
            is_intersecting: intersection_ratio(*rect, viewport_height, margin) >= THRESHOLD,
        })
        .collect()
}
