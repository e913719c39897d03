//! Lazy viewport tracking: recompute the surface backing size only when
//! the displayed size or scale factor actually changes.
//!
//! The compositor calls [`ViewportTracker::update`] at the top of every
//! frame with the window's current logical size and scale factor. The
//! tracker compares them against the previously recorded values; only on a
//! change does it report a new backing size (logical pixels times scale
//! factor) for the caller to reconfigure the surface and depth buffer
//! with. An unchanged frame is a strict no-op.

/// Scale factor assumed when the platform has not reported one.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;

/// Physical backing-store dimensions for the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingSize {
    /// Width in physical pixels (>= 1).
    pub width: u32,
    /// Height in physical pixels (>= 1).
    pub height: u32,
}

impl BackingSize {
    /// Width / height as an f32 aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Tracks the last-seen display measurements and derives backing sizes.
#[derive(Debug, Default)]
pub struct ViewportTracker {
    recorded: Option<(f64, f64, f64)>,
    backing: Option<BackingSize>,
}

impl ViewportTracker {
    /// Create a tracker with nothing recorded; the first `update` always
    /// reports a backing size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the current logical size and scale factor against the
    /// recorded values. Returns `Some(backing)` when they differ (the
    /// caller must reconfigure the surface before using the viewport),
    /// `None` when nothing changed.
    pub fn update(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        scale_factor: f64,
    ) -> Option<BackingSize> {
        let current = (logical_width, logical_height, scale_factor);
        if self.recorded == Some(current) {
            return None;
        }
        self.recorded = Some(current);

        let backing = BackingSize {
            width: (logical_width * scale_factor).round().max(1.0) as u32,
            height: (logical_height * scale_factor).round().max(1.0) as u32,
        };
        self.backing = Some(backing);
        log::debug!(
            "Backing store resized to {}x{} ({}x{} logical @ {:.2})",
            backing.width,
            backing.height,
            logical_width,
            logical_height,
            scale_factor
        );
        Some(backing)
    }

    /// The most recently derived backing size, if any update has run.
    pub fn backing(&self) -> Option<BackingSize> {
        self.backing
    }
}
