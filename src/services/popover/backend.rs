//! Seams to the floating-position library and the rendered surface.

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Right,
    Bottom,
    Left,
}

impl Placement {
    pub fn opposite(self) -> Self {
        match self {
            Placement::Top => Placement::Bottom,
            Placement::Right => Placement::Left,
            Placement::Bottom => Placement::Top,
            Placement::Left => Placement::Right,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Placement::Top => "top",
            Placement::Right => "right",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
        })
    }
}

/// Collision handling steps, applied in order by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Middleware {
    /// Move to the next fallback placement when clipped.
    Flip { fallback_placements: Vec<Placement> },
    /// Slide along the placement axis to stay inside the viewport.
    Shift,
    /// Treat a wrapped inline anchor as its individual line boxes.
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOptions {
    pub placement: Placement,
    pub middleware: Vec<Middleware>,
}

impl PositionOptions {
    /// Prefer `placement`, flipping to the opposite side when clipped.
    pub fn beside(placement: Placement) -> Self {
        Self {
            placement,
            middleware: vec![
                Middleware::Flip {
                    fallback_placements: vec![placement, placement.opposite()],
                },
                Middleware::Shift,
                Middleware::Inline,
            ],
        }
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::beside(Placement::Right)
    }
}

/// Callback the backend invokes whenever anchor or surface layout changes.
pub type RepositionFn = Rc<dyn Fn()>;

/// The rendered floating surface (the popover element).
pub trait FloatingSurface {
    /// Write absolute offset coordinates onto the surface.
    fn apply_offset(&self, coords: Coords);
}

/// Floating-position capability supplied by the host platform.
pub trait FloatingBackend<A, S> {
    /// Compute where `surface` should sit relative to `anchor`.
    /// `None` means no position could be computed this round.
    fn compute_position(&self, anchor: &A, surface: &S, options: &PositionOptions)
        -> Option<Coords>;

    /// Observe resize, scroll and mutation of `anchor` and `surface`, calling
    /// `on_change` for each change, in order, starting with one immediate call.
    /// Cancelling the returned handle must detach every observer.
    fn auto_update(&self, anchor: &A, surface: &S, on_change: RepositionFn) -> TrackingHandle;
}

/// Cancellation handle for an `auto_update` subscription.
///
/// The cleanup runs at most once: on `cancel` or when the handle is dropped.
pub struct TrackingHandle {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl TrackingHandle {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// Handle with nothing to clean up.
    pub fn noop() -> Self {
        Self { cleanup: None }
    }

    pub fn is_active(&self) -> bool {
        self.cleanup.is_some()
    }

    pub fn cancel(mut self) {
        self.run_cleanup();
    }

    fn run_cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        self.run_cleanup();
    }
}

impl fmt::Debug for TrackingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
