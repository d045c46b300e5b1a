//! Anchored overlay positioner for the event detail popover.
//!
//! `OverlayController` opens a floating surface next to an anchor element,
//! keeps it attached through the backend's auto-update subscription, and
//! tears that subscription down on close. Single-threaded: shared state is
//! `Rc`/`Cell` and the backend drives callbacks from its own event loop.

use std::cell::Cell;
use std::rc::{Rc, Weak};

pub mod backend;

pub use backend::{
    Coords, FloatingBackend, FloatingSurface, Middleware, Placement, PositionOptions,
    RepositionFn, TrackingHandle,
};

struct Session<A, P> {
    anchor: Weak<A>,
    payload: P,
    tracking: TrackingHandle,
}

/// Open/close state machine for one popover surface.
///
/// `A` is the anchor element type, `S` the floating surface, `B` the
/// positioning backend and `P` the payload shown in the popover.
pub struct OverlayController<A, S, B, P> {
    surface: Rc<S>,
    backend: Rc<B>,
    options: Rc<PositionOptions>,
    session: Option<Session<A, P>>,
    generation: Rc<Cell<u64>>,
}

impl<A, S, B, P> OverlayController<A, S, B, P>
where
    A: 'static,
    S: FloatingSurface + 'static,
    B: FloatingBackend<A, S> + 'static,
{
    pub fn new(surface: Rc<S>, backend: Rc<B>) -> Self {
        Self::with_options(surface, backend, PositionOptions::default())
    }

    pub fn with_options(surface: Rc<S>, backend: Rc<B>, options: PositionOptions) -> Self {
        Self {
            surface,
            backend,
            options: Rc::new(options),
            session: None,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Open the popover on `anchor` showing `payload`.
    ///
    /// A missing anchor is ignored. Opening while already open replaces the
    /// session: the previous tracking is cancelled before the new one starts,
    /// so at most one subscription is ever active.
    pub fn open(&mut self, anchor: Option<&Rc<A>>, payload: P) {
        let Some(anchor) = anchor else {
            log::debug!("Popover open ignored: no anchor element");
            return;
        };

        if let Some(previous) = self.session.take() {
            log::debug!("Popover already open; replacing session");
            previous.tracking.cancel();
        }

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let on_change = self.reposition_callback(anchor, generation);
        let tracking = self.backend.auto_update(anchor, &self.surface, on_change);

        self.session = Some(Session {
            anchor: Rc::downgrade(anchor),
            payload,
            tracking,
        });
    }

    /// Close the popover, drop the payload and cancel tracking.
    ///
    /// Closing while closed is a no-op. Once this returns, no callback from
    /// the closed session writes to the surface.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.generation.set(self.generation.get().wrapping_add(1));
        session.tracking.cancel();
        log::debug!("Popover closed");
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn payload(&self) -> Option<&P> {
        self.session.as_ref().map(|session| &session.payload)
    }

    /// Current anchor, if open and the element is still alive.
    pub fn anchor(&self) -> Option<Rc<A>> {
        self.session
            .as_ref()
            .and_then(|session| session.anchor.upgrade())
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    fn reposition_callback(&self, anchor: &Rc<A>, generation: u64) -> RepositionFn {
        let anchor = Rc::downgrade(anchor);
        let surface = Rc::downgrade(&self.surface);
        let backend = Rc::downgrade(&self.backend);
        let options = Rc::clone(&self.options);
        let current = Rc::clone(&self.generation);

        Rc::new(move || {
            if current.get() != generation {
                return;
            }
            let (Some(anchor), Some(surface), Some(backend)) =
                (anchor.upgrade(), surface.upgrade(), backend.upgrade())
            else {
                return;
            };

            let Some(coords) = backend.compute_position(&anchor, &surface, &options) else {
                return;
            };

            // The session may have closed while the position was computed.
            if current.get() == generation {
                surface.apply_offset(coords);
            }
        })
    }
}

impl<A, S, B, P> Drop for OverlayController<A, S, B, P> {
    fn drop(&mut self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}
