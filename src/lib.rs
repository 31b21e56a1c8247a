//! zoomfig: locate a zoom crop inside a panorama and composite the
//! pair into an annotated figure.
//!
//! The workspace splits into three members re-exported here:
//! [`core`] (shared geometry and color types), [`matching`] (the
//! multi-scale template matcher), and [`render`] (layout specs and the
//! compositor). Both pipeline operations, [`locate`] and [`compose`],
//! are pure functions: no I/O, no shared state, bit-reproducible for
//! fixed inputs. A GUI or batch shell owns file decoding/encoding,
//! settings persistence, and interaction state on top of them.

pub use zoomfig_core as core;
pub use zoomfig_matching as matching;
pub use zoomfig_render as render;

pub use zoomfig_core::{Color, Placement, Point, Rect};
pub use zoomfig_matching::{locate, locate_refined, LocateOptions, MatchError};
pub use zoomfig_render::{compose, CompositeResult, LayoutSpec, RenderError};
