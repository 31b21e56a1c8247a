//! Figure compositing: lay out a panorama and its zoom crop side by
//! side and decorate the pair with guide lines, scale bars, annotations,
//! and an optional watermark.
//!
//! The public entry point is [`compose`], a pure function from two
//! images, a [`Placement`](zoomfig_core::Placement), and a [`LayoutSpec`]
//! to a [`CompositeResult`]. Composition is all-or-nothing: the layout
//! spec is validated before any pixel is touched, and either a complete
//! result or an error comes back, never a partially drawn canvas.

pub mod annotate;
pub mod compose;
pub mod draw;
pub mod scalebar;
pub mod spec;
pub mod text;

pub use compose::{compose, CompositeResult};
pub use spec::{
    Anchor, AnnotationShape, AnnotationSpec, BarCorner, BarPlacement, BorderSpec, Direction,
    GuideCorners, GuideLineSpec, LayoutSpec, LineStyle, ScaleBarSpec, ScaleBarStyle,
    WatermarkCorner, WatermarkSpec,
};

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("malformed spec: {0}")]
    MalformedSpec(String),
}
