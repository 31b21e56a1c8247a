//! ROI localization: find the most likely axis-aligned placement of a
//! zoom crop inside a panorama via multi-scale normalized
//! cross-correlation.
//!
//! The public entry points are [`locate`] and [`locate_refined`]; both
//! are pure functions over their inputs and bit-reproducible for fixed
//! arguments.

pub mod locate;
pub mod ncc;
pub mod resample;

pub use locate::{locate, locate_refined, LocateOptions};
pub use ncc::{match_zero_mean_ncc, ScoreMap};
pub use resample::resample_gray;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("empty {0} image")]
    EmptyImage(&'static str),

    #[error(
        "no viable scale: a {crop_width}x{crop_height} crop cannot be placed in a \
         {panorama_width}x{panorama_height} panorama within scales {min_scale:.3}..{max_scale:.3}"
    )]
    NoViableScale {
        crop_width: u32,
        crop_height: u32,
        panorama_width: u32,
        panorama_height: u32,
        min_scale: f64,
        max_scale: f64,
    },
}
