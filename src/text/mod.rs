//! Subtitle text normalisation.
//!
//! * [`normalize`]: the ordered clean-up applied to every cue.
//! * [`FullWidth`]: half-width → full-width folding used by [`normalize`].

pub mod normalize;
pub mod width;

pub use normalize::normalize;
pub use width::FullWidth;
