//! Compose a speech corpus from downloaded subtitles, recordings and
//! published correction data.

pub mod audio;
pub mod config;
pub mod corpus;
pub mod correction;
pub mod patch;
pub mod pipeline;
pub mod subtitle;
pub mod text;
