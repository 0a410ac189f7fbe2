//! segcut - named, dated video segment extraction
//!
//! Cuts a list of named time ranges out of one video with ffmpeg's stream
//! copy and writes them to `<video dir>/segments_<date>/[<date>] <name>.mp4`.
//!
//! The layers follow a ports-and-adapters layout: [`domain`] holds the pure
//! validation and naming rules, [`ports`] the traits the use case depends on,
//! [`adapters`] the ffprobe/ffmpeg/filesystem/config implementations and
//! [`app`] the interactor that drives one run.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod form;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::SplitInteractor;
pub use domain::errors::DomainError;
pub use domain::model::{OutputPlan, RunContext, RunState, Segment, SplitReport, TimeSpec};
pub use domain::rules::{OutputNaming, SegmentPlanner, SegmentValidator};
pub use form::{FormController, SegmentRowInput, TimeFields};
