//! vttfmp4 decodes WebVTT subtitle cues packaged inside ISO base-media-file-format
//! (fragmented MP4) boxes: `vttc`/`vttx`/`vtte` outer cue boxes carrying
//! `iden`/`sttg`/`payl` inner boxes, and emits styled snapshot subpictures
//! for a host rendering subsystem.

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    missing_docs,
    clippy::perf,
    anonymous_parameters,
    trivial_numeric_casts,
    trivial_casts,
    single_use_lifetimes,
    nonstandard_style,
    unreachable_pub
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::doc_markdown,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

/// A cue's identity, time interval, settings, DOM, and line count.
pub mod cue;
/// The cue-text mini-DOM: tagged/text node forest builder.
pub mod dom;
/// The crate's error type.
mod errors;
/// Region-declaration header/extradata loader.
pub mod header;
/// ISOBMFF payload demux: the `vttc`/`vttx`/`vtte`/`iden`/`sttg`/`payl` box iterator.
pub mod isobmff;
/// Per-region bounded scrollback store and the region registry.
pub mod region;
/// Cue DOM to styled segment-list conversion.
pub mod segments;
/// Per-cue settings model (`sttg` box payload).
pub mod settings;
/// Host rendering contract (subpicture, updater-regions, the sink trait).
pub mod subpicture;
/// Time scalar and half-open interval types.
pub mod time;
/// Shared percent/tuple-stream value parsers.
pub mod value;

/// Expiry + render orchestrator: the decoder's public entry point.
pub mod decoder;

pub use cue::Cue;
pub use decoder::{Block, Decoder, CODEC_WEBVTT};
pub use errors::Error;
pub use region::{Region, RegionStore};
pub use segments::{EntityDecoder, IdentityEntityDecoder, Segment, Style};
pub use subpicture::{Subpicture, SubpictureSink, UpdaterRegion};
pub use time::{Interval, Timestamp};
