//! Host rendering contract: the subpicture shape the decoder emits each
//! tick, and the sink trait a host implements to receive it.

use crate::{segments::Segment, time::Interval};

/// Default line height, as a percentage of viewport height (`5.33vh`).
pub const DEFAULT_LINE_HEIGHT_VH: f32 = 5.33;
/// Ratio used to derive a region's default relative font size from its line
/// height (`5.33 / 1.06`).
pub const LINE_TO_HEIGHT_RATIO: f32 = 1.06;

bitflags::bitflags! {
    /// Anchor edges an [`UpdaterRegion`] is aligned against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RegionAlign: u8 {
        const BOTTOM = 0b0001;
        const TOP    = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }

    /// Which of an [`UpdaterRegion`]'s geometry fields are ratios (`[0,1]`)
    /// rather than absolute pixels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RegionFlags: u8 {
        const ORIGIN_X_IS_RATIO = 0b001;
        const ORIGIN_Y_IS_RATIO = 0b010;
        const EXTENT_X_IS_RATIO = 0b100;
    }
}

/// A 2D point or extent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One on-screen text block within a [`Subpicture`]: the default region, or
/// a linked chain of named-region updaters.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdaterRegion {
    pub align: RegionAlign,
    pub flags: RegionFlags,
    pub origin: Point,
    pub extent: Point,
    pub segments: Vec<Segment>,
}

/// A single decode tick's complete styled-subtitle snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpicture {
    pub interval: Interval,
    /// Whether this subpicture's time range is not authoritative — the next
    /// tick supersedes it regardless of `interval.stop`.
    pub ephemeral: bool,
    pub is_absolute: bool,
    pub default_font_relsize: f32,
    pub regions: Vec<UpdaterRegion>,
}

/// Host collaborator that receives completed subpictures, one per decode
/// tick that produces visible output.
pub trait SubpictureSink {
    /// Hand a completed subpicture off to the host (`QueueSub` in spec.md §6).
    fn queue_sub(&mut self, subpicture: Subpicture);
}
