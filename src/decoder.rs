//! Expiry + render orchestrator: ties every other module together into the
//! decoder's open/decode-block entry points.

use crate::{
    cue::Cue,
    errors::Error,
    header::load_extradata,
    isobmff::{BoxIterator, ATOM_IDEN, ATOM_PAYL, ATOM_STTG, ATOM_VTTC, ATOM_VTTX},
    region::RegionStore,
    segments::{convert_cue_to_segments, EntityDecoder, IdentityEntityDecoder, Segment, Style},
    settings::parse_cue_settings,
    subpicture::{Point, RegionAlign, RegionFlags, Subpicture, UpdaterRegion, DEFAULT_LINE_HEIGHT_VH, LINE_TO_HEIGHT_RATIO},
    time::{Interval, Timestamp},
};

/// One presentation tick's input: a block of ISOBMFF bytes plus its timing.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub bytes: &'a [u8],
    pub dts: Timestamp,
    pub pts: Timestamp,
    pub length: i64,
}

/// The codec tag this decoder accepts.
pub const CODEC_WEBVTT: &str = "wvtt";

/// A decoder instance: its region registry plus the entity decoder used to
/// post-process segment text. Dropping a `Decoder` releases all state; there
/// is no explicit close, just Rust's ordinary `Drop`.
pub struct Decoder<D: EntityDecoder = IdentityEntityDecoder> {
    regions: RegionStore,
    entity_decoder: D,
}

impl Decoder<IdentityEntityDecoder> {
    /// Open a decoder for `codec`, bootstrapping its default region and, if
    /// present, the regions declared in `extradata`.
    pub fn open(codec: &str, extradata: Option<&str>) -> Result<Self, Error> {
        Self::open_with_decoder(codec, extradata, IdentityEntityDecoder)
    }
}

impl<D: EntityDecoder> Decoder<D> {
    /// As [`Decoder::open`], but with a caller-supplied [`EntityDecoder`]
    /// instead of the no-op default.
    pub fn open_with_decoder(codec: &str, extradata: Option<&str>, entity_decoder: D) -> Result<Self, Error> {
        if codec != CODEC_WEBVTT {
            return Err(Error::CodecMismatch);
        }
        let mut regions = RegionStore::default();
        if let Some(extradata) = extradata {
            load_extradata(extradata, &mut regions);
        }
        Ok(Self { regions, entity_decoder })
    }

    /// Process one decode tick: expire stale cues, demux the block's new
    /// cues, then render a subpicture for `[block.pts, block.pts+length)`.
    /// Returns `None` if no region produced any content this tick.
    pub fn decode_block(&mut self, block: Block<'_>) -> Result<Option<Subpicture>, Error> {
        self.regions.clear_cues_by_time(block.dts);

        let stop = Timestamp::new(block.pts.value() + block.length);
        process_isobmff(block.bytes, Interval::new(block.pts, stop), &mut self.regions)?;

        Ok(render_regions(&self.regions, block.pts, stop, &self.entity_decoder))
    }
}

/// Iterate outer `vttc`/`vttx`/`vtte` boxes, building and inserting a cue
/// per non-empty one.
fn process_isobmff(bytes: &[u8], interval: Interval, regions: &mut RegionStore) -> Result<(), Error> {
    for outer in BoxIterator::new(bytes) {
        if outer.box_type != ATOM_VTTC && outer.box_type != ATOM_VTTX {
            continue; // vtte and anything else: iterated for nothing, or skipped entirely
        }

        let mut cue = Cue::new(interval);
        for inner in BoxIterator::new(outer.payload) {
            // A box with non-UTF-8 payload is malformed input, not a hard
            // failure: it is skipped so the rest of this cue (and tick)
            // still decodes.
            let Ok(text) = std::str::from_utf8(inner.payload) else {
                continue;
            };
            match inner.box_type {
                ATOM_IDEN => cue.id = Some(text.to_string()),
                ATOM_STTG => cue.settings = parse_cue_settings(text),
                ATOM_PAYL => cue.set_payload(text),
                _ => {}
            }
        }

        let region = regions.resolve_mut(cue.settings.region_id.as_deref());
        region.add_cue(cue);
    }
    Ok(())
}

/// Builds a single subpicture with one updater-region per VTT region that
/// has active content at `pts`.
fn render_regions(regions: &RegionStore, pts: Timestamp, stop: Timestamp, decoder: &dyn EntityDecoder) -> Option<Subpicture> {
    let mut updater_regions = Vec::new();

    for (is_default, region) in std::iter::once((true, &regions.default_region))
        .chain(regions.named_regions.iter().map(|r| (false, r)))
    {
        let left_offset = region.anchor_x * region.width;
        let left = region.viewport_anchor_x - left_offset;
        let top_offset = region.anchor_y * region.max_scroll_lines as f32 * DEFAULT_LINE_HEIGHT_VH / 100.0;
        let top = region.viewport_anchor_y - top_offset;

        let mut segments = Vec::new();
        for cue in region.active_cues() {
            if !cue.interval.contains(pts) {
                continue;
            }
            let cue_segments = convert_cue_to_segments(&cue.dom, decoder);
            if cue_segments.is_empty() {
                continue;
            }
            if !segments.is_empty() {
                segments.push(Segment {
                    text: "\n".to_string(),
                    style: Style::default(),
                });
            }
            segments.extend(cue_segments);
        }

        if segments.is_empty() {
            continue;
        }

        let (align, origin, extent) = if is_default {
            (RegionAlign::BOTTOM, Point::default(), Point::default())
        } else {
            (
                RegionAlign::TOP | RegionAlign::LEFT,
                Point { x: left, y: top },
                Point { x: region.width, y: 0.0 },
            )
        };

        updater_regions.push(UpdaterRegion {
            align,
            flags: RegionFlags::ORIGIN_X_IS_RATIO | RegionFlags::ORIGIN_Y_IS_RATIO | RegionFlags::EXTENT_X_IS_RATIO,
            origin,
            extent,
            segments,
        });
    }

    if updater_regions.is_empty() {
        return None;
    }

    Some(Subpicture {
        interval: Interval::new(pts, stop),
        ephemeral: true,
        is_absolute: false,
        default_font_relsize: DEFAULT_LINE_HEIGHT_VH / LINE_TO_HEIGHT_RATIO,
        regions: updater_regions,
    })
}
