//! Region model and the per-decoder region registry.

use crate::{
    cue::Cue,
    time::Timestamp,
    value::{parse_percent, parse_percent_pair, tuple_stream},
};

/// Worst case one line of scrollback per cue slot.
pub const MAX_SCROLL_LINES: usize = 18;

/// A WebVTT region: positioning geometry plus a fixed-capacity scrollback
/// window of active cues.
#[derive(Debug, Clone)]
pub struct Region {
    pub id: Option<String>,
    pub width: f32,
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub viewport_anchor_x: f32,
    pub viewport_anchor_y: f32,
    pub max_scroll_lines: usize,
    pub scroll_up: bool,
    cues: [Option<Cue>; MAX_SCROLL_LINES],
}

impl Default for Region {
    fn default() -> Self {
        Self {
            id: None,
            width: 1.0,
            anchor_x: 0.0,
            anchor_y: 1.0,
            viewport_anchor_x: 0.0,
            viewport_anchor_y: 1.0,
            max_scroll_lines: 3,
            scroll_up: false,
            cues: Default::default(),
        }
    }
}

impl Region {
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "id" => self.id = Some(value.to_string()),
            "width" => {
                if let Ok((_, v)) = parse_percent(value) {
                    self.width = v;
                }
            }
            "regionanchor" => {
                if let Ok((_, (x, y))) = parse_percent_pair(value) {
                    self.anchor_x = x;
                    self.anchor_y = y;
                }
            }
            "viewportanchor" => {
                if let Ok((_, (x, y))) = parse_percent_pair(value) {
                    self.viewport_anchor_x = x;
                    self.viewport_anchor_y = y;
                }
            }
            "lines" => {
                if let Ok(i) = value.parse::<i64>() {
                    if i > 0 {
                        self.max_scroll_lines = (i as usize).min(MAX_SCROLL_LINES);
                    }
                }
            }
            "scroll" => self.scroll_up = value == "up",
            _ => {}
        }
    }

    /// Current sum of `cue.lines` across every occupied slot.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.cues.iter().flatten().map(|c| c.lines).sum()
    }

    /// Every currently occupied slot, oldest first.
    pub fn active_cues(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter().filter_map(Option::as_ref)
    }

    /// `ReduceRegion`: drop the oldest cue outright, or — if slot 0 is
    /// already empty — reduce the oldest *occupied* slot by one line.
    fn reduce_region(&mut self) {
        if self.cues[0].is_some() {
            self.cues[0] = None;
            return;
        }
        if let Some(i) = self.cues.iter().position(Option::is_some) {
            let cue = self.cues[i].take().expect("just checked Some");
            self.cues[i] = cue.reduce();
        }
    }

    /// Drop slot 0, shift `[1..18)` down to `[0..17)`, freeing the newest
    /// slot for the next insertion.
    fn scroll_up(&mut self) {
        self.cues.rotate_left(1);
        self.cues[MAX_SCROLL_LINES - 1] = None;
    }

    /// Insert `cue` into this region, enforcing its line-budget invariant.
    /// `cue` is dropped without being stored if it cannot be shrunk to fit a
    /// scrolling region's budget.
    pub fn add_cue(&mut self, mut cue: Cue) {
        if !self.scroll_up {
            self.clear_cues();
            self.cues[MAX_SCROLL_LINES - 1] = Some(cue);
            return;
        }

        while cue.lines > self.max_scroll_lines {
            match cue.reduce() {
                Some(reduced) => cue = reduced,
                None => return,
            }
        }

        while self.line_count() + cue.lines > self.max_scroll_lines {
            self.reduce_region();
        }

        self.scroll_up();
        self.cues[MAX_SCROLL_LINES - 1] = Some(cue);
    }

    fn clear_cues(&mut self) {
        self.cues = Default::default();
    }

    /// Drop every cue that has fully expired by `t`, left-packing survivors
    /// toward slot 0 while preserving their relative order.
    pub fn clear_cues_by_time(&mut self, t: Timestamp) {
        let mut survivors: Vec<Option<Cue>> = std::mem::take(&mut self.cues)
            .into_iter()
            .filter(|slot| !slot.as_ref().is_some_and(|cue| cue.interval.has_expired_by(t)))
            .collect();
        survivors.resize_with(MAX_SCROLL_LINES, || None);
        self.cues = survivors
            .try_into()
            .unwrap_or_else(|_| unreachable!("resized to exactly MAX_SCROLL_LINES"));
    }
}

/// Parse a `REGION` header block's tuple stream into a [`Region`], starting
/// from defaults.
pub fn parse_region_tuple(line: &str, region: &mut Region) {
    for (key, value) in tuple_stream(line, ' ', ':') {
        region.apply(key, value);
    }
}

/// Registry of regions: the always-present default region plus any
/// explicitly declared named regions.
#[derive(Debug, Clone, Default)]
pub struct RegionStore {
    pub default_region: Region,
    pub named_regions: Vec<Region>,
}

impl RegionStore {
    /// Append a freshly committed named region.
    pub fn add_named_region(&mut self, region: Region) {
        self.named_regions.push(region);
    }

    /// `None` resolves to the default region; otherwise a linear scan of the
    /// named list, falling back to the default region on miss.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> &Region {
        match id {
            None => &self.default_region,
            Some(id) => self
                .named_regions
                .iter()
                .find(|r| r.id.as_deref() == Some(id))
                .unwrap_or(&self.default_region),
        }
    }

    /// Mutable counterpart of [`RegionStore::resolve`].
    pub fn resolve_mut(&mut self, id: Option<&str>) -> &mut Region {
        match id {
            None => &mut self.default_region,
            Some(id) => {
                if let Some(idx) = self.named_regions.iter().position(|r| r.id.as_deref() == Some(id)) {
                    &mut self.named_regions[idx]
                } else {
                    &mut self.default_region
                }
            }
        }
    }

    /// Expire stale cues in every region: default first, then named, in
    /// declaration order.
    pub fn clear_cues_by_time(&mut self, t: Timestamp) {
        self.default_region.clear_cues_by_time(t);
        for region in &mut self.named_regions {
            region.clear_cues_by_time(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Interval;

    fn cue(start: i64, stop: i64, payload: &str) -> Cue {
        let mut c = Cue::new(Interval::new(Timestamp::new(start), Timestamp::new(stop)));
        c.set_payload(payload);
        c
    }

    #[test]
    fn region_tuple_parsing() {
        let mut region = Region::default();
        parse_region_tuple("id:top width:80% scroll:up lines:2", &mut region);
        assert_eq!(region.id.as_deref(), Some("top"));
        assert_eq!(region.width, 0.8);
        assert!(region.scroll_up);
        assert_eq!(region.max_scroll_lines, 2);
    }

    #[test]
    fn lines_key_clamps_to_capacity() {
        let mut region = Region::default();
        parse_region_tuple("lines:99", &mut region);
        assert_eq!(region.max_scroll_lines, MAX_SCROLL_LINES);
    }

    #[test]
    fn non_scrolling_region_holds_one_cue() {
        let mut region = Region::default();
        region.add_cue(cue(0, 10, "first"));
        region.add_cue(cue(0, 10, "second"));
        assert_eq!(region.active_cues().count(), 1);
        assert_eq!(region.line_count(), 1);
    }

    #[test]
    fn scrolling_region_overflow_drops_oldest() {
        // End-to-end scenario 2: scroll=up lines=2, three one-line cues at
        // [0,10), [1,10), [2,10) -- after the third insert only 2 and 3 remain.
        let mut region = Region {
            scroll_up: true,
            max_scroll_lines: 2,
            ..Region::default()
        };
        region.add_cue(cue(0, 10, "one"));
        region.add_cue(cue(1, 10, "two"));
        region.add_cue(cue(2, 10, "three"));

        let texts: Vec<String> = region
            .active_cues()
            .map(|c| c.dom.iter().filter_map(|(_, n)| n.text()).collect::<String>())
            .collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[test]
    fn multiline_cue_is_reduced_to_fit() {
        // Scenario 3: scroll=up lines=2, "a\nb\nc" (3 lines) must reduce to
        // "b\nc" (2 lines) before insertion; a following 1-line cue reduces
        // it again to make room.
        let mut region = Region {
            scroll_up: true,
            max_scroll_lines: 2,
            ..Region::default()
        };
        region.add_cue(cue(0, 10, "a\nb\nc"));
        assert_eq!(region.line_count(), 2);

        region.add_cue(cue(1, 10, "x"));
        let texts: Vec<String> = region
            .active_cues()
            .map(|c| c.dom.iter().filter_map(|(_, n)| n.text()).collect::<String>())
            .collect();
        assert_eq!(texts, vec!["c", "x"]);
    }

    #[test]
    fn clear_cues_by_time_left_packs_survivors() {
        let mut region = Region {
            scroll_up: true,
            max_scroll_lines: MAX_SCROLL_LINES,
            ..Region::default()
        };
        region.add_cue(cue(0, 5, "expired"));
        region.add_cue(cue(0, 20, "survivor"));

        region.clear_cues_by_time(Timestamp::new(10));
        assert_eq!(region.active_cues().count(), 1);
        let text: String = region
            .active_cues()
            .next()
            .unwrap()
            .dom
            .iter()
            .filter_map(|(_, n)| n.text())
            .collect();
        assert_eq!(text, "survivor");
    }

    #[test]
    fn store_resolves_missing_id_to_default() {
        let mut store = RegionStore::default();
        let mut named = Region::default();
        named.id = Some("top".to_string());
        store.add_named_region(named);

        let resolved = store.resolve(Some("bottom"));
        assert!(std::ptr::eq(resolved, &store.default_region));
    }

    #[test]
    fn store_resolves_matching_id() {
        let mut store = RegionStore::default();
        let mut named = Region::default();
        named.id = Some("top".to_string());
        store.add_named_region(named);

        let resolved = store.resolve(Some("top"));
        assert_eq!(resolved.id.as_deref(), Some("top"));
    }
}
