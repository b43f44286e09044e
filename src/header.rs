//! Header/extradata loader: pulls `REGION` blocks out of a preloaded WebVTT
//! header blob.
//!
//! A full WebVTT header tokenizer would feed lines to a callback tagged with
//! a section and a "new block" flag; since only `REGION` blocks matter here,
//! this loader instead scans directly for blank-line-delimited blocks and
//! parses the ones that open with a `REGION` line.

use crate::region::{parse_region_tuple, Region, RegionStore};

/// Split `text` into blocks separated by one or more blank lines.
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    lines
        .split(|line| line.is_empty())
        .filter(|block| !block.is_empty())
        .map(<[&str]>::to_vec)
        .collect()
}

/// Parse every `REGION` block out of `extradata` and commit the well-formed
/// ones (non-empty `id`) into `store`; a region block with no `id` line is
/// discarded.
pub fn load_extradata(extradata: &str, store: &mut RegionStore) {
    for block in blocks(extradata) {
        let Some((&first, rest)) = block.split_first() else {
            continue;
        };
        if first.trim() != "REGION" {
            continue;
        }

        let mut region = Region::default();
        for line in rest {
            parse_region_tuple(line, &mut region);
        }
        if region.id.is_some() {
            store.add_named_region(region);
        }
    }
}
