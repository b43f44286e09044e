//! Per-cue settings model.

use crate::value::{parse_percent, tuple_stream};

/// WebVTT alignment keyword, as used by both cue settings and region
/// declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Auto,
    Left,
    Center,
    Right,
    Start,
    End,
}

/// Settings attached to a single cue (the `sttg` box payload).
#[derive(Debug, Clone)]
pub struct CueSettings {
    pub region_id: Option<String>,
    pub vertical: Align,
    pub snap_to_lines: bool,
    /// Percentage in `[0, 1]`, or `-1.0` meaning unset.
    pub line: f32,
    pub line_align: Align,
    /// Percentage in `[0, 1]`, or `-1.0` meaning unset.
    pub position: f32,
    pub position_align: Align,
    pub size: f32,
    pub align: Align,
}

impl Default for CueSettings {
    fn default() -> Self {
        Self {
            region_id: None,
            vertical: Align::Auto,
            snap_to_lines: true,
            line: -1.0,
            line_align: Align::Start,
            position: -1.0,
            position_align: Align::Auto,
            size: 1.0,
            align: Align::Center,
        }
    }
}

impl CueSettings {
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "vertical" => {
                self.vertical = match value {
                    "rl" => Align::Right,
                    "lr" => Align::Left,
                    _ => Align::Auto,
                };
            }
            "line" => {
                if let Ok((_, v)) = parse_percent(value) {
                    self.line = v;
                }
                if let Some(comma) = value.find(',') {
                    self.line_align = match &value[comma + 1..] {
                        "center" => Align::Center,
                        "end" => Align::End,
                        _ => Align::Start,
                    };
                }
            }
            "position" => {
                if let Ok((_, v)) = parse_percent(value) {
                    self.position = v;
                }
                if let Some(comma) = value.find(',') {
                    self.position_align = match &value[comma + 1..] {
                        "line-left" => Align::Left,
                        "line-right" => Align::Right,
                        "center" => Align::Center,
                        _ => Align::Auto,
                    };
                }
            }
            "size" => {
                if let Ok((_, v)) = parse_percent(value) {
                    self.size = v;
                }
            }
            "region" => {
                self.region_id = Some(value.to_string());
            }
            "align" => {
                self.align = match value {
                    "start" => Align::Start,
                    "end" => Align::End,
                    "left" => Align::Left,
                    "right" => Align::Right,
                    _ => Align::Center,
                };
            }
            _ => {}
        }
    }
}

/// Parse a `sttg` box payload (space-separated `key:value` tuples) into a
/// [`CueSettings`], starting from defaults. Unknown keys, and malformed
/// values for known keys, are silently ignored.
#[must_use]
pub fn parse_cue_settings(payload: &str) -> CueSettings {
    let mut settings = CueSettings::default();
    for (key, value) in tuple_stream(payload, ' ', ':') {
        settings.apply(key, value);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let s = CueSettings::default();
        assert_eq!(s.vertical, Align::Auto);
        assert!(s.snap_to_lines);
        assert_eq!(s.line, -1.0);
        assert_eq!(s.position, -1.0);
        assert_eq!(s.size, 1.0);
        assert_eq!(s.align, Align::Center);
    }

    #[test]
    fn vertical_keywords() {
        assert_eq!(parse_cue_settings("vertical:rl").vertical, Align::Right);
        assert_eq!(parse_cue_settings("vertical:lr").vertical, Align::Left);
        assert_eq!(parse_cue_settings("vertical:bogus").vertical, Align::Auto);
    }

    #[test]
    fn line_with_alignment() {
        let s = parse_cue_settings("line:40%,end");
        assert_eq!(s.line, 0.4);
        assert_eq!(s.line_align, Align::End);
    }

    #[test]
    fn line_without_percent_keeps_default_value() {
        let s = parse_cue_settings("line:3,center");
        assert_eq!(s.line, -1.0);
        assert_eq!(s.line_align, Align::Center);
    }

    #[test]
    fn position_alignment_goes_to_position_align() {
        let s = parse_cue_settings("position:10%,line-left");
        assert_eq!(s.position, 0.1);
        assert_eq!(s.position_align, Align::Left);
    }

    #[test]
    fn region_and_size_and_align() {
        let s = parse_cue_settings("region:top size:50% align:right");
        assert_eq!(s.region_id.as_deref(), Some("top"));
        assert_eq!(s.size, 0.5);
        assert_eq!(s.align, Align::Right);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let s = parse_cue_settings("bogus:value align:left");
        assert_eq!(s.align, Align::Left);
    }
}
