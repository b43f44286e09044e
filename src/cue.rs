//! Cue object: identity + time interval + settings + DOM + line count.

use crate::{
    dom::{build_dom, Dom},
    settings::CueSettings,
    time::Interval,
};

/// A single WebVTT cue, as reconstructed from a `vttc`/`vttx` box.
#[derive(Debug, Clone)]
pub struct Cue {
    pub id: Option<String>,
    pub interval: Interval,
    pub settings: CueSettings,
    pub dom: Dom,
    /// Visual line count the cue occupies; `0` while `dom` is empty.
    pub lines: usize,
}

impl Cue {
    /// A cue with no id, default settings, and an empty DOM.
    #[must_use]
    pub fn new(interval: Interval) -> Self {
        Self {
            id: None,
            interval,
            settings: CueSettings::default(),
            dom: Dom::default(),
            lines: 0,
        }
    }

    /// Populate the DOM from a `payl` box payload. Idempotent: a no-op if
    /// the cue already has a DOM.
    pub fn set_payload(&mut self, payload: &str) {
        if !self.dom.is_empty() {
            return;
        }
        let (dom, lines) = build_dom(payload);
        self.dom = dom;
        self.lines = lines;
    }

    /// Reduce this cue by one visual line.
    ///
    /// Returns `None` (the cue is fully consumed / should be destroyed) when
    /// it already occupies at most one line, or — defensively — when no
    /// text node anywhere in the DOM contains a newline to split on.
    #[must_use]
    pub fn reduce(mut self) -> Option<Cue> {
        if self.lines <= 1 {
            return None;
        }

        let newline_holder = self
            .dom
            .iter()
            .find(|(_, node)| node.text().is_some_and(|t| t.contains('\n')))
            .map(|(id, _)| id);

        let Some(newline_id) = newline_holder else {
            return None;
        };

        for (id, node) in self.dom.iter() {
            if id == newline_id {
                break;
            }
            if node.text().is_some() {
                if let Some(text) = self.dom.text_mut(id) {
                    text.clear();
                }
            }
        }

        if let Some(text) = self.dom.text_mut(newline_id) {
            let after = text.split_once('\n').map_or("", |(_, after)| after);
            *text = after.to_string();
        }
        self.lines -= 1;

        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn interval(start: i64, stop: i64) -> Interval {
        Interval::new(Timestamp::new(start), Timestamp::new(stop))
    }

    #[test]
    fn new_cue_is_empty() {
        let cue = Cue::new(interval(0, 10));
        assert_eq!(cue.lines, 0);
        assert!(cue.dom.is_empty());
    }

    #[test]
    fn reduce_single_line_cue_destroys_it() {
        let mut cue = Cue::new(interval(0, 10));
        cue.set_payload("one line");
        assert_eq!(cue.lines, 1);
        assert!(cue.reduce().is_none());
    }

    #[test]
    fn reduce_multiline_cue_drops_first_line() {
        let mut cue = Cue::new(interval(0, 10));
        cue.set_payload("a\nb\nc");
        assert_eq!(cue.lines, 3);

        let cue = cue.reduce().expect("two lines remain");
        assert_eq!(cue.lines, 2);
        let text: String = cue
            .dom
            .iter()
            .filter_map(|(_, n)| n.text())
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(text, "b\nc");

        let cue = cue.reduce().expect("one line remains");
        assert_eq!(cue.lines, 1);
        let text: String = cue
            .dom
            .iter()
            .filter_map(|(_, n)| n.text())
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(text, "c");

        assert!(cue.reduce().is_none());
    }

    #[test]
    fn reduce_clears_leading_newline_free_text_nodes() {
        let mut cue = Cue::new(interval(0, 10));
        cue.set_payload("Hello <b>world\nagain</b>");
        assert_eq!(cue.lines, 2);

        let cue = cue.reduce().expect("one line remains");
        assert_eq!(cue.lines, 1);
        // "Hello " preceded the newline holder and had no newline of its
        // own: it is cleared rather than removed outright.
        let texts: Vec<&str> = cue.dom.iter().filter_map(|(_, n)| n.text()).collect();
        assert_eq!(texts, vec!["", "again"]);
    }

    #[test]
    fn idempotent_payload_assignment() {
        let mut cue = Cue::new(interval(0, 10));
        cue.set_payload("first");
        cue.set_payload("second");
        let texts: Vec<&str> = cue.dom.iter().filter_map(|(_, n)| n.text()).collect();
        assert_eq!(texts, vec!["first"]);
    }
}
