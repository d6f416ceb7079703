//! Clickable UI building blocks.
//!
//! [`ClickableList`] keeps rendered lines and their click actions together so
//! a target always lands on the row its text ends up on.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickTargets;

/// Lines paired with click actions.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("You've clicked 3 times"));
/// cl.push_clickable(Line::from("[Space] Summon the Lizard"), SUMMON);
/// cl.register_targets(area, &mut ct, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that triggers `action_id` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for each clickable line (one line = one row).
    ///
    /// `top_offset` / `bottom_offset` are the rows taken by borders.
    pub fn register_targets(&self, area: Rect, ct: &mut ClickTargets, top_offset: u16, bottom_offset: u16) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            ct.add_row_target(area, row, action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_rows_follow_line_order() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("summon"), 10);
        cl.push(Line::from("footer"));
        cl.push_clickable(Line::from("again"), 11);
        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 40, 10);
        let mut ct = ClickTargets::new();
        cl.register_targets(area, &mut ct, 1, 1);

        assert_eq!(ct.targets.len(), 2);
        assert_eq!(ct.hit_test(3, 6), None); // header
        assert_eq!(ct.hit_test(3, 7), Some(10));
        assert_eq!(ct.hit_test(3, 8), None); // footer
        assert_eq!(ct.hit_test(3, 9), Some(11));
    }

    #[test]
    fn lines_below_the_area_are_skipped() {
        let mut cl = ClickableList::new();
        for i in 0..5 {
            cl.push_clickable(Line::from(format!("row {i}")), i);
        }
        // 4 rows tall with borders → 2 content rows
        let area = Rect::new(0, 0, 20, 4);
        let mut ct = ClickTargets::new();
        cl.register_targets(area, &mut ct, 1, 1);

        assert_eq!(ct.targets.len(), 2);
        assert_eq!(ct.hit_test(0, 1), Some(0));
        assert_eq!(ct.hit_test(0, 2), Some(1));
        assert_eq!(ct.hit_test(0, 3), None);
    }

    #[test]
    fn into_lines_keeps_everything() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("a"));
        cl.push_clickable(Line::from("b"), 1);
        assert_eq!(cl.into_lines().len(), 2);
    }
}
