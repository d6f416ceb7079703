//! Input handling: normalized events, click targets and pixel → cell mapping.

use ratzilla::ratatui::layout::Rect;

/// Semantic action IDs for click targets.
pub mod actions {
    /// The lizard button itself.
    pub const SUMMON: u16 = 0;
}

/// Keyboard, mouse and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target.
    Click(u16),
}

impl InputEvent {
    /// Whether this event presses the lizard button.
    pub fn is_summon(&self) -> bool {
        match self {
            InputEvent::Key(c) => matches!(c, ' ' | '\n' | 'l' | 'L'),
            InputEvent::Click(id) => *id == actions::SUMMON,
        }
    }
}

/// A tappable terminal region.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame, plus the terminal size they refer to.
pub struct ClickTargets {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickTargets {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a frame: record the new size and forget old targets.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on `row`, ignored when the row is outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Later targets sit on top, so search newest first.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }

    /// Map a click relative to the grid's top-left corner onto a target.
    pub fn hit_test_pixels(&self, click_x: f64, click_y: f64, grid_w: f64, grid_h: f64) -> Option<u16> {
        let col = pixel_x_to_col(click_x, grid_w, self.terminal_cols)?;
        let row = pixel_y_to_row(click_y, grid_h, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

/// Compact layout below this width.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel Y (relative to the grid's top edge) → terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;
    if row >= terminal_rows { None } else { Some(row) }
}

/// Pixel X (relative to the grid's left edge) → terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}
