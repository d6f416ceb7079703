//! Lizard button rendering: button, counters, milestone notice, explosions.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::engine::particle::ParticleKind;
use crate::engine::{Particle, RandomSource};
use crate::input::{actions::SUMMON, is_narrow_layout, ClickTargets};
use crate::session::Session;
use crate::widgets::ClickableList;

const LIZARD_ART: &[&str] = &[
    r"     __     ",
    r" .-'  o'-.  ",
    r"<__  ~~  _> ",
    r"   \/\/\/   ",
];

/// Same lizard, squashed while the button is pressed.
const LIZARD_PRESSED_ART: &[&str] = &[
    r"            ",
    r" .-'  -'-.  ",
    r"<__  ~~  _> ",
    r"   \/\/\/   ",
];

const COMPACT_ART: &str = "🦎";

/// Farthest particle distance maps to the edge of the area.
const MAX_DISTANCE: f64 = 500.0;

pub fn render<R: RandomSource>(session: &Session<R>, f: &mut Frame, ct: &mut ClickTargets) {
    let area = f.area();
    let narrow = is_narrow_layout(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(8),    // button + particles
            Constraint::Length(6), // counters
        ])
        .split(area);

    render_title(session, f, chunks[0]);
    let button = render_button(session, f, chunks[1], ct, narrow);
    render_particles(session, f, chunks[1], button);
    render_counters(session, f, chunks[2], ct);

    if let Some(notice) = session.notice() {
        render_notice(f, chunks[1], notice.text);
    }
}

fn render_title<R: RandomSource>(session: &Session<R>, f: &mut Frame, area: Rect) {
    let style = if session.is_golden_flash() {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let title = if session.is_golden_flash() {
        "✨ GOLDEN LIZARD ✨"
    } else {
        "Lizard Button"
    };
    let widget = Paragraph::new(Line::from(Span::styled(title, style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// Draw the button centred in `area` (shifted by the shake) and register it
/// as the summon target. Returns the button rect.
fn render_button<R: RandomSource>(
    session: &Session<R>,
    f: &mut Frame,
    area: Rect,
    ct: &mut ClickTargets,
    narrow: bool,
) -> Rect {
    let art: Vec<&str> = if narrow {
        vec![COMPACT_ART]
    } else if session.is_pressed() {
        LIZARD_PRESSED_ART.to_vec()
    } else {
        LIZARD_ART.to_vec()
    };
    let inner_w = art.iter().map(|l| Line::from(*l).width() as u16).max().unwrap_or(1);
    // art + label + borders
    let w = (inner_w.max(22) + 2).min(area.width);
    let h = (art.len() as u16 + 3).min(area.height);

    let shake = shake_offset(
        session.state().shake_intensity(),
        session.anim_frame(),
        !session.batches().is_empty(),
    );
    let button = centered(area, w, h, shake);

    let border_color = if session.is_golden_flash() {
        Color::Yellow
    } else if session.is_pressed() {
        Color::LightGreen
    } else {
        Color::Green
    };

    let mut lines: Vec<Line> = art
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Green))))
        .collect();
    lines.push(Line::from(Span::styled(
        "Summon the Lizard 🦎",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, button);
    ct.add_click_target(button, SUMMON);
    button
}

fn render_particles<R: RandomSource>(session: &Session<R>, f: &mut Frame, area: Rect, button: Rect) {
    let origin = (
        button.x + button.width / 2,
        button.y + button.height / 2,
    );
    let buf = f.buffer_mut();
    for live in session.batches() {
        let progress = live.progress();
        let style = match live.batch.kind() {
            ParticleKind::Golden => Style::default().fg(Color::Yellow),
            ParticleKind::Normal => Style::default().fg(Color::Green),
        };
        for p in live.batch.particles() {
            if let Some((x, y)) = project(p, progress, origin, area) {
                buf.set_string(x, y, p.kind.glyph(), style);
            }
        }
    }
}

fn render_counters<R: RandomSource>(
    session: &Session<R>,
    f: &mut Frame,
    area: Rect,
    ct: &mut ClickTargets,
) {
    let state = session.state();
    let mut cl = ClickableList::new();

    cl.push(Line::from(vec![
        Span::raw(" You've clicked "),
        Span::styled(
            format_count(state.local_clicks()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" times"),
    ]));
    cl.push(Line::from(vec![
        Span::raw(" Global Lizard Clicks: "),
        Span::styled(
            global_label(state.global_clicks()),
            Style::default().fg(Color::Cyan),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" {}", state.milestone_message()),
        Style::default().fg(Color::Magenta),
    )));
    cl.push_clickable(
        Line::from(Span::styled(
            " [L] Summon the Lizard",
            Style::default().fg(Color::DarkGray),
        )),
        SUMMON,
    );

    cl.register_targets(area, ct, 1, 1);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(widget, area);
}

fn render_notice(f: &mut Frame, area: Rect, text: &str) {
    let w = (Line::from(text).width() as u16 + 4).min(area.width);
    let popup = Rect::new(area.x + (area.width - w) / 2, area.y, w, 3u16.min(area.height));
    let widget = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(widget, popup);
}

// ── Layout helpers (pure) ──────────────────────────────────────

/// `w`×`h` rect centred in `area`, nudged `dx` columns and clamped inside.
fn centered(area: Rect, w: u16, h: u16, dx: i16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let base_x = area.x as i32 + (area.width - w) as i32 / 2 + dx as i32;
    let max_x = (area.x + area.width - w) as i32;
    let x = base_x.clamp(area.x as i32, max_x) as u16;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

/// Horizontal jitter in columns while an explosion is on screen.
/// Alternates direction every tick; up to ±5 columns at full intensity.
pub fn shake_offset(intensity: f64, frame: u32, active: bool) -> i16 {
    if !active {
        return 0;
    }
    let magnitude = (intensity / 4.0).round() as i16;
    if frame % 2 == 0 { magnitude } else { -magnitude }
}

/// Terminal cell for a particle `progress` of the way along its path from
/// `origin`, or `None` once it leaves `area`. Cells are about twice as tall
/// as they are wide, so vertical travel is halved.
pub fn project(p: &Particle, progress: f64, origin: (u16, u16), area: Rect) -> Option<(u16, u16)> {
    let reach = p.distance / MAX_DISTANCE * progress.clamp(0.0, 1.0);
    let half_w = area.width as f64 / 2.0;
    let half_h = area.height as f64 / 2.0;
    let x = origin.0 as f64 + p.angle.cos() * reach * half_w;
    let y = origin.1 as f64 + p.angle.sin() * reach * half_h;

    let (x, y) = (x.round(), y.round());
    let inside = x >= area.x as f64
        && x < (area.x + area.width) as f64 - 1.0
        && y >= area.y as f64
        && y < (area.y + area.height) as f64;
    if inside {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

/// "Loading..." until the first remote count arrives.
pub fn global_label(global: Option<u64>) -> String {
    match global {
        Some(n) => format_count(n),
        None => "Loading...".to_string(),
    }
}

/// Thousands separators: 1234567 → "1,234,567".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
