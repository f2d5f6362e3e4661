//! Layout and rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::app::{App, Button};
use crate::clock::Clock;
use crate::pet::{Meter, Mood};

mod colors {
    use ratatui::style::Color;
    pub const GREEN: Color = Color::Rgb(0, 180, 0);
    pub const RED: Color = Color::Rgb(180, 0, 0);
    pub const AMBER: Color = Color::Rgb(200, 140, 0);
    pub const DIM: Color = Color::DarkGray;
    pub const TEXT: Color = Color::White;
}

pub fn render<C: Clock>(frame: &mut Frame, app: &App<'_, C>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // face
            Constraint::Length(8), // gauges
            Constraint::Length(1), // message
            Constraint::Min(0),
            Constraint::Length(1), // buttons
        ])
        .split(area);

    render_face(frame, chunks[0], app);
    render_gauges(frame, chunks[1], app);
    frame.render_widget(
        Paragraph::new(Line::styled(app.message.as_str(), Style::default().fg(colors::TEXT))),
        chunks[2],
    );
    render_buttons(frame, chunks[4]);
}

/// Sprite for a mood
pub fn face(mood: Mood) -> [&'static str; 3] {
    match mood {
        Mood::Happy => [" /\\_/\\ ", "( ^.^ )", " > ~ < "],
        Mood::Content => [" /\\_/\\ ", "( o.o )", " > ^ < "],
        Mood::Hungry => [" /\\_/\\ ", "( o.O )", " > o < "],
        Mood::Sleepy => [" /\\_/\\  z", "( -.- ) z", " > _ < "],
        Mood::Dead => [" /\\_/\\ ", "( x.x )", " >   < "],
    }
}

fn render_face<C: Clock>(frame: &mut Frame, area: Rect, app: &App<'_, C>) {
    let color = match app.mood {
        Mood::Dead => colors::RED,
        Mood::Hungry | Mood::Sleepy => colors::AMBER,
        Mood::Happy | Mood::Content => colors::GREEN,
    };

    let mut lines: Vec<Line> = face(app.mood)
        .iter()
        .map(|l| Line::styled(*l, Style::default().fg(color)))
        .collect();
    lines.push(Line::styled(
        format!("{} is {}  (age {})", app.snapshot.name, app.mood, app.snapshot.age_display()),
        Style::default().fg(colors::TEXT),
    ));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Tomodachi ")),
        area,
    );
}

fn render_gauges<C: Clock>(frame: &mut Frame, area: Rect, app: &App<'_, C>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 4])
        .split(area);

    // hunger is the one meter where high is bad
    let s = &app.snapshot;
    let meters = [
        ("Hunger", s.hunger, true),
        ("Happiness", s.happiness, false),
        ("Energy", s.energy, false),
        ("Care", s.care, false),
    ];

    for ((label, meter, inverted), row) in meters.into_iter().zip(rows.iter()) {
        frame.render_widget(gauge(label, meter, inverted), *row);
    }
}

fn gauge(label: &str, meter: Meter, inverted: bool) -> Gauge<'_> {
    let goodness = if inverted { 1.0 - meter.ratio() } else { meter.ratio() };
    let color = if goodness < 0.25 {
        colors::RED
    } else if goodness < 0.5 {
        colors::AMBER
    } else {
        colors::GREEN
    };

    Gauge::default()
        .block(Block::default().title(label))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(meter.ratio().clamp(0.0, 1.0))
        .label(meter.to_string())
}

fn render_buttons(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for button in Button::ALL {
        spans.push(Span::styled(
            format!("[{}]", button.key()),
            Style::default().fg(colors::GREEN).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}  ", button.label()),
            Style::default().fg(colors::DIM),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
