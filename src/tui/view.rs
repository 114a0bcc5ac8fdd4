use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::shared::{DisplayState, Phase, MAX_PICKS};

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, blink_on: bool) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status bar
            Constraint::Min(6),    // list / summary
            Constraint::Length(3), // feedback + keys
        ])
        .split(area);

    draw_status(frame, sections[0], state, blink_on);
    draw_body(frame, sections[1], state);
    draw_footer(frame, sections[2], state);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &DisplayState, blink_on: bool) {
    let clock = match state.phase {
        Phase::Playing => format!("{:>2}s", state.time_remaining),
        Phase::Guessing => format!("{:>2}s", state.guess_time_remaining),
        Phase::Idle | Phase::Ended => "--".to_string(),
    };
    // the clock blinks in the last few seconds
    let urgent = matches!(state.phase, Phase::Playing | Phase::Guessing)
        && current_clock(state) <= 5;
    let clock_style = if urgent && !blink_on {
        Style::default().fg(Color::DarkGray)
    } else if urgent {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", state.phase.label()),
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(clock, clock_style),
        Span::raw(format!("   score {}", state.score)),
        Span::raw(format!("   x{:.2}", state.multiplier)),
        Span::raw(format!("   playing {}", state.playing_count)),
    ]);
    let block = Block::default().borders(Borders::ALL).title(" noisequiz ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn current_clock(state: &DisplayState) -> u32 {
    match state.phase {
        Phase::Guessing => state.guess_time_remaining,
        _ => state.time_remaining,
    }
}

fn draw_body(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let (title, lines): (&str, Vec<Line<'static>>) = match state.phase {
        Phase::Idle => (
            " who is listening? ",
            state
                .recipients
                .iter()
                .take(MAX_PICKS)
                .enumerate()
                .map(|(i, r)| pick_line(i, &r.label, r.selected, false))
                .collect(),
        ),
        Phase::Playing | Phase::Guessing => (
            " what do you hear? ",
            state
                .guessable
                .iter()
                .take(MAX_PICKS)
                .enumerate()
                .map(|(i, g)| pick_line(i, &g.label, g.pending, g.credited))
                .collect(),
        ),
        Phase::Ended => (" round over ", summary_lines(state)),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pick_line(i: usize, label: &str, marked: bool, credited: bool) -> Line<'static> {
    let mark = if credited {
        "✓"
    } else if marked {
        "●"
    } else {
        " "
    };
    let style = if credited {
        Style::default().fg(Color::Green)
    } else if marked {
        Style::default().fg(Color::LightMagenta)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!(" {} [{}] {}", i + 1, mark, label), style))
}

fn summary_lines(state: &DisplayState) -> Vec<Line<'static>> {
    let Some(summary) = &state.summary else {
        return vec![];
    };
    vec![
        Line::from(Span::styled(
            format!(" final score: {}", summary.final_score),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(" you heard: {}", summary.sounds_text)),
        Line::from(format!(" listening: {}", summary.recipients_text)),
    ]
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let keys = match state.phase {
        Phase::Idle => "1-9 pick listeners  space start  esc quit",
        Phase::Playing => "1-9 guess  [ / ] less/more time  space replay  r reset",
        Phase::Guessing => "1-9 mark  enter apply  r reset",
        Phase::Ended => "r new game  esc quit",
    };
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", state.feedback),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(format!(" {keys}"), Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
