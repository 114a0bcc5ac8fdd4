use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::shared::{InputEvent, MAX_PICKS, TIME_STEP};

// poll for one key (or nothing) within `timeout` and map it to game input
pub fn poll_input(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(map_key(key.code).into_iter().collect());
    }
    Ok(vec![])
}

pub fn map_key(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(' ') => Some(InputEvent::StartRound),
        KeyCode::Enter => Some(InputEvent::ApplyGuesses),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Reset),
        KeyCode::Char('[') => Some(InputEvent::AdjustTime(-TIME_STEP)),
        KeyCode::Char(']') => Some(InputEvent::AdjustTime(TIME_STEP)),
        KeyCode::Char(c @ '1'..='9') => {
            let n = c as u8 - b'1';
            ((n as usize) < MAX_PICKS).then_some(InputEvent::Pick(n))
        }
        _ => None,
    }
}
