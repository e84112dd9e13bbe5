//! Terminal loop: raw mode, alternate screen, key handling, event drain.
//!
//! Keys are read on a dedicated thread so the loop never blocks on terminal
//! input while controller events are waiting to be drawn.

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc as tokio_mpsc;

use natter_core::{ChatCommand, ChatEvent};

use crate::runtime_events::apply_chat_event;
use crate::state::TuiState;
use crate::view;

const TICK: Duration = Duration::from_millis(50);

/// Run the TUI until the user quits. Controller events arrive on
/// `event_rx`; user actions leave as [ChatCommand]s on `command_tx`.
pub fn run_tui(
    mut event_rx: tokio_mpsc::UnboundedReceiver<ChatEvent>,
    command_tx: tokio_mpsc::UnboundedSender<ChatCommand>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::new();
    let result = run_loop(&mut terminal, &mut state, &mut event_rx, &command_tx);

    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    event_rx: &mut tokio_mpsc::UnboundedReceiver<ChatEvent>,
    command_tx: &tokio_mpsc::UnboundedSender<ChatCommand>,
) -> anyhow::Result<()> {
    let (key_tx, key_rx) = mpsc::channel();
    let _reader = std::thread::spawn(move || loop {
        if event::poll(TICK).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if key_tx.send(ev).is_err() {
                    break;
                }
            }
        }
    });

    loop {
        while let Ok(event) = event_rx.try_recv() {
            apply_chat_event(state, event);
        }

        // animate the typing marker while a reply pends
        let should_draw = state.needs_redraw || state.typing_visible();
        if should_draw {
            state.frame_count = state.frame_count.wrapping_add(1);
            terminal.draw(|frame| view::draw(frame, state))?;
            state.needs_redraw = false;
        }

        match key_rx.try_recv() {
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        let _ = command_tx.send(ChatCommand::NewConversation);
                    }
                    KeyCode::Tab => {
                        if let Some(next) = state.next_conversation() {
                            let _ = command_tx.send(ChatCommand::SwitchTo(next));
                        }
                    }
                    KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                        state.input_insert('\n');
                    }
                    KeyCode::Enter => {
                        // whitespace-only input is left for the pipeline's
                        // trim rule; don't even clear the composer for it
                        if !state.input_buffer.trim().is_empty() {
                            let line = state.input_take();
                            let _ = command_tx.send(ChatCommand::Send(line));
                        }
                    }
                    KeyCode::Backspace => state.input_backspace(),
                    KeyCode::Delete => state.input_delete(),
                    KeyCode::Left => state.input_cursor_left(),
                    KeyCode::Right => state.input_cursor_right(),
                    KeyCode::Home => state.input_cursor_home(),
                    KeyCode::End => state.input_cursor_end(),
                    KeyCode::Up => state.scroll_up(1),
                    KeyCode::Down => state.scroll_down(1),
                    KeyCode::PageUp => state.scroll_up(5),
                    KeyCode::PageDown => state.scroll_down(5),
                    KeyCode::Char(c) => state.input_insert(c),
                    _ => {}
                }
            }
            Ok(Event::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::ScrollUp => state.scroll_up(3),
                MouseEventKind::ScrollDown => state.scroll_down(3),
                _ => {}
            },
            Ok(Event::Resize(_, _)) => state.needs_redraw = true,
            Ok(_) => {}
            Err(mpsc::TryRecvError::Empty) => std::thread::sleep(TICK),
            Err(mpsc::TryRecvError::Disconnected) => break,
        }
    }
    Ok(())
}
