//! The transient awaiting-reply marker shown at the end of the message list.

use ratatui::text::{Line, Span};

use crate::layouts::{muted_style, typing_style};

const DOT_PHASES: [&str; 3] = ["·", "··", "···"];

/// Frames between animation steps (the loop redraws while a reply pends).
const FRAMES_PER_PHASE: u64 = 4;

/// One animated line, stepped by the draw loop's frame counter.
pub fn typing_indicator_line(frame_count: u64) -> Line<'static> {
    let phase = DOT_PHASES[((frame_count / FRAMES_PER_PHASE) % 3) as usize];
    Line::from(vec![
        Span::styled("│ ".to_string(), muted_style()),
        Span::styled(format!("typing {}", phase), typing_style()),
    ])
}
