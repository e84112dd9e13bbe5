//! Split the terminal into sidebar, message pane, composer, and hint line.

use ratatui::layout::Rect;

/// Fixed sidebar width, border included.
pub const SIDEBAR_WIDTH: u16 = 24;

/// One hint line at the very bottom.
pub const STATUS_HEIGHT: u16 = 1;

/// The composer grows with newlines up to this many content lines.
pub const MAX_INPUT_LINES: u16 = 5;

/// Regions for one frame.
#[derive(Debug, Clone)]
pub struct ScreenSplits {
    /// Conversation list on the left.
    pub sidebar: Rect,
    /// Message pane; collapses to zero height on tiny terminals.
    pub chat: Rect,
    /// Composer (bordered, `input_height` content lines inside).
    pub input: Rect,
    /// Key hints at the bottom.
    pub status: Rect,
}

/// Carve `area` into the four regions. `input_height` is the composer's
/// content line count; two border rows are added here.
pub fn screen_splits(area: Rect, input_height: u16) -> ScreenSplits {
    let sidebar_w = SIDEBAR_WIDTH.min(area.width);
    let input_h = input_height.saturating_add(2);

    let sidebar = Rect {
        x: area.x,
        y: area.y,
        width: sidebar_w,
        height: area.height.saturating_sub(STATUS_HEIGHT),
    };

    let main_x = area.x.saturating_add(sidebar_w);
    let main_w = area.width.saturating_sub(sidebar_w);
    let chat_h = area
        .height
        .saturating_sub(input_h.saturating_add(STATUS_HEIGHT));

    let chat = Rect {
        x: main_x,
        y: area.y,
        width: main_w,
        height: chat_h,
    };
    let input = Rect {
        x: main_x,
        y: area.y.saturating_add(chat_h),
        width: main_w,
        height: input_h.min(area.height.saturating_sub(STATUS_HEIGHT + chat_h)),
    };
    let status = Rect {
        x: area.x,
        y: area.y.saturating_add(area.height.saturating_sub(STATUS_HEIGHT)),
        width: area.width,
        height: STATUS_HEIGHT.min(area.height),
    };

    ScreenSplits {
        sidebar,
        chat,
        input,
        status,
    }
}
