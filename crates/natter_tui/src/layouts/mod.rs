//! Screen regions and shared styles.

mod split;
mod style;

pub use split::{screen_splits, ScreenSplits, MAX_INPUT_LINES, SIDEBAR_WIDTH, STATUS_HEIGHT};
pub use style::{
    active_entry_style, border_style, bot_accent_style, entry_style, muted_style, text_style,
    typing_style, user_accent_style,
};
