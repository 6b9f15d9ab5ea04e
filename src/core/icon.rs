//! Icon glyphs used to decorate log lines
//!
//! Every emission method has a default icon; sinks only render it when
//! icon decoration is enabled. `log_icon` accepts any string, these are
//! just the common ones.

pub const HAMMER: &str = "\u{1F528}";
pub const FIRE: &str = "\u{1F525}";
pub const WRENCH: &str = "\u{1F527}";
pub const KEY: &str = "\u{1F511}";
pub const LOCK: &str = "\u{1F512}";
pub const OPEN_LOCK: &str = "\u{1F513}";
pub const BELL: &str = "\u{1F514}";
pub const MAGNIFYING_GLASS: &str = "\u{1F50D}";
pub const BOOK: &str = "\u{1F4D4}";
pub const BULB: &str = "\u{1F4A1}";
pub const BOMB: &str = "\u{1F4A3}";
pub const LARGE_WHITE_SQUARE: &str = "\u{2B1C}";
pub const CIRCLE: &str = "\u{26AB}";
pub const WARNING: &str = "\u{26A0}";
pub const RIGHT_ARROW: &str = "\u{25B6}";
pub const HOUR_GLASS: &str = "\u{231B}";
pub const INFO: &str = "\u{2139}";
pub const FLAG: &str = "\u{1F6A9}";
pub const ROCKET: &str = "\u{1F680}";
pub const CHECK_MARK: &str = "\u{2705}";
pub const CROSS_MARK: &str = "\u{274C}";
pub const REVOLVING_LIGHT: &str = "\u{1F6A8}";
pub const BLACK_SQUARE: &str = "\u{25FE}";
pub const FOLDER: &str = "\u{1F4C1}";
pub const CLIPBOARD: &str = "\u{1F4CB}";
pub const EXCLAMATION_MARK: &str = "\u{2755}";
pub const ASTERISK: &str = "\u{2733}";
pub const RIGHT_HAND: &str = "\u{1F449}";
pub const CHECKBOX: &str = "\u{2611}";
pub const THUMBS_UP: &str = "\u{1F44D}";
pub const THUMBS_DOWN: &str = "\u{1F44E}";
pub const PAGE: &str = "\u{1F4C4}";
