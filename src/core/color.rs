//! ANSI color codes used to highlight interpolated words
//!
//! The default is the facade's highlight color, bright yellow.

use serde::{Deserialize, Serialize};

pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum ColorCode {
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
    BrightBlack = 90,
    BrightRed = 91,
    BrightGreen = 92,
    #[default]
    BrightYellow = 93,
    BrightBlue = 94,
    BrightMagenta = 95,
    BrightCyan = 96,
    BrightWhite = 97,
}

impl ColorCode {
    #[inline]
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Escape sequence that switches the foreground to this color
    pub fn escape(&self) -> String {
        format!("\x1b[{}m", self.code())
    }

    /// Wrap `text` in this color followed by a reset
    pub fn paint(&self, text: &str) -> String {
        format!("\x1b[{}m{}{}", self.code(), text, RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ColorCode::Black.code(), 30);
        assert_eq!(ColorCode::White.code(), 37);
        assert_eq!(ColorCode::BrightBlack.code(), 90);
        assert_eq!(ColorCode::BrightYellow.code(), 93);
    }

    #[test]
    fn test_paint() {
        assert_eq!(ColorCode::Red.paint("x"), "\x1b[31mx\x1b[0m");
        assert_eq!(ColorCode::BrightYellow.escape(), "\x1b[93m");
    }
}
