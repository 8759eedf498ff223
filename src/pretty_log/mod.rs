use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Main,
    Second,
    Success,
    Warn,
    Error,
}

impl ThemeColor {
    fn color(&self) -> Color {
        match self {
            ThemeColor::Main => Color::White,
            ThemeColor::Second => Color::Grey,
            ThemeColor::Success => Color::Green,
            ThemeColor::Warn => Color::Yellow,
            ThemeColor::Error => Color::Red,
        }
    }
}

/// Prints one line in the theme color. Failures to write are ignored.
pub fn colored_println<W: Write>(stdout: &mut W, theme: ThemeColor, msg: &str) {
    let _ = execute!(
        stdout,
        SetForegroundColor(theme.color()),
        Print(msg),
        ResetColor,
        Print("\n"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored_println_writes_message() {
        let mut out: Vec<u8> = Vec::new();

        colored_println(&mut out, ThemeColor::Success, "done");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("done"));
        assert!(text.ends_with('\n'));
    }
}
