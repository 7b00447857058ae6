use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const GROUP: Color = Color::BrightMagenta;
pub const FACT: Color = Color::BrightGreen;
pub const MISSING: Color = Color::BrightBlack;
