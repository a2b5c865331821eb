use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor { r: 150, g: 230, b: 150 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 130, g: 210, b: 210 };
pub const ONLINE: Color = Color::Green;
pub const OFFLINE: Color = Color::Red;
pub const MUTED: Color = Color::BrightBlack;
