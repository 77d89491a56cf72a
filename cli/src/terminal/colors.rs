use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 160 };
pub const SECONDARY: Color = Color::TrueColor { r: 150, g: 170, b: 200 };
pub const ACCENT: Color = Color::TrueColor { r: 230, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 110, g: 190, b: 240 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 170, g: 140, b: 240 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 240, g: 150, b: 110 };

pub const ACTIVE: Color = Color::Green;
pub const STALE: Color = Color::Yellow;
pub const MISSING: Color = Color::Red;
