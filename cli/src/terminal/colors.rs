use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 120 };
pub const ACCENT: Color = Color::TrueColor { r: 230, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 210, g: 210, b: 210 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 100, g: 170, b: 240 };
pub const LOCATION: Color = Color::TrueColor { r: 200, g: 150, b: 230 };
pub const PROVIDER: Color = Color::TrueColor { r: 150, g: 210, b: 210 };
pub const SENTINEL: Color = Color::Red;
