use ratatui::style::Color;

use crate::app::FlashKind;

pub const ACCENT: Color = Color::Rgb(0x00, 0x79, 0xBF);

pub fn priority_color(priority: &str) -> Color {
    match priority {
        "Urgent" => Color::Red,
        "High" => Color::Yellow,
        "Medium" => Color::Blue,
        "Low" => Color::Gray,
        _ => Color::Gray,
    }
}

pub fn flash_color(kind: FlashKind) -> Color {
    match kind {
        FlashKind::Info => Color::Yellow,
        FlashKind::Success => Color::Green,
        FlashKind::Error => Color::Red,
    }
}

pub fn auth_color(authenticated: Option<bool>) -> Color {
    match authenticated {
        Some(true) => Color::Green,
        Some(false) => Color::Red,
        None => Color::DarkGray,
    }
}
