use dashboard_render::Tone;
use iced::Color;

pub const MUTED: Color = Color::from_rgb(0.45, 0.47, 0.50);

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Primary => Color::from_rgb(0.05, 0.43, 0.99),
        Tone::Success => Color::from_rgb(0.10, 0.53, 0.33),
        Tone::Info => Color::from_rgb(0.05, 0.79, 0.94),
        Tone::Warning => Color::from_rgb(0.85, 0.62, 0.03),
        Tone::Danger => Color::from_rgb(0.86, 0.21, 0.27),
    }
}
