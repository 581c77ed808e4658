use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Fixed-width bar for a count relative to the largest one.
pub fn intensity_bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || width == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).min(1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let intensity_idx = ((ratio * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1);

    LEVELS[intensity_idx].repeat(filled) + &"░".repeat(width - filled)
}

/// Dot colour for a commit, by size relative to the largest commit.
pub fn intensity_color(lines: usize, max: usize) -> Color {
    if max == 0 {
        return Color::White;
    }

    let ratio = lines as f64 / max as f64;
    if ratio > 0.8 {
        Color::Red
    } else if ratio > 0.6 {
        Color::Yellow
    } else if ratio > 0.4 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

pub const SELECTED_COLOR: Color = Color::LightMagenta;

pub fn label_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn heading_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_has_fixed_width() {
        assert_eq!(intensity_bar(0, 0, 3), "░░░");
        assert_eq!(intensity_bar(10, 10, 3), "███");
        assert_eq!(intensity_bar(5, 10, 4).chars().count(), 4);
    }

    #[test]
    fn colour_scales_with_size() {
        assert_eq!(intensity_color(10, 10), Color::Red);
        assert_eq!(intensity_color(1, 10), Color::Blue);
        assert_eq!(intensity_color(1, 0), Color::White);
    }
}
