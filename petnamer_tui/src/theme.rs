use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Base
    pub base_style: Style,
    pub border_style: Style,
    // Header
    pub header_title_style: Style,
    pub header_subtitle_style: Style,
    pub status_online_style: Style,
    pub status_offline_style: Style,
    // Category row / count
    pub category_style: Style,
    pub category_selected_style: Style,
    pub count_style: Style,
    // Buttons
    pub button_style: Style,
    pub button_disabled_style: Style,
    // Results
    pub tag_style: Style,
    pub tag_selected_style: Style,
    pub single_name_style: Style,
    pub placeholder_style: Style,
    // Fact / loading
    pub fact_style: Style,
    pub spinner_style: Style,
    // Footer
    pub footer_text_style: Style,
    pub footer_key_style: Style,
    // Notifications
    pub error_style: Style,
    pub success_style: Style,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "auto" => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light => Self::light(),
                dark_light::Mode::Default => Self::dark(),
            },
            _ => Self::retro(),
        }
    }

    pub fn retro() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let red_alert = Color::Rgb(255, 40, 40);
        let bg = Color::Black;

        Self {
            base_style: Style::default().fg(amber),
            border_style: Style::default().fg(amber_dim),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),
            status_online_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            status_offline_style: Style::default().fg(red_alert).add_modifier(Modifier::BOLD),

            category_style: Style::default().fg(amber_dim),
            category_selected_style: Style::default()
                .bg(amber)
                .fg(bg)
                .add_modifier(Modifier::BOLD),
            count_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),

            button_style: Style::default().fg(bg).bg(amber),
            button_disabled_style: Style::default().fg(amber_dim),

            tag_style: Style::default().fg(amber),
            tag_selected_style: Style::default().bg(amber).fg(bg),
            single_name_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            placeholder_style: Style::default().fg(amber_dim),

            fact_style: Style::default().fg(amber),
            spinner_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),

            footer_text_style: Style::default().fg(amber_dim),
            footer_key_style: Style::default().fg(bg).bg(amber),

            error_style: Style::default().fg(red_alert),
            success_style: Style::default().fg(bg).bg(amber),
        }
    }

    pub fn light() -> Self {
        let text_main = Color::Black;
        let text_dim = Color::DarkGray;
        let accent = Color::Blue;
        let red_alert = Color::Red;

        Self {
            base_style: Style::default().fg(text_main),
            border_style: Style::default().fg(accent),

            header_title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(text_dim),
            status_online_style: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            status_offline_style: Style::default().fg(red_alert).add_modifier(Modifier::BOLD),

            category_style: Style::default().fg(text_dim),
            category_selected_style: Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            count_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),

            button_style: Style::default().fg(Color::White).bg(accent),
            button_disabled_style: Style::default().fg(text_dim),

            tag_style: Style::default().fg(accent),
            tag_selected_style: Style::default().bg(accent).fg(Color::White),
            single_name_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            placeholder_style: Style::default().fg(text_dim),

            fact_style: Style::default().fg(text_main),
            spinner_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),

            footer_text_style: Style::default().fg(text_dim),
            footer_key_style: Style::default().fg(Color::White).bg(accent),

            error_style: Style::default().fg(red_alert),
            success_style: Style::default().fg(Color::White).bg(accent),
        }
    }

    pub fn dark() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let bg = Color::Rgb(14, 12, 10);
        let red_alert = Color::Rgb(255, 80, 80);

        Self {
            base_style: Style::default().fg(amber).bg(bg),
            border_style: Style::default().fg(amber_dim),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),
            status_online_style: Style::default()
                .fg(Color::Rgb(120, 220, 120))
                .add_modifier(Modifier::BOLD),
            status_offline_style: Style::default().fg(red_alert).add_modifier(Modifier::BOLD),

            category_style: Style::default().fg(amber_dim),
            category_selected_style: Style::default()
                .bg(amber)
                .fg(bg)
                .add_modifier(Modifier::BOLD),
            count_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),

            button_style: Style::default().fg(bg).bg(amber),
            button_disabled_style: Style::default().fg(amber_dim),

            tag_style: Style::default().fg(amber),
            tag_selected_style: Style::default().bg(amber).fg(bg),
            single_name_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            placeholder_style: Style::default().fg(amber_dim),

            fact_style: Style::default().fg(Color::White),
            spinner_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),

            footer_text_style: Style::default().fg(amber_dim),
            footer_key_style: Style::default().fg(bg).bg(amber),

            error_style: Style::default().fg(red_alert),
            success_style: Style::default().fg(bg).bg(amber),
        }
    }
}
