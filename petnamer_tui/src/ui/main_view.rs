use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use petnamer_core::{
    Category, HttpClient, NotificationId, OperationState, Presentation, ServiceStatus, Severity,
};

use crate::app::state::{App, FocusArea, HitTarget, UiAction};

pub fn ui<C: HttpClient>(f: &mut Frame, app: &mut App<C>) {
    let area = f.area();
    app.hit_targets.clear();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(main_layout_constraints(area, app.show_debug))
        .split(area);

    f.render_widget(Block::default().style(app.theme.base_style), area);

    // --- SECTION 1: HEADER ---
    render_header(f, app, main_layout[0]);

    // --- SECTION 2: PET TYPE ROW ---
    render_category_row(f, app, main_layout[1]);

    // --- SECTION 3: COUNT + ACTION BUTTONS ---
    render_controls_row(f, app, main_layout[2]);

    // --- SECTION 4: RESULTS ---
    render_results(f, app, main_layout[3]);

    // --- SECTION 5: FACT ---
    render_fact(f, app, main_layout[4]);

    // --- SECTION 6: FOOTER ---
    render_footer(f, app, main_layout[5]);

    // Toasts go last so they sit on top of the results pane.
    render_notifications(f, app, main_layout[3]);
}

fn main_layout_constraints(area: Rect, show_debug: bool) -> [Constraint; 6] {
    let short_height = area.height < 24;
    let fact_height = if short_height { 3 } else { 4 };
    let footer_height = if show_debug { 3 } else { 2 };
    [
        Constraint::Length(3),             // 1. Header
        Constraint::Length(3),             // 2. Pet types
        Constraint::Length(1),             // 3. Controls
        Constraint::Min(3),                // 4. Results
        Constraint::Length(fact_height),   // 5. Fact
        Constraint::Length(footer_height), // 6. Footer
    ]
}

fn render_header<C: HttpClient>(f: &mut Frame, app: &App<C>, area: Rect) {
    let theme = &app.theme;
    let very_narrow_width = area.width < 60;

    let header_text = if very_narrow_width {
        Line::from(vec![
            Span::styled(" PETNAMER ", theme.header_title_style),
            Span::styled(" // NAMES ", theme.header_subtitle_style),
        ])
    } else {
        Line::from(vec![
            Span::styled(" P E T N A M E R ", theme.header_title_style),
            Span::styled(" // PET NAME GENERATOR v0.1 ", theme.header_subtitle_style),
        ])
    };

    let (status_label, status_style) = match app.coordinator.service_status() {
        ServiceStatus::Online => ("ONLINE", theme.status_online_style),
        ServiceStatus::Offline(_) => ("OFFLINE", theme.status_offline_style),
        ServiceStatus::Unknown => ("CHECKING", theme.header_subtitle_style),
    };
    let status = Line::from(vec![
        Span::styled(
            if very_narrow_width { " " } else { " SERVICE: " },
            theme.header_subtitle_style,
        ),
        Span::styled(status_label, status_style),
        Span::raw(" "),
    ]);

    let header = Paragraph::new(header_text).style(theme.base_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style)
            .title(status),
    );
    f.render_widget(header, area);
}

fn render_category_row<C: HttpClient>(f: &mut Frame, app: &mut App<C>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style)
        .title(Span::styled(" PET TYPE ", app.theme.header_title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let selected = app.coordinator.selection().category();
    let right = inner.x.saturating_add(inner.width);
    let mut x = inner.x.saturating_add(1);
    for category in Category::ALL {
        let label = format!(" {} ", category.display_name());
        let width = label.chars().count() as u16;
        if x.saturating_add(width) > right {
            break;
        }
        let rect = Rect::new(x, inner.y, width, 1);
        let style = if selected == Some(category) {
            app.theme.category_selected_style
        } else {
            app.theme.category_style
        };
        f.render_widget(Paragraph::new(label).style(style), rect);
        app.hit_targets.push(HitTarget {
            rect,
            action: UiAction::SelectCategory(category),
        });
        x = x.saturating_add(width + 2);
    }
}

fn compact_button_label(label: &str) -> &str {
    match label {
        "GENERATE" => "GEN",
        "RANDOM" => "RAND",
        other => other,
    }
}

fn render_controls_row<C: HttpClient>(f: &mut Frame, app: &mut App<C>, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let theme = &app.theme;
    let enabled = app.coordinator.controls_enabled();
    let has_results = app.coordinator.reconciler().has_results();
    let count = app.coordinator.selection().count().get();
    let compact = area.width < 72;

    let button = |label: &str, active: bool| {
        let label = if compact {
            compact_button_label(label)
        } else {
            label
        };
        let style = if active {
            theme.button_style
        } else {
            theme.button_disabled_style
        };
        (format!(" [{}] ", label), style)
    };

    let mut items: Vec<(Option<UiAction>, String, Style)> = Vec::with_capacity(9);
    items.push((None, " COUNT".to_string(), theme.footer_text_style));
    items.push((Some(UiAction::DecreaseCount), "[-]".to_string(), theme.button_style));
    items.push((None, format!("{:>2}", count), theme.count_style));
    items.push((Some(UiAction::IncreaseCount), "[+]".to_string(), theme.button_style));
    for (action, label, active) in [
        (UiAction::Generate, "GENERATE", enabled),
        (UiAction::Random, "RANDOM", enabled),
        (UiAction::Copy, "COPY", has_results),
        (UiAction::Fact, "FACT", true),
    ] {
        let (text, style) = button(label, active);
        items.push((Some(action), text, style));
    }

    while !items.is_empty() && row_width(&items) > area.width {
        items.pop();
    }

    let constraints: Vec<Constraint> = items
        .iter()
        .map(|(_, text, _)| Constraint::Length(text.chars().count() as u16))
        .collect();
    let rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(1)
        .split(area);

    for ((action, text, style), rect) in items.into_iter().zip(rects.iter()) {
        f.render_widget(Paragraph::new(text).style(style), *rect);
        if let Some(action) = action {
            app.hit_targets.push(HitTarget {
                rect: *rect,
                action,
            });
        }
    }
}

fn row_width(items: &[(Option<UiAction>, String, Style)]) -> u16 {
    let text: usize = items.iter().map(|(_, t, _)| t.chars().count()).sum();
    (text + items.len().saturating_sub(1)) as u16
}

fn render_results<C: HttpClient>(f: &mut Frame, app: &mut App<C>, area: Rect) {
    let busy = app.is_busy();
    let results_focused = app.focus == FocusArea::Results;
    let presentation = app.coordinator.reconciler().presentation();

    let title = match presentation {
        Presentation::Tags(names) => format!(" NAMES ({}) ", names.len()),
        _ => " NAMES ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style)
        .title(Span::styled(title, app.theme.header_title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut content = inner;
    if busy && inner.height > 1 {
        let spinner = ["|", "/", "-", "\\"];
        let frame = spinner[(app.tick_count as usize / 2) % spinner.len()];
        let line = Line::from(vec![
            Span::styled(format!(" {} ", frame), app.theme.spinner_style),
            Span::styled("FETCHING...", app.theme.header_subtitle_style),
        ]);
        let spinner_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        f.render_widget(Paragraph::new(line), spinner_row);
        content.height -= 1;
    }

    match presentation {
        Presentation::Empty => {
            let hint = if app.coordinator.selection().category().is_none() {
                "Choose a pet type with ←/→ or a click to get started."
            } else {
                "Press SPACE to generate names, or R for a single random name."
            };
            let para = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(format!(" {}", hint), app.theme.placeholder_style)),
            ])
            .wrap(Wrap { trim: false });
            f.render_widget(para, content);
        }
        Presentation::Single(name) => {
            if content.height < 2 {
                return;
            }
            let label = truncate_with_ellipsis(&format!(" {} ", name), content.width as usize);
            let rect = Rect::new(
                content.x + 1.min(content.width),
                content.y + 1,
                (label.chars().count() as u16).min(content.width),
                1,
            );
            let style = if results_focused {
                app.theme.tag_selected_style
            } else {
                app.theme.single_name_style
            };
            f.render_widget(Paragraph::new(label).style(style), rect);
            app.hit_targets.push(HitTarget {
                rect,
                action: UiAction::CopyName(0),
            });
        }
        Presentation::Tags(names) => {
            let rects = layout_tags(names, content);
            for (index, (name, rect)) in names.iter().zip(rects.iter()).enumerate() {
                let label = truncate_with_ellipsis(&format!(" {} ", name), rect.width as usize);
                let style = if results_focused && index == app.result_cursor {
                    app.theme.tag_selected_style
                } else {
                    app.theme.tag_style
                };
                f.render_widget(Paragraph::new(label).style(style), *rect);
                app.hit_targets.push(HitTarget {
                    rect: *rect,
                    action: UiAction::CopyName(index),
                });
            }
        }
    }
}

/// Places tags left to right, wrapping with a blank row between lines.
/// Tags that no longer fit vertically are left out.
fn layout_tags(names: &[String], area: Rect) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(names.len());
    if area.width < 3 || area.height == 0 {
        return rects;
    }

    let left = area.x + 1;
    let right = area.x.saturating_add(area.width);
    let bottom = area.y.saturating_add(area.height);
    let (mut x, mut y) = (left, area.y);

    for name in names {
        let width = u16::try_from(name.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width - 1);
        if x > left && x.saturating_add(width) > right {
            x = left;
            y = y.saturating_add(2);
        }
        if y >= bottom {
            break;
        }
        rects.push(Rect::new(x, y, width, 1));
        x = x.saturating_add(width + 1);
    }
    rects
}

fn render_fact<C: HttpClient>(f: &mut Frame, app: &App<C>, area: Rect) {
    let title = if app.coordinator.facts_state() == OperationState::InFlight {
        " DID YOU KNOW? ... "
    } else {
        " DID YOU KNOW? "
    };
    let para = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.coordinator.reconciler().fact()),
        app.theme.fact_style,
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.border_style)
            .title(Span::styled(title, app.theme.header_title_style)),
    );
    f.render_widget(para, area);
}

fn render_footer<C: HttpClient>(f: &mut Frame, app: &App<C>, area: Rect) {
    let theme = &app.theme;
    let footer_block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style);
    let inner = footer_block.inner(area);
    f.render_widget(footer_block, area);

    let hints = if area.width < 100 {
        vec![
            ("←→", "PET"),
            ("SPC", "GEN"),
            ("R", "RAND"),
            ("C", "COPY"),
            ("F", "FACT"),
            ("TAB", "NAMES"),
            ("Q", "QUIT"),
        ]
    } else {
        vec![
            ("←/→", "PET"),
            ("↑/↓ 0-9", "COUNT"),
            ("SPACE", "GENERATE"),
            ("R", "RANDOM"),
            ("C", "COPY"),
            ("F", "FACT"),
            ("TAB", "NAMES"),
            ("ESC", "DISMISS"),
            ("Q", "QUIT"),
        ]
    };
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key_style));
        spans.push(Span::styled(format!(" {} ", label), theme.footer_text_style));
    }
    let mut lines = vec![Line::from(spans)];

    if app.show_debug {
        lines.push(Line::from(vec![
            Span::styled(" SERVER: ", theme.footer_text_style),
            Span::styled(app.coordinator.base_url(), theme.header_title_style),
            Span::styled("  NAMES: ", theme.footer_text_style),
            Span::styled(
                format!("{:?}", app.coordinator.names_state()).to_uppercase(),
                theme.header_title_style,
            ),
            Span::styled("  LAST: ", theme.footer_text_style),
            Span::styled(
                app.coordinator
                    .feedback()
                    .newest()
                    .map(|n| n.stamp())
                    .unwrap_or_else(|| "--:--:--".to_string()),
                theme.header_subtitle_style,
            ),
            Span::styled("  LOG: ", theme.footer_text_style),
            Span::styled(
                app.log_path.as_deref().unwrap_or("(disabled)"),
                theme.header_subtitle_style,
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines).style(theme.base_style), inner);
}

fn render_notifications<C: HttpClient>(f: &mut Frame, app: &mut App<C>, area: Rect) {
    let width = area.width.saturating_sub(2).min(48);
    if width < 12 {
        return;
    }

    let toasts: Vec<(NotificationId, String, Severity)> = app
        .coordinator
        .feedback()
        .notifications()
        .iter()
        .rev()
        .take(3)
        .map(|n| (n.id, n.message.clone(), n.severity))
        .collect();

    let x = area.x + area.width - width - 1;
    let bottom = area.y.saturating_add(area.height);
    let mut y = area.y + 1;
    for (id, message, severity) in toasts {
        let (icon, style) = match severity {
            Severity::Error => ("✖", app.theme.error_style),
            Severity::Success => ("✔", app.theme.success_style),
        };
        let text = format!("{} {}", icon, message);
        let height = wrapped_height(&text, width.saturating_sub(2)) + 2;
        if y.saturating_add(height) > bottom {
            break;
        }

        let rect = Rect::new(x, y, width, height);
        f.render_widget(Clear, rect);
        let toast = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(toast, rect);
        app.hit_targets.push(HitTarget {
            rect,
            action: UiAction::DismissNotification(id),
        });
        y += height;
    }
}

fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let chars = text.chars().count();
    (chars.div_ceil(width as usize)).max(1) as u16
}

fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let total = input.chars().count();
    if total <= max_chars {
        return input.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let keep = max_chars - 3;
    let prefix: String = input.chars().take(keep).collect();
    format!("{}...", prefix)
}
