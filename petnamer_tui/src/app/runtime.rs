use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use petnamer_core::{Category, Command, HttpClient};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::{Duration, Instant};

use crate::app::actions::perform_action;
use crate::app::state::{App, FocusArea, UiAction};
use crate::ui::main_view::ui;

pub async fn run_app<C: HttpClient>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<C>,
) -> Result<()> {
    app.start();

    loop {
        app.tick(Instant::now());

        if app.dirty || app.is_busy() {
            terminal.draw(|f| ui(f, app))?;
            app.dirty = false;
        }

        let poll_ms = if app.is_busy() { 50 } else { 200 };
        if event::poll(Duration::from_millis(poll_ms))? {
            app.dirty = true;
            if handle_runtime_event(app, event::read()?) {
                return Ok(());
            }
        }
    }
}

fn handle_runtime_event<C: HttpClient>(app: &mut App<C>, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_press(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        _ => false,
    }
}

fn handle_key_press<C: HttpClient>(app: &mut App<C>, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => return perform_action(app, UiAction::Quit),
        KeyCode::Char('t') if ctrl => {
            app.show_debug = !app.show_debug;
            return false;
        }
        KeyCode::Char('q') => return perform_action(app, UiAction::Quit),
        KeyCode::Esc => {
            app.coordinator.dispatch(Command::DismissErrors);
            app.focus = FocusArea::Controls;
            return false;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return false;
        }
        _ => {}
    }

    if app.focus == FocusArea::Results {
        match key.code {
            KeyCode::Up | KeyCode::Left => {
                app.move_result_cursor(false);
                return false;
            }
            KeyCode::Down | KeyCode::Right => {
                app.move_result_cursor(true);
                return false;
            }
            KeyCode::Enter => {
                let index = app.result_cursor;
                return perform_action(app, UiAction::CopyName(index));
            }
            _ => {}
        }
    }

    let action = match key.code {
        KeyCode::Left => Some(UiAction::SelectCategory(
            app.coordinator
                .selection()
                .category()
                .map(Category::previous)
                .unwrap_or(Category::ALL[Category::ALL.len() - 1]),
        )),
        KeyCode::Right => Some(UiAction::SelectCategory(
            app.coordinator
                .selection()
                .category()
                .map(Category::next)
                .unwrap_or(Category::ALL[0]),
        )),
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => Some(UiAction::IncreaseCount),
        KeyCode::Down | KeyCode::Char('-') => Some(UiAction::DecreaseCount),
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Generate),
        KeyCode::Char('r' | 'R') => Some(UiAction::Random),
        KeyCode::Char('c' | 'C') => Some(UiAction::Copy),
        KeyCode::Char('f' | 'F') => Some(UiAction::Fact),
        KeyCode::Char(d) if d.is_ascii_digit() => {
            let n = d.to_digit(10).map(|n| if n == 0 { 10 } else { n }).unwrap_or(1);
            app.coordinator.dispatch(Command::SetCount(n as i64));
            None
        }
        _ => None,
    };

    match action {
        Some(action) => perform_action(app, action),
        None => false,
    }
}

fn handle_mouse_event<C: HttpClient>(app: &mut App<C>, mouse: MouseEvent) -> bool {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match app.action_at(mouse.column, mouse.row) {
                Some(action) => perform_action(app, action),
                None => false,
            }
        }
        MouseEventKind::ScrollUp if app.focus == FocusArea::Results => {
            app.move_result_cursor(false);
            false
        }
        MouseEventKind::ScrollDown if app.focus == FocusArea::Results => {
            app.move_result_cursor(true);
            false
        }
        _ => false,
    }
}
