use petnamer_core::{
    Category, Command, Config, Coordinator, HttpClient, NotificationId, ReqwestHttpClient,
};
use ratatui::layout::Rect;
use std::time::Instant;

use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusArea {
    Controls,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    SelectCategory(Category),
    DecreaseCount,
    IncreaseCount,
    Generate,
    Random,
    Copy,
    CopyName(usize),
    Fact,
    DismissNotification(NotificationId),
    Quit,
}

/// Clickable region recorded while drawing.
#[derive(Clone, Debug)]
pub struct HitTarget {
    pub rect: Rect,
    pub action: UiAction,
}

pub struct App<C: HttpClient = ReqwestHttpClient> {
    pub coordinator: Coordinator<C>,
    pub config: Config,
    pub theme: Theme,
    pub focus: FocusArea,
    pub result_cursor: usize,
    pub hit_targets: Vec<HitTarget>,
    pub tick_count: u64,
    pub show_debug: bool,
    pub log_path: Option<String>,
    pub initial_pet: Option<Category>,
    pub dirty: bool,
}

impl<C: HttpClient> App<C> {
    pub fn new(config: Config, coordinator: Coordinator<C>, log_path: Option<String>) -> Self {
        let theme = Theme::from_config(&config.theme);
        Self {
            coordinator,
            config,
            theme,
            focus: FocusArea::Controls,
            result_cursor: 0,
            hit_targets: Vec::new(),
            tick_count: 0,
            show_debug: false,
            log_path,
            initial_pet: None,
            dirty: true,
        }
    }

    /// Startup requests: service probe and the first fact. A preselected
    /// pet type loads its own fact instead of a global one.
    pub fn start(&mut self) {
        self.coordinator.dispatch(Command::CheckHealth);
        match self.initial_pet {
            Some(category) => self.coordinator.dispatch(Command::SelectCategory(category)),
            None => self.coordinator.dispatch(Command::LoadGlobalFact),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.tick_count += 1;
        if self.coordinator.pump(now) {
            self.dirty = true;
        }
        self.clamp_result_cursor();
    }

    pub fn result_count(&self) -> usize {
        self.coordinator.reconciler().names().len()
    }

    pub fn move_result_cursor(&mut self, forward: bool) {
        let len = self.result_count();
        if len == 0 {
            return;
        }
        self.result_cursor = if forward {
            (self.result_cursor + 1) % len
        } else {
            (self.result_cursor + len - 1) % len
        };
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusArea::Controls if self.result_count() > 0 => FocusArea::Results,
            _ => FocusArea::Controls,
        };
    }

    fn clamp_result_cursor(&mut self) {
        let len = self.result_count();
        if len == 0 {
            self.result_cursor = 0;
            self.focus = FocusArea::Controls;
        } else if self.result_cursor >= len {
            self.result_cursor = len - 1;
        }
    }

    pub fn action_at(&self, col: u16, row: u16) -> Option<UiAction> {
        // Later targets are drawn on top (notifications last).
        self.hit_targets
            .iter()
            .rev()
            .find(|target| point_in_rect(target.rect, col, row))
            .map(|target| target.action)
    }

    pub fn is_busy(&self) -> bool {
        self.coordinator.is_loading()
    }
}

pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
