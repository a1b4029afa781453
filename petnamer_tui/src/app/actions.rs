use petnamer_core::{Command, CountDirection, HttpClient};

use crate::app::state::{App, FocusArea, UiAction};

/// Applies one UI action. Returns true when the app should quit.
pub fn perform_action<C: HttpClient>(app: &mut App<C>, action: UiAction) -> bool {
    tracing::debug!(?action, "ui action");
    let coordinator = &mut app.coordinator;

    match action {
        UiAction::Quit => return true,
        UiAction::SelectCategory(category) => {
            coordinator.dispatch(Command::SelectCategory(category));
        }
        UiAction::DecreaseCount => {
            coordinator.dispatch(Command::AdjustCount(CountDirection::Decrease));
        }
        UiAction::IncreaseCount => {
            coordinator.dispatch(Command::AdjustCount(CountDirection::Increase));
        }
        UiAction::Generate => {
            if coordinator.controls_enabled() {
                coordinator.dispatch(Command::GenerateNames);
            }
        }
        UiAction::Random => {
            if coordinator.controls_enabled() {
                coordinator.dispatch(Command::RandomName);
            }
        }
        UiAction::Copy => {
            if coordinator.reconciler().has_results() {
                coordinator.dispatch(Command::CopyResults);
            }
        }
        UiAction::CopyName(index) => {
            app.result_cursor = index;
            app.focus = FocusArea::Results;
            app.coordinator.dispatch(Command::CopyName(index));
        }
        UiAction::Fact => coordinator.dispatch(Command::LoadGlobalFact),
        UiAction::DismissNotification(id) => coordinator.dispatch(Command::Dismiss(id)),
    }

    app.dirty = true;
    false
}
