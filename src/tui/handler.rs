use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    SwitchMode,
    Submit,
    OpenPost,
    ShowHelp,
    HideHelp,
    DismissAlert,
    // Text input actions
    InputChar(char),
    InputBackspace,
    ClearInput,
}

pub fn handle_key_event(key: KeyEvent, show_help: bool, alert_active: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    // Alerts block everything until dismissed
    if alert_active {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(AppAction::DismissAlert),
            _ => None,
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Some(AppAction::OpenPost),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(AppAction::ClearInput),

        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Some(AppAction::SwitchMode),
        (KeyCode::Enter, _) => Some(AppAction::Submit),
        (KeyCode::F(1), _) => Some(AppAction::ShowHelp),

        (KeyCode::Backspace, _) => Some(AppAction::InputBackspace),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            Some(AppAction::InputChar(c))
        }

        _ => None,
    }
}
