use crossterm::event::{KeyCode, KeyEvent};

use super::app::App;

pub(super) enum Modal {
    Confirm {
        message: String,
        action: PendingAction,
    },
    Input {
        prompt: String,
        buf: String,
        action: InputAction,
    },
}

pub(super) enum PendingAction {
    Delete { url: String, pathname: String },
}

pub(super) enum InputAction {
    Upload { target: Vec<String> },
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.modal.take() else {
        return;
    };

    match modal {
        Modal::Confirm { message, action } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => match action {
                PendingAction::Delete { url, pathname } => app.run_delete(&url, &pathname),
            },
            KeyCode::Char('n') | KeyCode::Esc => {
                app.set_status("cancelled");
            }
            _ => {
                // Unrecognized key: keep the modal up.
                app.modal = Some(Modal::Confirm { message, action });
            }
        },

        Modal::Input {
            prompt,
            mut buf,
            action,
        } => match key.code {
            KeyCode::Enter => {
                let input = buf.trim().to_string();
                if input.is_empty() {
                    app.set_status("cancelled");
                } else {
                    match action {
                        InputAction::Upload { target } => app.run_upload(&input, target),
                    }
                }
            }
            KeyCode::Esc => {
                app.set_status("cancelled");
            }
            KeyCode::Backspace => {
                buf.pop();
                app.modal = Some(Modal::Input { prompt, buf, action });
            }
            KeyCode::Char(c) => {
                buf.push(c);
                app.modal = Some(Modal::Input { prompt, buf, action });
            }
            _ => {
                app.modal = Some(Modal::Input { prompt, buf, action });
            }
        },
    }
}
