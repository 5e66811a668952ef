//! Keyboard input handling.
//!
//! Returns `Ok(true)` from `handle_input` when the application should quit.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    can_add_email_char, can_add_password_char, can_add_username_char, App, LoginFocus, Mode,
    RegisterFocus, Screen,
};

pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl-C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.mode {
        Mode::Login => handle_login_input(app, key).await,
        Mode::Register => handle_register_input(app, key).await,
        Mode::ConfirmingQuit => Ok(handle_quit_confirm_input(app, key)),
        Mode::Normal => handle_normal_input(app, key).await,
    }
}

async fn handle_normal_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // A new keypress dismisses the previous status line
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.mode = Mode::ConfirmingQuit;
        }
        KeyCode::Char('1') => app.navigate(Screen::Dashboard),
        KeyCode::Char('2') => app.navigate(Screen::Users),
        KeyCode::Char('3') => app.navigate(Screen::Settings),
        KeyCode::Char('h') => app.navigate(Screen::Home),
        KeyCode::Char('c') => app.toggle_sidebar(),
        KeyCode::Char('r') => {
            if app.session.is_authenticated() {
                app.refresh_profile().await;
            }
        }
        KeyCode::Char('x') => {
            if app.session.is_authenticated() {
                app.logout();
            }
        }
        KeyCode::Char('l') => {
            if !app.session.is_authenticated() {
                app.start_login();
            }
        }
        KeyCode::Char('n') => {
            if !app.session.is_authenticated() {
                app.start_register();
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => true,
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Normal;
            false
        }
        _ => false,
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Back to the landing screen; quitting stays a deliberate act
            app.mode = Mode::Normal;
            app.screen = Screen::Home;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            LoginFocus::Password => app.login_focus = LoginFocus::Button,
            LoginFocus::Button => app.attempt_login().await,
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_register_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.start_login();
        }
        KeyCode::Down | KeyCode::Tab => {
            app.register_focus = match app.register_focus {
                RegisterFocus::Username => RegisterFocus::Email,
                RegisterFocus::Email => RegisterFocus::Password,
                RegisterFocus::Password => RegisterFocus::Button,
                RegisterFocus::Button => RegisterFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.register_focus = match app.register_focus {
                RegisterFocus::Username => RegisterFocus::Button,
                RegisterFocus::Email => RegisterFocus::Username,
                RegisterFocus::Password => RegisterFocus::Email,
                RegisterFocus::Button => RegisterFocus::Password,
            };
        }
        KeyCode::Enter => match app.register_focus {
            RegisterFocus::Username => app.register_focus = RegisterFocus::Email,
            RegisterFocus::Email => app.register_focus = RegisterFocus::Password,
            RegisterFocus::Password => app.register_focus = RegisterFocus::Button,
            RegisterFocus::Button => app.attempt_register().await,
        },
        KeyCode::Backspace => match app.register_focus {
            RegisterFocus::Username => {
                app.register_username.pop();
            }
            RegisterFocus::Email => {
                app.register_email.pop();
            }
            RegisterFocus::Password => {
                app.register_password.pop();
            }
            RegisterFocus::Button => {}
        },
        KeyCode::Char(c) => match app.register_focus {
            RegisterFocus::Username => {
                if can_add_username_char(app.register_username.len(), c) {
                    app.register_username.push(c);
                }
            }
            RegisterFocus::Email => {
                if can_add_email_char(app.register_email.len(), c) {
                    app.register_email.push(c);
                }
            }
            RegisterFocus::Password => {
                if can_add_password_char(app.register_password.len(), c) {
                    app.register_password.push(c);
                }
            }
            RegisterFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}
