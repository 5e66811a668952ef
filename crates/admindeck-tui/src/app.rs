//! Application state for the admindeck TUI.
//!
//! `App` owns the core services (config, storage, auth, session store) and
//! all UI state: the active screen, the overlay mode, the login/register
//! forms, and the persisted sidebar collapse preference. It is also the one
//! place that reacts to an unauthorized response: every request error funnels
//! through [`App::handle_request_error`], which clears the stored session and
//! navigates back to the landing screen on 401.

use anyhow::Result;
use tracing::{info, warn};

use admindeck_core::models::{Credentials, Registration};
use admindeck_core::storage::SIDEBAR_COLLAPSED_KEY;
use admindeck_core::{
    ApiClient, ApiError, AuthService, Config, SessionAction, SessionStore, Storage,
};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// UI State Types
// ============================================================================

/// Navigable screens. `Home` is the unauthenticated landing screen; the rest
/// require a session and fall back to `Home` without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Dashboard,
    Users,
    Settings,
}

impl Screen {
    /// Get the display title for this screen.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Dashboard => "Dashboard",
            Screen::Users => "Users",
            Screen::Settings => "Settings",
        }
    }

    /// Sidebar entries, in order.
    pub const SIDEBAR: [Screen; 3] = [Screen::Dashboard, Screen::Users, Screen::Settings];
}

/// Overlay mode on top of the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Login,
    Register,
    ConfirmingQuit,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Register form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFocus {
    Username,
    Email,
    Password,
    Button,
}

// ============================================================================
// Input Validation
// ============================================================================

pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && !c.is_control()
}

pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && !c.is_control() && !c.is_whitespace()
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && !c.is_control()
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub storage: Storage,
    pub auth: AuthService,
    pub session: SessionStore,

    // UI state
    pub screen: Screen,
    pub mode: Mode,
    pub sidebar_collapsed: bool,
    pub status_message: Option<String>,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Register form state
    pub register_username: String,
    pub register_email: String,
    pub register_password: String,
    pub register_focus: RegisterFocus,
    pub register_error: Option<String>,
}

impl App {
    /// Create the application, wiring services from the platform config and
    /// data directories.
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        let storage = Storage::new(Config::data_dir()?);
        Self::with_parts(config, storage)
    }

    /// Create the application over an explicit config and storage root.
    pub fn with_parts(config: Config, storage: Storage) -> Result<Self> {
        let api = ApiClient::new(config.resolved_base_url(), storage.clone())?;
        let auth = AuthService::new(api, storage.clone());

        // Re-derive session state from storage once, at bootstrap
        let mut session = SessionStore::new();
        session.bootstrap(&auth);

        // Sidebar preference is read once at startup
        let sidebar_collapsed = storage
            .get(SIDEBAR_COLLAPSED_KEY)
            .is_some_and(|v| v == "true");

        let login_username = config.last_username.clone().unwrap_or_default();

        let (screen, mode) = if session.is_authenticated() {
            (Screen::Dashboard, Mode::Normal)
        } else {
            (Screen::Home, Mode::Login)
        };

        Ok(Self {
            config,
            storage,
            auth,
            session,

            screen,
            mode,
            sidebar_collapsed,
            status_message: None,

            login_username,
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,

            register_username: String::new(),
            register_email: String::new(),
            register_password: String::new(),
            register_focus: RegisterFocus::Username,
            register_error: None,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempt login with the credentials from the login form.
    pub async fn attempt_login(&mut self) {
        if self.login_username.is_empty() || self.login_password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return;
        }
        self.login_error = None;

        let credentials = Credentials {
            username: self.login_username.clone(),
            password: self.login_password.clone(),
        };

        match self.auth.login(&credentials).await {
            Ok(user) => {
                self.config.last_username = Some(user.username.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.status_message = Some(format!("Signed in as {}", user.username));
                self.session.dispatch(SessionAction::SetUser(user));
                self.login_password.clear();
                self.mode = Mode::Normal;
                self.screen = Screen::Dashboard;
            }
            Err(e) => {
                info!(error = %e, "Login failed");
                // The server's message is shown unchanged
                self.login_error = Some(e.to_string());
            }
        }
    }

    /// Attempt registration with the register form. A successful registration
    /// returns to the login form; it does not create a session.
    pub async fn attempt_register(&mut self) {
        if self.register_username.is_empty()
            || self.register_email.is_empty()
            || self.register_password.is_empty()
        {
            self.register_error = Some("All fields are required".to_string());
            return;
        }
        if !self.register_email.contains('@') {
            self.register_error = Some("Enter a valid email address".to_string());
            return;
        }
        self.register_error = None;

        let registration = Registration {
            username: self.register_username.clone(),
            email: self.register_email.clone(),
            password: self.register_password.clone(),
        };

        match self.auth.register(&registration).await {
            Ok(()) => {
                self.status_message = Some("Account created, please sign in".to_string());
                self.login_username = self.register_username.clone();
                self.register_username.clear();
                self.register_email.clear();
                self.register_password.clear();
                self.register_focus = RegisterFocus::Username;
                self.start_login();
            }
            Err(e) => {
                info!(error = %e, "Registration failed");
                self.register_error = Some(e.to_string());
            }
        }
    }

    /// Refresh the session's profile from the server. Used at startup to
    /// validate a rehydrated session and on demand from the dashboard.
    pub async fn refresh_profile(&mut self) {
        match self.auth.current_user().await {
            Ok(user) => {
                self.session.dispatch(SessionAction::SetUser(user));
            }
            Err(e) => self.handle_request_error(&e),
        }
    }

    /// Log out: clear the persisted session, reset the store, land on Home.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.session.dispatch(SessionAction::Logout);
        self.screen = Screen::Home;
        self.start_login();
        self.status_message = Some("Signed out".to_string());
    }

    /// Open the login overlay.
    pub fn start_login(&mut self) {
        self.mode = Mode::Login;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Open the register overlay.
    pub fn start_register(&mut self) {
        self.mode = Mode::Register;
        self.register_focus = RegisterFocus::Username;
        self.register_error = None;
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Single top-level reaction point for failed requests. Unauthorized
    /// clears the stored session and forces navigation to the landing
    /// screen; everything else surfaces as a status message.
    pub fn handle_request_error(&mut self, err: &anyhow::Error) {
        let unauthorized = err
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_unauthorized);
        if unauthorized {
            self.force_landing();
        } else {
            self.status_message = Some(err.to_string());
        }
    }

    /// The 401 path: storage clear plus redirect, in exactly one place.
    fn force_landing(&mut self) {
        info!("Session rejected by server, returning to landing screen");
        self.auth.logout();
        self.session.dispatch(SessionAction::Logout);
        self.screen = Screen::Home;
        self.start_login();
        self.status_message = Some("Session expired, please sign in again".to_string());
    }

    // =========================================================================
    // Navigation and preferences
    // =========================================================================

    /// Switch screens. Screens other than Home require a session.
    pub fn navigate(&mut self, screen: Screen) {
        if screen != Screen::Home && !self.session.is_authenticated() {
            self.screen = Screen::Home;
            self.start_login();
            return;
        }
        self.screen = screen;
    }

    /// Flip the sidebar collapse preference and persist it immediately.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        let value = if self.sidebar_collapsed { "true" } else { "false" };
        if let Err(e) = self.storage.set(SIDEBAR_COLLAPSED_KEY, value) {
            warn!(error = %e, "Failed to persist sidebar preference");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use admindeck_core::storage::{TOKEN_KEY, USER_KEY};

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = Storage::new(dir.path().to_path_buf());
        let app = App::with_parts(Config::default(), storage).expect("Failed to build app");
        (dir, app)
    }

    fn seed_session(storage: &Storage) {
        storage.set(TOKEN_KEY, "abc123").unwrap();
        storage
            .set(USER_KEY, r#"{"username":"alice","role":"user"}"#)
            .unwrap();
    }

    // -------------------------------------------------------------------------
    // Bootstrap
    // -------------------------------------------------------------------------

    #[test]
    fn test_starts_anonymous_on_landing_screen() {
        let (_dir, app) = test_app();
        assert!(!app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.mode, Mode::Login);
    }

    #[test]
    fn test_bootstraps_session_from_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        seed_session(&storage);

        let app = App::with_parts(Config::default(), storage).unwrap();
        assert!(app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.session.user().map(|u| u.username.as_str()),
            Some("alice")
        );
    }

    #[test]
    fn test_malformed_persisted_profile_means_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        storage.set(USER_KEY, "{corrupt").unwrap();

        let app = App::with_parts(Config::default(), storage).unwrap();
        assert!(!app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Home);
    }

    // -------------------------------------------------------------------------
    // Unauthorized listener
    // -------------------------------------------------------------------------

    #[test]
    fn test_unauthorized_clears_storage_and_lands_home() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        seed_session(&storage);

        let mut app = App::with_parts(Config::default(), storage.clone()).unwrap();
        assert_eq!(app.screen, Screen::Dashboard);

        let err = anyhow::Error::from(ApiError::Unauthorized);
        app.handle_request_error(&err);

        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.mode, Mode::Login);
    }

    #[test]
    fn test_other_errors_only_set_status() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        seed_session(&storage);

        let mut app = App::with_parts(Config::default(), storage.clone()).unwrap();
        let err = anyhow::Error::from(ApiError::App {
            code: 500,
            message: "boom".to_string(),
        });
        app.handle_request_error(&err);

        assert_eq!(app.status_message.as_deref(), Some("boom"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert!(app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Dashboard);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    #[test]
    fn test_navigate_requires_session() {
        let (_dir, mut app) = test_app();
        app.mode = Mode::Normal;
        app.navigate(Screen::Users);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.mode, Mode::Login);
    }

    #[test]
    fn test_navigate_with_session() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        seed_session(&storage);

        let mut app = App::with_parts(Config::default(), storage).unwrap();
        app.navigate(Screen::Settings);
        assert_eq!(app.screen, Screen::Settings);
        app.navigate(Screen::Home);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_logout_resets_everything() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        seed_session(&storage);

        let mut app = App::with_parts(Config::default(), storage.clone()).unwrap();
        app.logout();

        assert_eq!(storage.get(TOKEN_KEY), None);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.mode, Mode::Login);
    }

    // -------------------------------------------------------------------------
    // Sidebar toggle
    // -------------------------------------------------------------------------

    #[test]
    fn test_sidebar_toggle_parity() {
        let (_dir, mut app) = test_app();
        let initial = app.sidebar_collapsed;

        for n in 1..=5 {
            app.toggle_sidebar();
            // After N toggles, collapsed == initial XOR (N odd)
            assert_eq!(app.sidebar_collapsed, initial ^ (n % 2 == 1));
        }
    }

    #[test]
    fn test_sidebar_toggle_persists_each_change() {
        let (_dir, mut app) = test_app();
        app.toggle_sidebar();
        assert_eq!(
            app.storage.get(SIDEBAR_COLLAPSED_KEY).as_deref(),
            Some("true")
        );
        app.toggle_sidebar();
        assert_eq!(
            app.storage.get(SIDEBAR_COLLAPSED_KEY).as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_sidebar_preference_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());

        let mut app = App::with_parts(Config::default(), storage.clone()).unwrap();
        assert!(!app.sidebar_collapsed);
        app.toggle_sidebar();

        let app2 = App::with_parts(Config::default(), storage).unwrap();
        assert!(app2.sidebar_collapsed);
    }

    // -------------------------------------------------------------------------
    // Input Validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\n'));
        assert!(!can_add_username_char(0, '\x00'));
    }

    #[test]
    fn test_can_add_email_char() {
        assert!(can_add_email_char(0, 'a'));
        assert!(can_add_email_char(0, '@'));
        assert!(!can_add_email_char(0, ' '));
        assert!(!can_add_email_char(100, 'a'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }

    // -------------------------------------------------------------------------
    // Form state
    // -------------------------------------------------------------------------

    #[test]
    fn test_start_login_focuses_password_with_known_username() {
        let (_dir, mut app) = test_app();
        app.login_username = "alice".to_string();
        app.start_login();
        assert_eq!(app.login_focus, LoginFocus::Password);

        app.login_username.clear();
        app.start_login();
        assert_eq!(app.login_focus, LoginFocus::Username);
    }

    #[tokio::test]
    async fn test_attempt_login_requires_both_fields() {
        let (_dir, mut app) = test_app();
        app.login_username = "alice".to_string();
        app.login_password.clear();
        app.attempt_login().await;
        assert!(app.login_error.is_some());
        assert!(!app.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_attempt_register_validates_email() {
        let (_dir, mut app) = test_app();
        app.register_username = "carol".to_string();
        app.register_email = "not-an-email".to_string();
        app.register_password = "hunter2".to_string();
        app.attempt_register().await;
        assert_eq!(
            app.register_error.as_deref(),
            Some("Enter a valid email address")
        );
    }
}
