use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus, Mode, RegisterFocus, Screen};

use super::styles;

/// Sidebar width when expanded / collapsed, in columns.
const SIDEBAR_WIDTH: u16 = 22;
const SIDEBAR_WIDTH_COLLAPSED: u16 = 5;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_main(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Overlays
    match app.mode {
        Mode::Login => render_login_overlay(frame, app),
        Mode::Register => render_register_overlay(frame, app),
        Mode::ConfirmingQuit => render_quit_overlay(frame),
        Mode::Normal => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  admindeck";
    let who = match app.session.user() {
        Some(user) => format!("{} ({})  ", user.username, user.role),
        None => "not signed in  ".to_string(),
    };

    let pad = (area.width as usize).saturating_sub(title.len() + who.len());
    let line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(pad)),
        Span::styled(who, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    // The landing screen has no sidebar
    if app.screen == Screen::Home {
        render_home(frame, app, area);
        return;
    }

    let sidebar_width = if app.sidebar_collapsed {
        SIDEBAR_WIDTH_COLLAPSED
    } else {
        SIDEBAR_WIDTH
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::raw("")];
    for (i, screen) in Screen::SIDEBAR.iter().enumerate() {
        let selected = app.screen == *screen;
        let label = if app.sidebar_collapsed {
            format!(" {}", i + 1)
        } else {
            format!(" [{}] {}", i + 1, screen.title())
        };
        lines.push(Line::styled(label, styles::nav_style(selected)));
    }

    lines.push(Line::raw(""));
    let collapse_hint = if app.sidebar_collapsed { " c" } else { " [c] collapse" };
    lines.push(Line::styled(collapse_hint, styles::muted_style()));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen {
        Screen::Home => render_home(frame, app, area),
        Screen::Dashboard => render_dashboard(frame, app, area),
        Screen::Users => render_users(frame, app, area),
        Screen::Settings => render_settings(frame, app, area),
    }
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::raw(""),
        Line::styled("  Welcome to admindeck", styles::title_style()),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  A keyboard-driven console for the admindeck server at "),
            Span::styled(app.config.resolved_base_url(), styles::accent_style()),
        ]),
        Line::raw(""),
    ];

    if app.session.is_authenticated() {
        lines.push(Line::from(vec![
            Span::styled("  [2]", styles::help_key_style()),
            Span::raw(" dashboard  "),
            Span::styled("[x]", styles::help_key_style()),
            Span::raw(" sign out"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("  [l]", styles::help_key_style()),
            Span::raw(" sign in  "),
            Span::styled("[n]", styles::help_key_style()),
            Span::raw(" create account"),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_dashboard(frame: &mut Frame, _app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[0]);

    // Placeholder figures, as served by the demo backend
    let stats = [
        ("Users", "1,234"),
        ("Orders", "567"),
        ("Revenue", "$12,345"),
        ("Growth", "+23%"),
    ];

    for (i, (label, value)) in stats.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::muted_style())
            .title(Span::styled(*label, styles::muted_style()));
        let value = Paragraph::new(Line::styled(*value, styles::title_style()))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(value, cards[i]);
    }

    let hint = Paragraph::new(Line::styled(
        "  [r] refresh profile",
        styles::muted_style(),
    ));
    frame.render_widget(hint, rows[1]);
}

fn render_users(frame: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::styled("  Users", styles::title_style()),
        Line::raw(""),
        Line::styled("  User management is not wired up yet.", styles::muted_style()),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let sidebar = if app.sidebar_collapsed { "collapsed" } else { "expanded" };
    let last_user = app.config.last_username.as_deref().unwrap_or("-");

    let lines = vec![
        Line::raw(""),
        Line::styled("  Settings", styles::title_style()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  API base URL:  ", styles::muted_style()),
            Span::raw(app.config.resolved_base_url()),
        ]),
        Line::from(vec![
            Span::styled("  Last username: ", styles::muted_style()),
            Span::raw(last_user),
        ]),
        Line::from(vec![
            Span::styled("  Sidebar:       ", styles::muted_style()),
            Span::raw(sidebar),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [x]", styles::help_key_style()),
            Span::raw(" sign out"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status_message {
        Some(msg) => format!(" {}", msg),
        None => " [1-3] navigate  [c] sidebar  [r] refresh  [x] sign out  [q] quit".to_string(),
    };
    let paragraph = Paragraph::new(Line::raw(text)).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Overlays
// ============================================================================

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(44, 11, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(Span::styled(" Sign in ", styles::title_style()));

    let masked = "*".repeat(app.login_password.len());
    let mut lines = vec![
        Line::raw(""),
        field_line("Username", &app.login_username, app.login_focus == LoginFocus::Username),
        field_line("Password", &masked, app.login_focus == LoginFocus::Password),
        Line::raw(""),
        button_line("Sign in", app.login_focus == LoginFocus::Button),
        Line::raw(""),
    ];

    match &app.login_error {
        Some(err) => lines.push(Line::styled(format!("  {}", err), styles::error_style())),
        None => lines.push(Line::styled(
            "  [Tab] next field  [n] register from landing",
            styles::muted_style(),
        )),
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_register_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(44, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(Span::styled(" Create account ", styles::title_style()));

    let masked = "*".repeat(app.register_password.len());
    let mut lines = vec![
        Line::raw(""),
        field_line("Username", &app.register_username, app.register_focus == RegisterFocus::Username),
        field_line("Email", &app.register_email, app.register_focus == RegisterFocus::Email),
        field_line("Password", &masked, app.register_focus == RegisterFocus::Password),
        Line::raw(""),
        button_line("Create account", app.register_focus == RegisterFocus::Button),
    ];

    if let Some(err) = &app.register_error {
        lines.push(Line::styled(format!("  {}", err), styles::error_style()));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect(34, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Quit ");
    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  Really quit? "),
            Span::styled("[y]", styles::help_key_style()),
            Span::raw("es / "),
            Span::styled("[n]", styles::help_key_style()),
            Span::raw("o"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {:<9}", label), styles::muted_style()),
        Span::styled(
            format!("{}{}", value, cursor),
            if focused { styles::selected_style() } else { ratatui::style::Style::default() },
        ),
    ])
}

fn button_line(label: &str, focused: bool) -> Line<'static> {
    let text = format!("  [ {} ]", label);
    Line::styled(
        text,
        if focused { styles::selected_style() } else { styles::muted_style() },
    )
}

/// Center a fixed-size rect inside the given area.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
