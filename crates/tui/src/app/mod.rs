use std::time::{Duration, Instant};

use api_types::{auth::User, category::Category, goal::Goal, wallet::Wallet};
use chrono::NaiveDate;
use client::{
    AuthClient, ClientError, CrudApi, CrudForm, EntityList, HttpClient, Notifier, Resource,
    ResourceClient, Session, SessionStore, Tab,
};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Wallets,
    Categories,
    Goals,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Wallets, Section::Categories, Section::Goals];

    pub fn label(self) -> &'static str {
        match self {
            Self::Wallets => "Wallets",
            Self::Categories => "Categories",
            Self::Goals => "Goals",
        }
    }

    pub fn from_key(ch: char) -> Option<Self> {
        match ch {
            '1' | 'w' => Some(Self::Wallets),
            '2' | 'c' => Some(Self::Categories),
            '3' | 'g' => Some(Self::Goals),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Email,
    Password,
    Confirm,
}

impl LoginField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Confirm => "Confirm",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::Confirm)
    }
}

const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+{}[]:;<>,.?/~`-";

/// Login and registration form. Registration shares email and password with login.
#[derive(Debug)]
pub struct LoginState {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

impl LoginState {
    fn new(email: &str) -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            email: email.to_string(),
            password: String::new(),
            confirm: String::new(),
            focus: LoginField::Email,
            message: None,
        }
    }

    pub fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            AuthMode::Login => &[LoginField::Email, LoginField::Password],
            AuthMode::Register => &[
                LoginField::Username,
                LoginField::Email,
                LoginField::Password,
                LoginField::Confirm,
            ],
        }
    }

    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
            LoginField::Confirm => &self.confirm,
        }
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::Confirm => &mut self.confirm,
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    /// Flips between login and registration. Secrets and the message are cleared.
    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.password.clear();
        self.confirm.clear();
        self.message = None;
        self.focus = self.fields()[0];
    }

    /// First problem with the registration input, checked before anything is sent.
    fn registration_problem(&self) -> Option<&'static str> {
        let password = &self.password;
        if self.username.trim().is_empty() {
            return Some("Username is required.");
        }
        if self.email.trim().is_empty() {
            return Some("Email is required.");
        }
        if !is_plausible_email(self.email.trim()) {
            return Some("Email is invalid.");
        }
        let strong = password.chars().count() >= 8
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
        if !strong {
            return Some("Password needs 8+ chars, upper, lower, digit and symbol.");
        }
        if self.confirm != *password {
            return Some("Passwords do not match.");
        }
        None
    }
}

/// `local@domain.tld` with no spaces.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// List state and form of one section.
#[derive(Debug)]
pub struct Pane<R: Resource> {
    pub list: EntityList<R>,
    pub form: CrudForm<R>,
}

impl<R: Resource> Default for Pane<R> {
    fn default() -> Self {
        Self {
            list: EntityList::new(),
            form: CrudForm::new(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub user: Option<User>,
    pub section: Section,
    pub wallets: Pane<Wallet>,
    pub categories: Pane<Category>,
    pub goals: Pane<Goal>,
    pub notifier: Notifier,
    pub base_url: String,
}

impl AppState {
    pub(crate) fn new(config: &AppConfig) -> Self {
        Self {
            screen: Screen::Login,
            login: LoginState::new(&config.email),
            user: None,
            section: Section::Wallets,
            wallets: Pane::default(),
            categories: Pane::default(),
            goals: Pane::default(),
            notifier: Notifier::new(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn form_open(&self) -> bool {
        match self.section {
            Section::Wallets => self.wallets.form.is_open(),
            Section::Categories => self.categories.form.is_open(),
            Section::Goals => self.goals.form.is_open(),
        }
    }

    pub fn current_tab(&self) -> Tab {
        match self.section {
            Section::Wallets => self.wallets.list.tab(),
            Section::Categories => self.categories.list.tab(),
            Section::Goals => self.goals.list.tab(),
        }
    }
}

struct Apis {
    wallets: ResourceClient<Wallet>,
    categories: ResourceClient<Category>,
    goals: ResourceClient<Goal>,
}

pub struct App {
    config: AppConfig,
    auth: AuthClient,
    apis: Apis,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let session = Session::new();
        let http = HttpClient::with_timeout(
            &config.base_url,
            session,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let auth = AuthClient::new(http.clone(), SessionStore::new(&config.session_path));
        let apis = Apis {
            wallets: ResourceClient::new(http.clone()),
            categories: ResourceClient::new(http.clone()),
            goals: ResourceClient::new(http),
        };
        let state = AppState::new(&config);

        Ok(Self {
            config,
            auth,
            apis,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        if let Some(user) = self.auth.resume().await {
            self.enter_main(user).await;
        }
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.check_session();
            self.state.notifier.tick(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Main => self.handle_main_key(action).await,
        }
    }

    async fn handle_login_key(&mut self, action: AppAction) {
        let login = &mut self.state.login;
        match action {
            AppAction::NextField | AppAction::Down => login.move_focus(true),
            AppAction::PrevField | AppAction::Up => login.move_focus(false),
            AppAction::SwitchMode => login.switch_mode(),
            AppAction::Submit => match login.mode {
                AuthMode::Login => self.attempt_login().await,
                AuthMode::Register => self.attempt_register().await,
            },
            AppAction::Backspace => {
                login.active_field_mut().pop();
            }
            AppAction::Input(ch) => login.active_field_mut().push(ch),
            AppAction::Cancel => self.state.notifier.dismiss(),
            _ => {}
        }
    }

    async fn attempt_login(&mut self) {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.password.clone();
        if email.is_empty() || password.is_empty() {
            self.state.login.message = Some("Enter email and password.".to_string());
            return;
        }

        match self.auth.login(&email, &password).await {
            Ok(user) => self.enter_main(user).await,
            Err(err) => {
                tracing::warn!("login failed: {err}");
                self.state.login.message = Some(login_message_for_error(&err));
            }
        }
    }

    async fn attempt_register(&mut self) {
        if let Some(problem) = self.state.login.registration_problem() {
            self.state.login.message = Some(problem.to_string());
            return;
        }

        let login = &self.state.login;
        let result = self
            .auth
            .register(&login.username, &login.email, &login.password)
            .await;
        match result {
            Ok(()) => {
                self.state.login.switch_mode();
                self.state
                    .notifier
                    .success("Registration successful. Please log in.");
            }
            Err(err) => {
                tracing::warn!("registration failed: {err}");
                self.state.login.message = Some(register_message_for_error(&err));
            }
        }
    }

    /// Sends the user back to the login screen once the backend has rejected the token.
    fn check_session(&mut self) {
        if !self.auth.http().session().take_expired() || self.state.screen != Screen::Main {
            return;
        }
        tracing::info!("session expired, returning to login");
        self.logout();
        self.state.login.message = Some("Session expired. Please log in again.".to_string());
    }

    async fn enter_main(&mut self, user: User) {
        self.state.user = Some(user);
        self.state.screen = Screen::Main;
        self.state.login.password.clear();
        self.state.login.message = None;
        self.refresh_section().await;
    }

    fn logout(&mut self) {
        self.auth.logout();
        self.state = AppState::new(&self.config);
    }

    async fn handle_main_key(&mut self, action: AppAction) {
        if !self.state.form_open() {
            match action {
                AppAction::Input('q') => {
                    self.should_quit = true;
                    return;
                }
                AppAction::Input('L') => {
                    self.logout();
                    return;
                }
                AppAction::Cancel => {
                    self.state.notifier.dismiss();
                    return;
                }
                AppAction::Input(ch) => {
                    if let Some(section) = Section::from_key(ch) {
                        self.select_section(section).await;
                        return;
                    }
                }
                _ => {}
            }
        }

        let today = self.config.today();
        let state = &mut self.state;
        match state.section {
            Section::Wallets => {
                handle_pane(&mut state.wallets, &self.apis.wallets, &mut state.notifier, action, today)
                    .await;
            }
            Section::Categories => {
                handle_pane(
                    &mut state.categories,
                    &self.apis.categories,
                    &mut state.notifier,
                    action,
                    today,
                )
                .await;
            }
            Section::Goals => {
                handle_pane(&mut state.goals, &self.apis.goals, &mut state.notifier, action, today)
                    .await;
            }
        }
    }

    async fn select_section(&mut self, section: Section) {
        if self.state.section == section {
            return;
        }
        self.state.section = section;
        self.refresh_section().await;
    }

    async fn refresh_section(&mut self) {
        let state = &mut self.state;
        match state.section {
            Section::Wallets => {
                state
                    .wallets
                    .list
                    .refresh(&self.apis.wallets, &mut state.notifier)
                    .await;
            }
            Section::Categories => {
                state
                    .categories
                    .list
                    .refresh(&self.apis.categories, &mut state.notifier)
                    .await;
            }
            Section::Goals => {
                state
                    .goals
                    .list
                    .refresh(&self.apis.goals, &mut state.notifier)
                    .await;
            }
        }
    }
}

/// Routes a key to the open form, or to the list when no form is open.
async fn handle_pane<R: Resource, A: CrudApi<R>>(
    pane: &mut Pane<R>,
    api: &A,
    notifier: &mut Notifier,
    action: AppAction,
    today: NaiveDate,
) {
    if pane.form.is_open() {
        match action {
            AppAction::Cancel => pane.form.cancel(),
            AppAction::NextField | AppAction::Down => pane.form.focus_next(),
            AppAction::PrevField | AppAction::Up => pane.form.focus_prev(),
            AppAction::Left => pane.form.cycle_focused(false),
            AppAction::Right => pane.form.cycle_focused(true),
            AppAction::Backspace => pane.form.pop_char(),
            AppAction::Input(ch) => pane.form.push_char(ch),
            AppAction::Submit => {
                pane.form.submit(&mut pane.list, api, notifier, today).await;
            }
            AppAction::Quit | AppAction::SwitchMode | AppAction::None => {}
        }
        return;
    }

    let tab = pane.list.tab();
    match action {
        AppAction::NextField | AppAction::PrevField => {
            pane.list.select_tab(tab.toggle(), api, notifier).await;
        }
        AppAction::Up | AppAction::Input('k') => pane.list.select_prev(),
        AppAction::Down | AppAction::Input('j') => pane.list.select_next(),
        AppAction::Input('a') => pane.form.open_create(),
        AppAction::Input('R') => pane.list.refresh(api, notifier).await,
        AppAction::Input('e') if tab == Tab::Active => {
            if let Some(item) = pane.list.selected_item().cloned() {
                pane.form.open_edit(&item);
            }
        }
        AppAction::Input('d') if tab == Tab::Active => {
            if let Some(id) = pane.list.selected_item().map(|item| item.id().clone()) {
                pane.list.soft_delete(&id, api, notifier).await;
            }
        }
        AppAction::Input('r') if tab == Tab::Deleted => {
            if let Some(id) = pane.list.selected_item().map(|item| item.id().clone()) {
                pane.list.restore(&id, api, notifier).await;
            }
        }
        _ => {}
    }
}

fn register_message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Validation(message) | ClientError::Conflict(message) => message.clone(),
        ClientError::Network(_) => "Server unreachable.".to_string(),
        _ => "Registration failed. Please try again.".to_string(),
    }
}

fn login_message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "Invalid email or password.".to_string()
        }
        ClientError::Validation(message) => message.clone(),
        ClientError::Network(_) => "Server unreachable.".to_string(),
        other => format!("Login failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use client::{FormMode, validation::fields};

    use super::*;

    fn offline_wallets() -> ResourceClient<Wallet> {
        let http = HttpClient::new("http://127.0.0.1:9", Session::new()).unwrap();
        ResourceClient::new(http)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn offline_app(dir: &tempfile::TempDir) -> App {
        let config = AppConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            session_path: dir.path().join("session.json").display().to_string(),
            ..AppConfig::default()
        };
        App::new(config).unwrap()
    }

    #[test]
    fn switching_to_register_keeps_the_email_and_clears_secrets() {
        let mut login = LoginState::new("linh@example.com");
        login.password.push_str("secret");
        login.message = Some("Invalid email or password.".to_string());

        login.switch_mode();
        assert_eq!(login.mode, AuthMode::Register);
        assert_eq!(login.fields().len(), 4);
        assert_eq!(login.focus, LoginField::Username);
        assert_eq!(login.email, "linh@example.com");
        assert!(login.password.is_empty());
        assert!(login.message.is_none());

        login.move_focus(false);
        assert_eq!(login.focus, LoginField::Confirm);
        login.move_focus(true);
        assert_eq!(login.focus, LoginField::Username);

        login.switch_mode();
        assert_eq!(login.fields(), &[LoginField::Email, LoginField::Password]);
        assert_eq!(login.focus, LoginField::Email);
    }

    #[test]
    fn registration_input_is_checked_before_sending() {
        let mut login = LoginState::new("linh@example.com");
        login.switch_mode();
        assert_eq!(login.registration_problem(), Some("Username is required."));

        login.username = "linh".to_string();
        login.password = "weakpass".to_string();
        assert_eq!(
            login.registration_problem(),
            Some("Password needs 8+ chars, upper, lower, digit and symbol.")
        );

        login.password = "Str0ng!pass".to_string();
        login.confirm = "Str0ng!pas".to_string();
        assert_eq!(login.registration_problem(), Some("Passwords do not match."));

        login.confirm = login.password.clone();
        assert_eq!(login.registration_problem(), None);

        login.email = "linh@example".to_string();
        assert_eq!(login.registration_problem(), Some("Email is invalid."));
    }

    #[tokio::test]
    async fn register_mode_submits_through_the_auth_client() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);

        app.handle_login_key(AppAction::SwitchMode).await;
        app.handle_login_key(AppAction::Submit).await;
        assert_eq!(
            app.state.login.message.as_deref(),
            Some("Username is required.")
        );

        for ch in "linh".chars() {
            app.handle_login_key(AppAction::Input(ch)).await;
        }
        app.handle_login_key(AppAction::NextField).await;
        for ch in "linh@example.com".chars() {
            app.handle_login_key(AppAction::Input(ch)).await;
        }
        for _ in 0..2 {
            app.handle_login_key(AppAction::NextField).await;
            for ch in "Str0ng!pass".chars() {
                app.handle_login_key(AppAction::Input(ch)).await;
            }
        }
        assert_eq!(app.state.login.username, "linh");
        assert_eq!(app.state.login.confirm, "Str0ng!pass");

        app.handle_login_key(AppAction::Submit).await;
        assert_eq!(app.state.login.mode, AuthMode::Register);
        assert_eq!(app.state.login.message.as_deref(), Some("Server unreachable."));
    }

    #[test]
    fn rejected_token_sends_the_user_back_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app(&dir);
        let session = app.auth.http().session().clone();

        app.state.screen = Screen::Main;
        app.state.notifier.error("Failed to fetch wallets");
        session.set_token("old");
        app.check_session();
        assert_eq!(app.state.screen, Screen::Main);

        session.mark_expired();
        app.check_session();
        assert_eq!(app.state.screen, Screen::Login);
        assert_eq!(
            app.state.login.message.as_deref(),
            Some("Session expired. Please log in again.")
        );
        assert!(!session.is_authenticated());
        assert!(app.state.notifier.current().is_none());
    }

    #[test]
    fn register_errors_surface_the_server_message() {
        assert_eq!(
            register_message_for_error(&ClientError::Conflict("Email already exists".into())),
            "Email already exists"
        );
        assert_eq!(
            register_message_for_error(&ClientError::NotFound),
            "Registration failed. Please try again."
        );
    }

    #[test]
    fn section_keys() {
        assert_eq!(Section::from_key('1'), Some(Section::Wallets));
        assert_eq!(Section::from_key('c'), Some(Section::Categories));
        assert_eq!(Section::from_key('g'), Some(Section::Goals));
        assert_eq!(Section::from_key('x'), None);
    }

    #[test]
    fn login_messages_hide_status_details() {
        assert_eq!(
            login_message_for_error(&ClientError::Unauthorized),
            "Invalid email or password."
        );
        assert_eq!(
            login_message_for_error(&ClientError::Validation("Missing required fields".into())),
            "Missing required fields"
        );
    }

    #[tokio::test]
    async fn form_keys_edit_the_draft_without_network() {
        let api = offline_wallets();
        let mut pane = Pane::<Wallet>::default();
        let mut notifier = Notifier::new();

        for action in [
            AppAction::Input('a'),
            AppAction::Input('C'),
            AppAction::Input('a'),
            AppAction::Input('s'),
            AppAction::Input('h'),
            AppAction::NextField,
            AppAction::NextField,
            AppAction::Right,
        ] {
            handle_pane(&mut pane, &api, &mut notifier, action, today()).await;
        }

        assert_eq!(pane.form.mode(), &FormMode::Creating);
        assert_eq!(pane.form.draft().name, "Cash");
        assert_eq!(pane.form.input_text(fields::CURRENCY), "USD");

        handle_pane(&mut pane, &api, &mut notifier, AppAction::Cancel, today()).await;
        assert!(!pane.form.is_open());
        assert!(notifier.current().is_none());
    }

    #[tokio::test]
    async fn row_actions_need_a_selected_row() {
        let api = offline_wallets();
        let mut pane = Pane::<Wallet>::default();
        let mut notifier = Notifier::new();

        for action in [AppAction::Input('e'), AppAction::Input('d'), AppAction::Input('r')] {
            handle_pane(&mut pane, &api, &mut notifier, action, today()).await;
        }
        assert!(!pane.form.is_open());
        assert!(notifier.current().is_none());
    }
}
