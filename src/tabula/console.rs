use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::config::ConsoleConfig;
use crate::error::{Result, TabulaError};
use crate::login::{LoginForm, LoginOutcome};
use crate::model::FieldValue;
use crate::profile::ProfileForm;
use crate::report::{Report, ReportDesk, ReportKind};
use crate::schema::{DOCUMENTS, PRODUCTS, USERS};
use crate::screen::Screen;
use crate::seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Dashboard,
    Users,
    Products,
    Reports,
    Documents,
    Settings,
    Login,
}

impl ScreenId {
    pub const ALL: [ScreenId; 7] = [
        ScreenId::Dashboard,
        ScreenId::Users,
        ScreenId::Products,
        ScreenId::Reports,
        ScreenId::Documents,
        ScreenId::Settings,
        ScreenId::Login,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Products => "products",
            Self::Reports => "reports",
            Self::Documents => "documents",
            Self::Settings => "settings",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScreenId {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self> {
        ScreenId::ALL
            .iter()
            .find(|id| id.name() == s.to_lowercase())
            .copied()
            .ok_or_else(|| TabulaError::Input(format!("Unknown screen: {}", s)))
    }
}

/// Summary cards derived from the live stores.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_users: usize,
    pub total_products: usize,
    pub inventory_value: f64,
}

/// A timer completion delivered by `tick`.
#[derive(Debug)]
pub enum ConsoleEvent {
    ReportReady(Report),
    LoginSucceeded,
    LoginFailed(String),
}

/// The whole console: one screen per entity kind plus the report desk, the
/// login form and the profile form. Screens are constructed once with the
/// demo data and keep their state for the session; switching screens never
/// re-seeds.
#[derive(Debug)]
pub struct Console {
    config: ConsoleConfig,
    active: ScreenId,
    users: Screen,
    products: Screen,
    documents: Screen,
    reports: ReportDesk,
    login: LoginForm,
    profile: ProfileForm,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        Ok(Self {
            config,
            active: ScreenId::Dashboard,
            users: Screen::new(USERS.clone(), seed::users()?),
            products: Screen::new(PRODUCTS.clone(), seed::products()?),
            documents: Screen::new(DOCUMENTS.clone(), seed::documents()?),
            reports: ReportDesk::default(),
            login: LoginForm::default(),
            profile: ProfileForm::default(),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn active(&self) -> ScreenId {
        self.active
    }

    /// Switches screens. Pending timers of the screen being left are
    /// discarded so it can never be updated after teardown. Re-activating
    /// the current screen is a no-op and leaves its timers running.
    pub fn activate(&mut self, next: ScreenId) {
        if next == self.active {
            return;
        }
        match self.active {
            ScreenId::Reports => self.reports.teardown(),
            ScreenId::Login => self.login.teardown(),
            _ => {}
        }
        self.active = next;
    }

    /// The collection screen behind an id; None for the non-collection
    /// screens.
    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        match id {
            ScreenId::Users => Some(&self.users),
            ScreenId::Products => Some(&self.products),
            ScreenId::Documents => Some(&self.documents),
            _ => None,
        }
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        match id {
            ScreenId::Users => Some(&mut self.users),
            ScreenId::Products => Some(&mut self.products),
            ScreenId::Documents => Some(&mut self.documents),
            _ => None,
        }
    }

    pub fn active_screen(&self) -> Option<&Screen> {
        self.screen(self.active)
    }

    pub fn active_screen_mut(&mut self) -> Option<&mut Screen> {
        self.screen_mut(self.active)
    }

    pub fn reports(&self) -> &ReportDesk {
        &self.reports
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }

    pub fn profile(&self) -> &ProfileForm {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut ProfileForm {
        &mut self.profile
    }

    /// Starts a report generation over a snapshot of the product records.
    pub fn generate_report(&mut self, kind: ReportKind, now: Instant) {
        let delay = self.config.report_delay();
        self.reports
            .request(kind, self.products.store().records(), delay, now);
    }

    pub fn submit_login(&mut self, now: Instant) {
        self.login.submit(self.config.login_delay(), now);
    }

    /// Delivers due timer completions for the active screen.
    pub fn tick(&mut self, now: Instant) -> Vec<ConsoleEvent> {
        let mut events = Vec::new();
        match self.active {
            ScreenId::Reports => {
                if let Some(report) = self.reports.poll(now) {
                    events.push(ConsoleEvent::ReportReady(report.clone()));
                }
            }
            ScreenId::Login => {
                if let Some(outcome) = self.login.poll(now) {
                    events.push(match outcome {
                        LoginOutcome::Success => ConsoleEvent::LoginSucceeded,
                        LoginOutcome::InvalidCredentials => ConsoleEvent::LoginFailed(
                            self.login.error().unwrap_or("").to_string(),
                        ),
                    });
                }
            }
            _ => {}
        }
        events
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        let inventory_value = self
            .products
            .store()
            .records()
            .iter()
            .map(|r| {
                let price = r.get("price").and_then(FieldValue::as_number).unwrap_or(0.0);
                let stock = r.get("stock").and_then(FieldValue::as_number).unwrap_or(0.0);
                price * stock
            })
            .sum();

        DashboardSummary {
            total_users: self.users.store().len(),
            total_products: self.products.store().len(),
            inventory_value,
        }
    }

    pub fn activity_feed(&self) -> Vec<seed::Activity> {
        seed::activity_feed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login::{DEMO_EMAIL, DEMO_PASSWORD};
    use std::time::Duration;

    fn instant_console() -> Console {
        Console::new(ConsoleConfig {
            report_delay_ms: 0,
            login_delay_ms: 0,
            ..ConsoleConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_on_the_dashboard_with_seeded_screens() {
        let console = Console::new(ConsoleConfig::default()).unwrap();

        assert_eq!(console.active(), ScreenId::Dashboard);
        assert_eq!(console.screen(ScreenId::Users).unwrap().store().len(), 5);
        assert_eq!(console.screen(ScreenId::Products).unwrap().store().len(), 5);
        assert_eq!(console.screen(ScreenId::Documents).unwrap().store().len(), 3);
        assert!(console.screen(ScreenId::Dashboard).is_none());
    }

    #[test]
    fn summary_derives_from_the_live_stores() {
        let mut console = instant_console();

        let summary = console.dashboard_summary();
        assert_eq!(summary.total_users, 5);
        assert_eq!(summary.total_products, 5);
        assert!((summary.inventory_value - 8843.3).abs() < 1e-6);

        let id = console
            .screen(ScreenId::Products)
            .unwrap()
            .resolve_row(5)
            .unwrap();
        console.screen_mut(ScreenId::Products).unwrap().delete(&id);

        let summary = console.dashboard_summary();
        assert_eq!(summary.total_products, 4);
        assert!((summary.inventory_value - 6473.3).abs() < 1e-6);
    }

    #[test]
    fn switching_screens_preserves_screen_state() {
        let mut console = instant_console();
        console.activate(ScreenId::Users);

        let id = console.active_screen().unwrap().resolve_row(1).unwrap();
        console.active_screen_mut().unwrap().delete(&id);
        console.active_screen_mut().unwrap().set_query("jane");

        console.activate(ScreenId::Dashboard);
        console.activate(ScreenId::Users);

        let screen = console.active_screen().unwrap();
        assert_eq!(screen.store().len(), 4);
        assert_eq!(screen.query(), "jane");
    }

    #[test]
    fn leaving_the_reports_screen_cancels_generation() {
        let mut console = Console::new(ConsoleConfig {
            report_delay_ms: 1000,
            ..ConsoleConfig::default()
        })
        .unwrap();
        let start = Instant::now();

        console.activate(ScreenId::Reports);
        console.generate_report(ReportKind::Sales, start);
        console.activate(ScreenId::Dashboard);
        console.activate(ScreenId::Reports);

        let events = console.tick(start + Duration::from_secs(60));
        assert!(events.is_empty());
        assert!(console.reports().latest().is_none());
    }

    #[test]
    fn reactivating_the_current_screen_keeps_its_timer() {
        let mut console = Console::new(ConsoleConfig {
            report_delay_ms: 1000,
            ..ConsoleConfig::default()
        })
        .unwrap();
        let start = Instant::now();

        console.activate(ScreenId::Reports);
        console.generate_report(ReportKind::Sales, start);
        console.activate(ScreenId::Reports);

        let events = console.tick(start + Duration::from_secs(3));
        assert!(matches!(events.as_slice(), [ConsoleEvent::ReportReady(_)]));
        assert!(console.reports().latest().is_some());
    }

    #[test]
    fn login_completion_arrives_through_tick() {
        let mut console = instant_console();
        let start = Instant::now();

        console.activate(ScreenId::Login);
        console.login_mut().set_email(DEMO_EMAIL);
        console.login_mut().set_password(DEMO_PASSWORD);
        console.submit_login(start);

        let events = console.tick(start);
        assert!(matches!(events.as_slice(), [ConsoleEvent::LoginSucceeded]));
        assert!(console.login().is_logged_in());
    }

    #[test]
    fn failed_login_reports_the_error_copy() {
        let mut console = instant_console();
        let start = Instant::now();

        console.activate(ScreenId::Login);
        console.login_mut().set_email("nope@example.com");
        console.login_mut().set_password("wrong");
        console.submit_login(start);

        match console.tick(start).as_slice() {
            [ConsoleEvent::LoginFailed(message)] => {
                assert_eq!(message, "Invalid credentials. Please try again.");
            }
            other => panic!("expected a failed login event, got {:?}", other),
        }
    }

    #[test]
    fn report_completion_arrives_through_tick() {
        let mut console = instant_console();
        let start = Instant::now();

        console.activate(ScreenId::Reports);
        console.generate_report(ReportKind::Inventory, start);

        match console.tick(start).as_slice() {
            [ConsoleEvent::ReportReady(Report::Inventory(rows))] => {
                assert_eq!(rows.len(), 5);
                assert_eq!(rows[0].product, "Product A");
            }
            other => panic!("expected an inventory report event, got {:?}", other),
        }
    }

    #[test]
    fn screen_ids_parse_by_name() {
        assert_eq!("users".parse::<ScreenId>().unwrap(), ScreenId::Users);
        assert_eq!("Settings".parse::<ScreenId>().unwrap(), ScreenId::Settings);
        assert!("inventory".parse::<ScreenId>().is_err());
    }
}
