//! Auth flows
//!
//! Three mutually exclusive flows (registration, login, password reset)
//! sharing one error map and one loading indicator. Each flow owns its own
//! form model; switching flows clears every form and the errors. All
//! submissions run their local validators before anything touches the
//! network, and a single-slot in-flight guard rejects duplicate submissions
//! while a request is outstanding.

use crate::api::AuthService;
use crate::error::BudgetError;
use crate::journal::{Journal, Operation};
use crate::models::{FieldErrors, LoginForm, PasswordResetForm, RegistrationForm};
use crate::session::{Session, SessionStore};

/// Which auth form is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Initial mode
    #[default]
    Registration,
    Login,
    ForgotPassword,
}

/// Result of a submission, as the UI needs to react to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request succeeded (registration or password reset)
    Accepted,
    /// Login succeeded; the token is persisted and attached here for the
    /// caller to hand to the API client
    LoggedIn(String),
    /// Field errors are set; nothing was changed remotely
    Invalid,
    /// Transport-level failure: journaled, nothing shown to the user
    Failed,
    /// A request for this flow is already outstanding
    Busy,
}

/// Single-slot guard against duplicate submissions
#[derive(Debug, Default)]
pub struct InFlightGuard {
    busy: bool,
}

impl InFlightGuard {
    /// Claim the slot; returns false if a request is already outstanding
    pub fn try_begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Release the slot
    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Whether a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

/// State machine for the auth screen
#[derive(Debug, Default)]
pub struct AuthFlow {
    /// Visible form
    pub mode: AuthMode,

    /// Registration form state
    pub registration: RegistrationForm,

    /// Login form state
    pub login: LoginForm,

    /// Password reset form state
    pub reset: PasswordResetForm,

    /// Shared error map; field names plus the "registration"/"login" banner
    /// keys
    pub errors: FieldErrors,

    guard: InFlightGuard,
}

impl AuthFlow {
    /// Create a flow showing the registration form
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is outstanding (disables the active submit)
    pub fn is_loading(&self) -> bool {
        self.guard.is_busy()
    }

    /// Switch to a mode, clearing every form and the error map
    pub fn switch_to(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.clear_forms();
    }

    /// Toggle between registration and login
    pub fn toggle_login(&mut self) {
        let next = match self.mode {
            AuthMode::Login => AuthMode::Registration,
            _ => AuthMode::Login,
        };
        self.switch_to(next);
    }

    /// Toggle the forgot-password form (from login), or back to login
    pub fn toggle_forgot_password(&mut self) {
        let next = match self.mode {
            AuthMode::ForgotPassword => AuthMode::Login,
            _ => AuthMode::ForgotPassword,
        };
        self.switch_to(next);
    }

    fn clear_forms(&mut self) {
        self.registration.clear();
        self.login.clear();
        self.reset.clear();
        self.errors.clear();
    }

    /// Submit the registration form.
    ///
    /// Local validation failures set the field errors and never touch the
    /// network. A 400 carrying a field-error map shows that map; a bare 400
    /// clears the form and shows one generic banner; other failures are
    /// journaled only.
    pub fn submit_registration(
        &mut self,
        service: &impl AuthService,
        journal: &Journal,
    ) -> SubmitOutcome {
        if !self.guard.try_begin() {
            return SubmitOutcome::Busy;
        }

        let local_errors = self.registration.validate();
        if !local_errors.is_empty() {
            self.errors = local_errors;
            self.guard.finish();
            return SubmitOutcome::Invalid;
        }

        let result = service.register(&self.registration);
        self.guard.finish();

        match result {
            Ok(()) => {
                journal.record_success(
                    Operation::Register,
                    Some(self.registration.user_name.clone()),
                );
                self.registration.clear();
                self.errors.clear();
                SubmitOutcome::Accepted
            }
            Err(BudgetError::Rejected {
                status: 400,
                field_errors: Some(map),
            }) => {
                self.errors = map;
                SubmitOutcome::Invalid
            }
            Err(BudgetError::Rejected {
                status: 400,
                field_errors: None,
            }) => {
                self.registration.clear();
                self.errors.clear();
                self.errors.insert(
                    "registration".into(),
                    "Credentials are already in use".into(),
                );
                SubmitOutcome::Invalid
            }
            Err(err) => {
                journal.record_failure(
                    Operation::Register,
                    Some(self.registration.user_name.clone()),
                    &err,
                );
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit the login form.
    ///
    /// On success the token is persisted and returned for the caller to
    /// attach to the API client; any service rejection shows one generic
    /// "Invalid credentials" error.
    pub fn submit_login(
        &mut self,
        service: &impl AuthService,
        journal: &Journal,
        sessions: &SessionStore,
    ) -> SubmitOutcome {
        if !self.guard.try_begin() {
            return SubmitOutcome::Busy;
        }

        let local_errors = self.login.validate();
        if !local_errors.is_empty() {
            self.errors = local_errors;
            self.guard.finish();
            return SubmitOutcome::Invalid;
        }

        let result = service.login(&self.login.user_name, &self.login.password);
        self.guard.finish();

        match result {
            Ok(token) => {
                journal.record_success(Operation::Login, Some(self.login.user_name.clone()));
                if let Err(err) = sessions.save(&Session::new(token.clone())) {
                    // The login itself worked; record the storage problem
                    // and carry on.
                    journal.record_failure(Operation::Login, None, &err);
                }
                self.login.clear();
                self.errors.clear();
                SubmitOutcome::LoggedIn(token)
            }
            Err(BudgetError::Rejected { .. }) | Err(BudgetError::Unauthorized) => {
                self.errors.clear();
                self.errors
                    .insert("login".into(), "Invalid credentials".into());
                SubmitOutcome::Invalid
            }
            Err(err) => {
                journal.record_failure(
                    Operation::Login,
                    Some(self.login.user_name.clone()),
                    &err,
                );
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit the password reset form. Success clears the form; any failure
    /// is journaled only.
    pub fn submit_forgot_password(
        &mut self,
        service: &impl AuthService,
        journal: &Journal,
    ) -> SubmitOutcome {
        if !self.guard.try_begin() {
            return SubmitOutcome::Busy;
        }

        let local_errors = self.reset.validate();
        if !local_errors.is_empty() {
            self.errors = local_errors;
            self.guard.finish();
            return SubmitOutcome::Invalid;
        }

        let result = service.forgot_password(&self.reset.email, &self.reset.new_password);
        self.guard.finish();

        match result {
            Ok(()) => {
                journal.record_success(Operation::PasswordReset, Some(self.reset.email.clone()));
                self.reset.clear();
                self.errors.clear();
                SubmitOutcome::Accepted
            }
            Err(err) => {
                journal.record_failure(
                    Operation::PasswordReset,
                    Some(self.reset.email.clone()),
                    &err,
                );
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BudgetPaths;
    use crate::error::BudgetResult;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    /// Mock auth service recording calls with programmable results
    #[derive(Default)]
    struct MockAuthService {
        register_result: RefCell<Option<BudgetResult<()>>>,
        login_result: RefCell<Option<BudgetResult<String>>>,
        forgot_result: RefCell<Option<BudgetResult<()>>>,
        calls: RefCell<Vec<String>>,
    }

    impl MockAuthService {
        fn calls(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl AuthService for MockAuthService {
        fn register(&self, _form: &RegistrationForm) -> BudgetResult<()> {
            self.calls.borrow_mut().push("register".into());
            self.register_result.borrow_mut().take().unwrap_or(Ok(()))
        }

        fn login(&self, _user_name: &str, _password: &str) -> BudgetResult<String> {
            self.calls.borrow_mut().push("login".into());
            self.login_result
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok("token".into()))
        }

        fn forgot_password(&self, _email: &str, _new_password: &str) -> BudgetResult<()> {
            self.calls.borrow_mut().push("forgot".into());
            self.forgot_result.borrow_mut().take().unwrap_or(Ok(()))
        }
    }

    fn fixtures() -> (Journal, SessionStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp.path().to_path_buf());
        (
            Journal::new(paths.journal_file()),
            SessionStore::new(&paths),
            temp,
        )
    }

    fn fill_valid_registration(flow: &mut AuthFlow) {
        flow.registration.name = "Alice".into();
        flow.registration.user_name = "Alice".into();
        flow.registration.email = "alice@example.com".into();
        flow.registration.password = "secret1".into();
        flow.registration.confirm_password = "secret1".into();
    }

    #[test]
    fn test_initial_mode_is_registration() {
        assert_eq!(AuthFlow::new().mode, AuthMode::Registration);
    }

    #[test]
    fn test_mode_toggles() {
        let mut flow = AuthFlow::new();

        flow.toggle_login();
        assert_eq!(flow.mode, AuthMode::Login);

        flow.toggle_forgot_password();
        assert_eq!(flow.mode, AuthMode::ForgotPassword);

        flow.toggle_forgot_password();
        assert_eq!(flow.mode, AuthMode::Login);

        flow.toggle_login();
        assert_eq!(flow.mode, AuthMode::Registration);
    }

    #[test]
    fn test_switching_modes_clears_forms_and_errors() {
        let mut flow = AuthFlow::new();
        fill_valid_registration(&mut flow);
        flow.errors.insert("name".into(), "stale".into());

        flow.toggle_login();

        assert_eq!(flow.registration, RegistrationForm::default());
        assert!(flow.errors.is_empty());
    }

    #[test]
    fn test_invalid_registration_never_calls_service() {
        let service = MockAuthService::default();
        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();

        // Empty form fails several validators
        let outcome = flow.submit_registration(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(service.calls(), 0);
        assert!(flow.errors.contains_key("name"));
    }

    #[test]
    fn test_valid_registration_posts_and_clears() {
        let service = MockAuthService::default();
        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        fill_valid_registration(&mut flow);

        let outcome = flow.submit_registration(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(service.calls(), 1);
        assert_eq!(flow.registration, RegistrationForm::default());
    }

    #[test]
    fn test_structured_rejection_shows_field_errors() {
        let service = MockAuthService::default();
        let mut map = BTreeMap::new();
        map.insert("email".to_string(), "Email already registered".to_string());
        *service.register_result.borrow_mut() = Some(Err(BudgetError::Rejected {
            status: 400,
            field_errors: Some(map),
        }));

        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        fill_valid_registration(&mut flow);

        let outcome = flow.submit_registration(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(
            flow.errors.get("email").map(String::as_str),
            Some("Email already registered")
        );
        // The form keeps its values so the user can correct them
        assert_eq!(flow.registration.user_name, "Alice");
    }

    #[test]
    fn test_bare_rejection_clears_form_and_shows_banner() {
        let service = MockAuthService::default();
        *service.register_result.borrow_mut() = Some(Err(BudgetError::Rejected {
            status: 400,
            field_errors: None,
        }));

        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        fill_valid_registration(&mut flow);

        let outcome = flow.submit_registration(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(flow.registration, RegistrationForm::default());
        assert_eq!(
            flow.errors.get("registration").map(String::as_str),
            Some("Credentials are already in use")
        );
    }

    #[test]
    fn test_registration_transport_failure_is_journal_only() {
        let service = MockAuthService::default();
        *service.register_result.borrow_mut() =
            Some(Err(BudgetError::Http("connection refused".into())));

        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        fill_valid_registration(&mut flow);

        let outcome = flow.submit_registration(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(flow.errors.is_empty());
        assert_eq!(journal.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_login_missing_password_is_local_error() {
        let service = MockAuthService::default();
        let (journal, sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        flow.switch_to(AuthMode::Login);
        flow.login.user_name = "Alice".into();
        flow.login.password = String::new();

        let outcome = flow.submit_login(&service, &journal, &sessions);

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(
            flow.errors.get("password").map(String::as_str),
            Some("Password is required")
        );
        // No network call was issued
        assert_eq!(service.calls(), 0);
    }

    #[test]
    fn test_login_success_persists_token_and_clears_form() {
        let service = MockAuthService::default();
        *service.login_result.borrow_mut() = Some(Ok("opaque-token".into()));

        let (journal, sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        flow.switch_to(AuthMode::Login);
        flow.login.user_name = "Alice".into();
        flow.login.password = "secret1".into();

        let outcome = flow.submit_login(&service, &journal, &sessions);

        assert_eq!(outcome, SubmitOutcome::LoggedIn("opaque-token".into()));
        assert_eq!(flow.login, LoginForm::default());
        assert_eq!(sessions.load().unwrap().unwrap().token, "opaque-token");
    }

    #[test]
    fn test_login_rejection_shows_generic_error() {
        let service = MockAuthService::default();
        *service.login_result.borrow_mut() = Some(Err(BudgetError::Unauthorized));

        let (journal, sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        flow.switch_to(AuthMode::Login);
        flow.login.user_name = "Alice".into();
        flow.login.password = "wrong".into();

        let outcome = flow.submit_login(&service, &journal, &sessions);

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(
            flow.errors.get("login").map(String::as_str),
            Some("Invalid credentials")
        );
        assert!(!sessions.exists());
    }

    #[test]
    fn test_forgot_password_success_clears_form() {
        let service = MockAuthService::default();
        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        flow.switch_to(AuthMode::ForgotPassword);
        flow.reset.email = "alice@example.com".into();
        flow.reset.new_password = "secret2".into();

        let outcome = flow.submit_forgot_password(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(flow.reset, PasswordResetForm::default());
    }

    #[test]
    fn test_forgot_password_failure_is_journal_only() {
        let service = MockAuthService::default();
        *service.forgot_result.borrow_mut() = Some(Err(BudgetError::rejected(500)));

        let (journal, _sessions, _temp) = fixtures();
        let mut flow = AuthFlow::new();
        flow.switch_to(AuthMode::ForgotPassword);
        flow.reset.email = "alice@example.com".into();
        flow.reset.new_password = "secret2".into();

        let outcome = flow.submit_forgot_password(&service, &journal);

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(flow.errors.is_empty());
        assert_eq!(journal.entry_count().unwrap(), 1);
    }

    #[test]
    fn test_in_flight_guard_rejects_duplicates() {
        let mut guard = InFlightGuard::default();

        assert!(guard.try_begin());
        assert!(guard.is_busy());
        assert!(!guard.try_begin());

        guard.finish();
        assert!(guard.try_begin());
    }
}
