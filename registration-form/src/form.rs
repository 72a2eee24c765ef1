use thiserror::Error;
use tokio::sync::watch;
use common_types::{
    Account::AccountType,
    Field::FormField,
};

use crate::{
    Validation::{accept, validate, FieldErrors, Registration, RegistrationInput},
    Sink::{SinkError, SubmissionSink},
    Constants,
};

mod visibility;

pub use visibility::{company_name_visibility, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    // Clear the stored company name as soon as its input is hidden
    pub clear_hidden_company_name: bool,
    // Once a submit has been attempted, re-run validation on every update
    pub revalidate_after_submit: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            clear_hidden_company_name: false,
            revalidate_after_submit: true,
        }
    }
}

impl FormOptions {
    pub fn from_env() -> Self {
        Self {
            clear_hidden_company_name: *Constants::CLEAR_HIDDEN_COMPANY_NAME,
            revalidate_after_submit: *Constants::REVALIDATE_AFTER_SUBMIT,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("'{0}' is not a valid account type")]
    UnknownAccountType(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// The registration form's live state: the values typed so far, the errors of
/// the last validation pass and the company name visibility published to
/// subscribers.
pub struct RegistrationForm {
    values: RegistrationInput,
    errors: FieldErrors,
    submit_attempted: bool,
    options: FormOptions,
    visibility: watch::Sender<Visibility>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new(FormOptions::default())
    }
}

impl RegistrationForm {
    pub fn new(options: FormOptions) -> Self {
        let (visibility, _) = watch::channel(Visibility::Hidden);
        Self {
            values: RegistrationInput::default(),
            errors: FieldErrors::default(),
            submit_attempted: false,
            options,
            visibility,
        }
    }

    pub fn values(&self) -> &RegistrationInput {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn company_name_visibility(&self) -> Visibility {
        company_name_visibility(self.values.account_type)
    }

    /// Subscribe to company name visibility. Receivers are only woken when the
    /// visibility actually flips.
    pub fn subscribe_company_name_visibility(&self) -> watch::Receiver<Visibility> {
        self.visibility.subscribe()
    }

    #[tracing::instrument(skip(self, value))]
    pub fn update(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match field {
            FormField::Email => self.values.email = value,
            FormField::Password => self.values.password = value,
            FormField::PasswordConfirm => self.values.password_confirm = value,
            FormField::CompanyName => self.values.company_name = Some(value),
            FormField::AccountType => {
                let account_type = value.parse::<AccountType>().map_err(|_| {
                    tracing::info!("Rejected account type {value}");
                    FormError::UnknownAccountType(value.clone())
                })?;
                self.select_account_type(account_type);
                return Ok(());
            }
        }
        self.revalidate();
        Ok(())
    }

    pub fn select_account_type(&mut self, account_type: AccountType) {
        self.values.account_type = Some(account_type);
        self.publish_visibility();
        self.revalidate();
    }

    #[tracing::instrument(skip(self, sink), fields(email=%self.values.email))]
    pub fn submit<S: SubmissionSink + ?Sized>(&mut self, sink: &mut S) -> Result<Registration, SubmitError> {
        tracing::info!("Processing registration submit");
        self.submit_attempted = true;

        let registration = match accept(&self.values) {
            Ok(registration) => registration,
            Err(errors) => {
                tracing::info!("Validation failed with reason: {errors}");
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors = FieldErrors::default();

        sink.accept(&registration).map_err(|err| {
            tracing::error!("Sink failed to take registration, {err}");
            err
        })?;
        tracing::info!("Registration handed to sink");
        Ok(registration)
    }

    // Back to the empty form, subscribers see the company name hidden again
    pub fn reset(&mut self) {
        tracing::info!("Resetting registration form");
        self.values = RegistrationInput::default();
        self.errors = FieldErrors::default();
        self.submit_attempted = false;
        self.publish_visibility();
    }

    fn publish_visibility(&mut self) {
        let visibility = self.company_name_visibility();
        let changed = self.visibility.send_if_modified(|current| {
            if *current == visibility {
                return false;
            }
            *current = visibility;
            true
        });
        if !changed {
            return;
        }
        tracing::info!("Company name input is now {visibility}");
        if visibility == Visibility::Hidden && self.options.clear_hidden_company_name && self.values.company_name.is_some() {
            tracing::info!("Clearing hidden company name");
            self.values.company_name = None;
        }
    }

    fn revalidate(&mut self) {
        if !(self.submit_attempted && self.options.revalidate_after_submit) {
            return;
        }
        self.errors = match validate(&self.values) {
            Ok(_) => FieldErrors::default(),
            Err(errors) => errors,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut RegistrationForm, entries: &[(FormField, &str)]) {
        for (field, value) in entries {
            form.update(*field, *value).unwrap();
        }
    }

    fn personal_entries() -> Vec<(FormField, &'static str)> {
        vec![
            (FormField::Email, "a@b.com"),
            (FormField::AccountType, "personal"),
            (FormField::Password, "secret1"),
            (FormField::PasswordConfirm, "secret1"),
        ]
    }

    #[test]
    fn new_form_is_empty_and_hides_company_name() {
        let form = RegistrationForm::default();
        assert_eq!(form.values(), &RegistrationInput::default());
        assert!(form.errors().is_empty());
        assert_eq!(form.company_name_visibility(), Visibility::Hidden);
    }

    #[test]
    fn unknown_account_type_is_rejected() {
        let mut form = RegistrationForm::default();
        let err = form.update(FormField::AccountType, "charity").unwrap_err();
        assert_eq!(err, FormError::UnknownAccountType("charity".to_string()));
        assert_eq!(form.values().account_type, None);
    }

    #[test]
    fn successful_submit_hands_record_to_sink_and_keeps_values() {
        let mut form = RegistrationForm::default();
        fill(&mut form, &personal_entries());
        let mut sink: Vec<Registration> = Vec::new();

        let registration = form.submit(&mut sink).unwrap();

        assert_eq!(sink, vec![registration]);
        assert_eq!(form.values().email, "a@b.com");
        assert_eq!(form.values().password, "secret1");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn failed_submit_stores_errors_and_skips_sink() {
        let mut form = RegistrationForm::default();
        fill(&mut form, &personal_entries());
        form.update(FormField::PasswordConfirm, "secret2").unwrap();
        let mut sink: Vec<Registration> = Vec::new();

        let err = form.submit(&mut sink).unwrap_err();

        let SubmitError::Invalid(errors) = err else { panic!("expected validation failure") };
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::PasswordConfirm]);
        assert_eq!(form.errors(), &errors);
        assert!(sink.is_empty());
    }

    #[test]
    fn stale_company_name_never_reaches_the_sink() {
        let mut form = RegistrationForm::default();
        fill(&mut form, &personal_entries());
        form.update(FormField::AccountType, "company").unwrap();
        form.update(FormField::CompanyName, "Acme").unwrap();
        form.update(FormField::AccountType, "personal").unwrap();

        // still stored while hidden
        assert_eq!(form.values().company_name.as_deref(), Some("Acme"));

        let mut sink: Vec<Registration> = Vec::new();
        let registration = form.submit(&mut sink).unwrap();
        assert_eq!(registration.company_name, "");
        assert_eq!(sink[0].company_name, "");
    }

    #[test]
    fn hidden_company_name_is_cleared_when_configured() {
        let mut form = RegistrationForm::new(FormOptions { clear_hidden_company_name: true, ..FormOptions::default() });
        form.update(FormField::AccountType, "company").unwrap();
        form.update(FormField::CompanyName, "Acme").unwrap();
        form.update(FormField::AccountType, "personal").unwrap();
        assert_eq!(form.values().company_name, None);
    }

    #[test]
    fn visibility_subscribers_only_see_changes() {
        let mut form = RegistrationForm::default();
        let mut receiver = form.subscribe_company_name_visibility();

        form.update(FormField::AccountType, "personal").unwrap();
        assert!(!receiver.has_changed().unwrap());

        form.update(FormField::AccountType, "company").unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), Visibility::Shown);

        form.update(FormField::AccountType, "company").unwrap();
        assert!(!receiver.has_changed().unwrap());

        form.update(FormField::AccountType, "personal").unwrap();
        assert_eq!(*receiver.borrow_and_update(), Visibility::Hidden);
    }

    #[test]
    fn errors_refresh_on_update_after_failed_submit() {
        let mut form = RegistrationForm::default();
        fill(&mut form, &personal_entries());
        form.update(FormField::PasswordConfirm, "secret2").unwrap();
        let mut sink: Vec<Registration> = Vec::new();
        assert!(form.submit(&mut sink).is_err());
        assert!(form.errors().contains(FormField::PasswordConfirm));

        form.update(FormField::PasswordConfirm, "secret1").unwrap();
        assert!(form.errors().is_empty());

        form.update(FormField::Email, "broken").unwrap();
        assert!(form.errors().contains(FormField::Email));
    }

    #[test]
    fn errors_stay_put_when_revalidation_is_off() {
        let mut form = RegistrationForm::new(FormOptions { revalidate_after_submit: false, ..FormOptions::default() });
        fill(&mut form, &personal_entries());
        form.update(FormField::PasswordConfirm, "secret2").unwrap();
        let mut sink: Vec<Registration> = Vec::new();
        assert!(form.submit(&mut sink).is_err());

        form.update(FormField::PasswordConfirm, "secret1").unwrap();
        assert!(form.errors().contains(FormField::PasswordConfirm));
    }

    #[test]
    fn no_validation_before_first_submit() {
        let mut form = RegistrationForm::default();
        form.update(FormField::Email, "broken").unwrap();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn sink_failure_is_reported() {
        let mut form = RegistrationForm::default();
        fill(&mut form, &personal_entries());
        let mut sink = |_: &Registration| -> Result<(), SinkError> { Err(SinkError::Rejected("offline".to_string())) };

        let err = form.submit(&mut sink).unwrap_err();
        assert!(matches!(err, SubmitError::Sink(SinkError::Rejected(_))));
    }

    #[test]
    fn reset_empties_the_form() {
        let mut form = RegistrationForm::default();
        let mut receiver = form.subscribe_company_name_visibility();
        fill(&mut form, &personal_entries());
        form.update(FormField::AccountType, "company").unwrap();
        let _ = receiver.borrow_and_update();

        form.reset();

        assert_eq!(form.values(), &RegistrationInput::default());
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), Visibility::Hidden);
    }
}
