use garde::Validate;
use common_types::{
    Account::AccountType,
    Field::FormField,
};

mod input;
mod errors;

pub use input::{RegistrationInput, Registration, password_char_count};
pub use errors::{ErrorKind, FieldError, FieldErrors};

// A rule that looks at the whole record and yields at most one error
pub type RecordRule = fn(&RegistrationInput) -> Option<(FormField, FieldError)>;

// Every rule runs, errors from all of them are reported together
pub const RECORD_RULES: [RecordRule; 3] = [
    account_type_selected,
    passwords_match,
    company_name_present,
];

// Validation of a registration, in order:
//
// 1. Field-level rules declared on RegistrationInput, handled by garde
// 2. Record-level rules in RECORD_RULES
// 3. Merge everything into one FieldErrors map
//
// Pure, the input is never touched. The accepted record still carries
// whatever company name was typed, see normalize.
pub fn validate(input: &RegistrationInput) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::default();

    if let Err(report) = input.validate(&()) {
        for (path, _) in report.iter() {
            let (field, error) = match path.to_string().as_str() {
                "email" => (FormField::Email, FieldError::invalid_email()),
                "password" => (FormField::Password, FieldError::password_length(&input.password)),
                other => {
                    tracing::warn!("Validation reported unknown path {other}");
                    continue;
                }
            };
            // one message per field, however many rules on it failed
            if !errors.contains(field) {
                errors.push(field, error);
            }
        }
    }

    for rule in RECORD_RULES {
        if let Some((field, error)) = rule(input) {
            errors.push(field, error);
        }
    }

    match input.account_type {
        Some(account_type) if errors.is_empty() => Ok(Registration {
            email: input.email.clone(),
            password: input.password.clone(),
            password_confirm: input.password_confirm.clone(),
            account_type,
            company_name: input.company_name.clone().unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

/// Drops the company name of a personal account. Runs on accepted records
/// only, after validation.
pub fn normalize(mut registration: Registration) -> Registration {
    if registration.account_type == AccountType::Personal && !registration.company_name.is_empty() {
        tracing::info!("Dropping company name from personal registration");
        registration.company_name.clear();
    }
    registration
}

/// Validate then normalize, what a submit goes through before reaching a sink.
pub fn accept(input: &RegistrationInput) -> Result<Registration, FieldErrors> {
    validate(input).map(normalize)
}

pub fn account_type_selected(input: &RegistrationInput) -> Option<(FormField, FieldError)> {
    match input.account_type {
        Some(_) => None,
        None => Some((FormField::AccountType, FieldError::required())),
    }
}

// Compared verbatim, no trimming
pub fn passwords_match(input: &RegistrationInput) -> Option<(FormField, FieldError)> {
    if input.password == input.password_confirm {
        return None;
    }
    Some((FormField::PasswordConfirm, FieldError::password_mismatch()))
}

pub fn company_name_present(input: &RegistrationInput) -> Option<(FormField, FieldError)> {
    if input.account_type != Some(AccountType::Company) {
        return None;
    }
    match input.company_name.as_deref() {
        Some(name) if !name.is_empty() => None,
        _ => Some((FormField::CompanyName, FieldError::company_name_required())),
    }
}
