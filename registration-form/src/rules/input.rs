use serde::{Deserialize, Serialize};
use garde::Validate;
use common_types::Account::AccountType;

use crate::Constants::{PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH};

// Field-level rules only. Rules spanning several fields live in rules.rs and
// run against the whole record.
//
// Email grammar: a dot-atom local part (no leading dot, no ".." and ending in
// [A-Z0-9_+-]) and a domain of one or more labels followed by an alphabetic
// TLD of at least two letters.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationInput {
    #[garde(pattern(r"(?i)^(?:[A-Z0-9_'+\-]+\.)*[A-Z0-9_'+\-]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$"))]
    pub email: String,
    #[garde(custom(password_length))]
    pub password: String,
    #[garde(skip)]
    pub password_confirm: String,
    #[garde(skip)]
    pub account_type: Option<AccountType>,
    #[garde(skip)]
    pub company_name: Option<String>,
}

// Accepted record, every field typed
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub account_type: AccountType,
    pub company_name: String,
}

// Counted in UTF-16 code units, the unit browsers report as string length.
// An emoji outside the BMP counts twice.
pub fn password_char_count(password: &str) -> usize {
    password.encode_utf16().count()
}

#[allow(clippy::ptr_arg)]
fn password_length(value: &String, _: &()) -> garde::Result {
    let count = password_char_count(value);
    if count < PASSWORD_MIN_LENGTH {
        return Err(garde::Error::new(format!("password has {count} characters, at least {PASSWORD_MIN_LENGTH} required")));
    }
    if count > PASSWORD_MAX_LENGTH {
        return Err(garde::Error::new(format!("password has {count} characters, at most {PASSWORD_MAX_LENGTH} allowed")));
    }
    Ok(())
}
