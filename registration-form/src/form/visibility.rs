use ::std::fmt;
use common_types::Account::AccountType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Visibility::Shown => write!(f, "shown"),
            Visibility::Hidden => write!(f, "hidden"),
        }
    }
}

// The company name input only exists for company accounts
pub fn company_name_visibility(account_type: Option<AccountType>) -> Visibility {
    match account_type {
        Some(AccountType::Company) => Visibility::Shown,
        Some(AccountType::Personal) | None => Visibility::Hidden,
    }
}
