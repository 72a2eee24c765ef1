#[allow(non_snake_case)]
pub mod Account {
    use ::std::fmt;
    use ::std::str;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[serde(rename_all = "lowercase")]
    pub enum AccountType {
        Personal,
        Company,
    }

    impl fmt::Display for AccountType {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                AccountType::Personal => write!(f, "personal"),
                AccountType::Company => write!(f, "company"),
            }
        }
    }

    impl str::FromStr for AccountType {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "personal" => Ok(AccountType::Personal),
                "company" => Ok(AccountType::Company),
                _ => Err(format!("'{}' is not a valid AccountType", s)),
            }
        }
    }
}

#[allow(non_snake_case)]
pub mod Field {
    use ::std::fmt;
    use ::std::str;
    use serde::{Deserialize, Serialize};

    // Ordering follows the order the fields appear on the form, error maps
    // keyed by FormField iterate in that order.
    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum FormField {
        #[serde(rename="email")]
        Email,
        #[serde(rename="accountType")]
        AccountType,
        #[serde(rename="companyName")]
        CompanyName,
        #[serde(rename="password")]
        Password,
        #[serde(rename="passwordConfirm")]
        PasswordConfirm,
    }

    impl FormField {
        pub const ALL: [FormField; 5] = [
            FormField::Email,
            FormField::AccountType,
            FormField::CompanyName,
            FormField::Password,
            FormField::PasswordConfirm,
        ];

        pub fn name(&self) -> &'static str {
            match self {
                FormField::Email => "email",
                FormField::AccountType => "accountType",
                FormField::CompanyName => "companyName",
                FormField::Password => "password",
                FormField::PasswordConfirm => "passwordConfirm",
            }
        }
    }

    impl fmt::Display for FormField {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", self.name())
        }
    }

    impl str::FromStr for FormField {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            FormField::ALL
                .into_iter()
                .find(|field| field.name() == s)
                .ok_or_else(|| format!("'{}' is not a valid FormField", s))
        }
    }
}

#[allow(non_snake_case)]
pub mod Event {
    use serde::{Deserialize, Serialize};
    use crate::Field::FormField;

    // One line of input emitted by whatever drives the form, e.g.
    // {"type":"update","field":"email","value":"a@b.com"}
    #[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
    #[serde(tag = "type", rename_all = "lowercase")]
    pub enum FormEvent {
        Update {
            field: FormField,
            value: String,
        },
        Submit,
        Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::Account::AccountType;
    use super::Event::FormEvent;
    use super::Field::FormField;

    #[test]
    fn account_type_round_trips_through_its_display_name() {
        for account_type in [AccountType::Personal, AccountType::Company] {
            assert_eq!(account_type.to_string().parse::<AccountType>(), Ok(account_type));
        }
        assert!("Company".parse::<AccountType>().is_err());
    }

    #[test]
    fn form_field_names_are_camel_case() {
        assert_eq!("passwordConfirm".parse::<FormField>(), Ok(FormField::PasswordConfirm));
        assert_eq!(FormField::CompanyName.to_string(), "companyName");
        assert!("password_confirm".parse::<FormField>().is_err());
    }

    #[test]
    fn form_event_is_parsed_from_tagged_json() {
        let event: FormEvent = serde_json::from_str(r#"{"type":"update","field":"accountType","value":"company"}"#).unwrap();
        assert_eq!(event, FormEvent::Update { field: FormField::AccountType, value: "company".to_string() });

        let event: FormEvent = serde_json::from_str(r#"{"type":"submit"}"#).unwrap();
        assert_eq!(event, FormEvent::Submit);
    }
}
