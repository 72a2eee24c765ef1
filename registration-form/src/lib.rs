pub type E = Box<dyn ::std::error::Error + Send + Sync + 'static>;

mod rules;
mod form;
mod sink;

#[allow(non_snake_case)]
pub mod Validation {
    pub use crate::rules::*;
}

#[allow(non_snake_case)]
pub mod Form {
    pub use crate::form::*;
}

#[allow(non_snake_case)]
pub mod Sink {
    pub use crate::sink::*;
}

#[allow(non_snake_case)]
pub mod Constants {
    use lazy_static::lazy_static;

    // Inclusive bounds on password length, in characters
    pub const PASSWORD_MIN_LENGTH: usize = 6;
    pub const PASSWORD_MAX_LENGTH: usize = 16;

    fn bool_var(name: &str, default: bool) -> bool {
        match dotenvy::var(name) {
            Ok(value) => {
                if let Ok(parsed) = value.parse() {
                    tracing::info!("Using custom {name}: {parsed}");
                    parsed
                } else {
                    tracing::info!("Failed to parse {name}, using default, {default}");
                    default
                }
            }
            _ => default,
        }
    }

    // WARNING: These are global variables that get
    // initialised on first use, and should not
    // be written to after
    lazy_static!{
        pub static ref CLEAR_HIDDEN_COMPANY_NAME: bool = bool_var("CLEAR_HIDDEN_COMPANY_NAME", false);
        pub static ref REVALIDATE_AFTER_SUBMIT: bool = bool_var("REVALIDATE_AFTER_SUBMIT", true);
        pub static ref EVENT_LINE_LIMIT: usize = {
            let maybe = dotenvy::var("EVENT_LINE_LIMIT");
            let mut limit = 4096;
            match maybe {
                Ok(bytes) => {
                    if let Ok(new_limit) = bytes.parse() {
                        limit = new_limit;
                        tracing::info!("Using custom EVENT_LINE_LIMIT: {limit}");
                    } else {
                        tracing::info!("Failed to parse EVENT_LINE_LIMIT, using default, {limit}");
                    }
                }
                _ => ()
            }
            limit
        };
    }
}
