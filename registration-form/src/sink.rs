use thiserror::Error;
use serde_json::json;

use crate::Validation::Registration;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink rejected registration: {0}")]
    Rejected(String),
}

/// Receives accepted, normalized registrations from a submit.
pub trait SubmissionSink {
    fn accept(&mut self, registration: &Registration) -> Result<(), SinkError>;
}

// Logs the record, passwords are left out
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn accept(&mut self, registration: &Registration) -> Result<(), SinkError> {
        let summary = json!({
            "email": registration.email,
            "accountType": registration.account_type,
            "companyName": registration.company_name,
        });
        tracing::info!(registration=%summary, "Registration submitted");
        Ok(())
    }
}

impl SubmissionSink for Vec<Registration> {
    fn accept(&mut self, registration: &Registration) -> Result<(), SinkError> {
        self.push(registration.clone());
        Ok(())
    }
}

impl<F> SubmissionSink for F
where
    F: FnMut(&Registration) -> Result<(), SinkError>,
{
    fn accept(&mut self, registration: &Registration) -> Result<(), SinkError> {
        self(registration)
    }
}
