use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use common_types::Event::FormEvent;
use registration_form::{
    Form::{RegistrationForm, SubmitError},
    Sink::SubmissionSink,
    Validation::{FieldErrors, Registration},
};

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Skipped,
    Updated,
    Rejected(FieldErrors),
    Submitted(Registration),
    Reset,
    Failed,
}

#[derive(Debug, PartialEq)]
pub enum NextLine {
    Line(String),
    // byte count of a line that went over the limit and was discarded
    Oversized(usize),
    Eof,
}

// Reads one line holding at most `limit` bytes in memory. Whatever follows
// the limit on an oversized line is drained in buffer-sized chunks.
pub async fn next_line<R: AsyncBufRead + Unpin>(reader: &mut R, limit: usize, buf: &mut Vec<u8>) -> io::Result<NextLine> {
    buf.clear();
    let read = (&mut *reader).take(limit as u64 + 1).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(NextLine::Eof);
    }
    if buf.last() == Some(&b'\n') || buf.len() <= limit {
        return Ok(NextLine::Line(String::from_utf8_lossy(buf).into_owned()));
    }

    let mut skipped = buf.len();
    buf.clear();
    loop {
        let (used, done) = {
            let chunk = reader.fill_buf().await?;
            if chunk.is_empty() {
                break;
            }
            match chunk.iter().position(|byte| *byte == b'\n') {
                Some(index) => (index + 1, true),
                None => (chunk.len(), false),
            }
        };
        reader.consume(used);
        skipped += used;
        if done {
            break;
        }
    }
    Ok(NextLine::Oversized(skipped))
}

// Applies one input line to the form. Bad lines are logged and skipped,
// nothing here stops the session.
pub fn apply_line<S: SubmissionSink>(form: &mut RegistrationForm, sink: &mut S, line: &str) -> Outcome {
    let line = line.trim();
    if line.is_empty() {
        return Outcome::Skipped;
    }
    let event = match serde_json::from_str::<FormEvent>(line) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!("Failed to parse form event, {err}");
            return Outcome::Skipped;
        }
    };
    apply_event(form, sink, event)
}

pub fn apply_event<S: SubmissionSink>(form: &mut RegistrationForm, sink: &mut S, event: FormEvent) -> Outcome {
    match event {
        FormEvent::Update { field, value } => match form.update(field, value) {
            Ok(()) => Outcome::Updated,
            Err(err) => {
                tracing::warn!(%field, "Rejected field update, {err}");
                Outcome::Failed
            }
        },
        FormEvent::Submit => match form.submit(sink) {
            Ok(registration) => Outcome::Submitted(registration),
            Err(SubmitError::Invalid(errors)) => {
                let rendered = serde_json::to_string(&errors).unwrap_or_else(|_| errors.to_string());
                tracing::warn!(errors=%rendered, "Registration rejected");
                Outcome::Rejected(errors)
            }
            Err(err) => {
                tracing::error!("Submission failed, {err}");
                Outcome::Failed
            }
        },
        FormEvent::Reset => {
            form.reset();
            Outcome::Reset
        }
    }
}
