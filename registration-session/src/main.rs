use tokio::io::{self, BufReader};
use registration_form::{
    Form::{FormOptions, RegistrationForm},
    Sink::LogSink,
    Constants,
};

mod session;

// Reads form events as JSON lines from stdin, one event per line, e.g.
// {"type":"update","field":"email","value":"a@b.com"}
// {"type":"submit"}
//
// Accepted registrations are logged, rejected ones log the error map.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), registration_form::E> {
    tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_target(false)
            .without_time()
            .init();

    let options = FormOptions::from_env();
    tracing::info!(clear_hidden_company_name=options.clear_hidden_company_name, revalidate_after_submit=options.revalidate_after_submit, "Starting registration session");

    let mut form = RegistrationForm::new(options);
    let mut visibility = form.subscribe_company_name_visibility();
    let mut sink = LogSink;
    let line_limit = *Constants::EVENT_LINE_LIMIT;

    let mut reader = BufReader::new(io::stdin());
    let mut buf = Vec::new();
    loop {
        match session::next_line(&mut reader, line_limit, &mut buf).await? {
            session::NextLine::Eof => break,
            session::NextLine::Oversized(bytes) => {
                tracing::warn!("Event line is {bytes} bytes, limit is {line_limit}, skipping");
            }
            session::NextLine::Line(line) => {
                session::apply_line(&mut form, &mut sink, &line);
            }
        }
        if visibility.has_changed()? {
            let current = *visibility.borrow_and_update();
            tracing::info!(company_name=%current, "Field visibility changed");
        }
    }

    tracing::info!("Input closed, ending registration session");
    Ok(())
}
