//! # Report Demo
//!
//! Builds a layered failure and prints it the way an application would:
//! the full form to the log, the redacted form to the user.
//!
//! Run with `RUST_LOG=trace` to see cause assignments and insertions.

use suspicious::{Error, ErrorCollection, ErrorKind, Render, RenderStyle, Suspicious};

fn read_config(path: &str) -> suspicious::Result<Suspicious<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Suspicious::from_value(text)),
        Err(err) => {
            let error = Error::unexpected_from_exception(err, None, None)?;
            Ok(Suspicious::from_error(error))
        }
    }
}

fn start_service(path: &str) -> suspicious::Result<Suspicious<usize>> {
    let config = read_config(path)?;
    if config.is_value() {
        return Ok(config.map(|text| text.len()));
    }

    let startup = ErrorCollection::empty("service", "startup aborted")?;
    startup.add_error(Error::failure("no usable configuration", None)?)?;
    let result = Suspicious::from_error_collection(startup);
    result.set_cause_from(&config)?;
    Ok(result)
}

fn main() -> suspicious::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Suspicious Report Demo ===\n");

    let result = start_service("/nonexistent/service.toml")?;
    if let Some(worst) = result.most_severe_deep()? {
        tracing::error!(kind = %worst.kind(), "startup failed");
        println!("headline kind: {}", worst.kind());
    }

    println!("\n--- operator view ---");
    println!("{}", result);

    println!("\n--- user view ---");
    println!("{}", result.redacted());

    println!("\n--- compact view ---");
    let compact = RenderStyle::redacted()
        .with_collection_link("\n  caused by ")
        .with_max_depth(1);
    println!("{}", result.render(&compact));

    if let Some(error) = result.find_by_kind_deep(&ErrorKind::UNEXPECTED)? {
        println!("\nunderlying: {}", error.description());
    }

    Ok(())
}
