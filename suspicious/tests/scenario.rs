//! End-to-end scenarios: errors raised in one layer, wrapped and chained by
//! the layers above, then searched and rendered at the top.

use suspicious::{Error, ErrorCollection, ErrorKind, Render, RenderStyle, Suspicious};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, thiserror::Error)]
#[error("no space left on device")]
struct NoSpace;

#[test]
fn test_disk_full_scenario() {
    init_tracing();

    let e1 = Error::failure("disk full", None).unwrap();
    let e2 = Error::unexpected_from_exception(NoSpace, None, Some(e1.clone())).unwrap();
    let coll = ErrorCollection::create("io", "write failed", [e2.clone()]).unwrap();
    let s: Suspicious<u64> = Suspicious::from_error_collection(coll);

    let worst = s.most_severe_deep().unwrap().unwrap();
    assert_eq!(worst.kind(), &ErrorKind::UNEXPECTED);
    assert!(worst.ptr_eq(&e2));

    let failure = s.find_by_kind_deep(&ErrorKind::FAILURE).unwrap().unwrap();
    assert!(failure.ptr_eq(&e1));
    assert_eq!(failure, e1);
}

#[test]
fn test_layered_collections() {
    init_tracing();

    let storage = ErrorCollection::empty("storage", "flush failed").unwrap();
    storage
        .add_error(Error::failure("disk full", None).unwrap())
        .unwrap();

    let service: Suspicious<String> =
        Suspicious::from_error_collection(ErrorCollection::empty("service", "save failed").unwrap());
    assert!(service.is_unrecorded_failure());

    service.set_cause(Some(storage.clone())).unwrap();
    assert!(!service.is_unrecorded_failure());

    let collection = service.unwrap_error_collection().unwrap();
    assert!(!collection.contains_errors());
    assert!(collection.contains_errors_deep());
    assert!(collection.cause().unwrap().ptr_eq(&storage));

    // storage cannot point back up at the service layer
    assert!(storage
        .set_cause(Some(collection.clone()))
        .is_err_and(|e| e.as_str() == "CycleError"));
}

#[test]
fn test_no_result_ranks_lowest() {
    let missing = Error::no_result("user not found", None).unwrap();
    let custom = ErrorKind::custom("PermissionDenied", 50).unwrap();
    let denied = Error::new(custom.clone(), "not an admin").unwrap();

    let coll = ErrorCollection::create("auth", "login rejected", [missing, denied.clone()]).unwrap();
    assert!(coll.most_severe_deep().unwrap().ptr_eq(&denied));
    assert_eq!(coll.highest_kind_deep(), Some(custom));
}

#[test]
fn test_redaction() {
    let secret = "token=abc123";
    let error = Error::create(
        ErrorKind::FAILURE,
        "authentication failed",
        Some(secret.to_string()),
        None,
    )
    .unwrap();
    let s: Suspicious<String> = Suspicious::from_error(error);

    assert!(s.to_string().contains(secret));
    assert!(!s.redacted().to_string().contains(secret));
    assert!(!s.render(&RenderStyle::full().with_details(false)).contains(secret));
}

#[test]
fn test_pipeline_with_combinators() {
    fn parse(raw: &str) -> Suspicious<i64> {
        match raw.trim().parse::<i64>() {
            Ok(n) => Suspicious::from_value(n),
            Err(err) => Suspicious::from_error(
                Error::unexpected_from_exception(err, Some("not a number"), None).unwrap(),
            ),
        }
    }

    fn non_negative(n: i64) -> Suspicious<u64> {
        match u64::try_from(n) {
            Ok(n) => Suspicious::from_value(n),
            Err(_) => Suspicious::from_error(Error::failure("negative input", None).unwrap()),
        }
    }

    assert_eq!(parse(" 12 ").and_then(non_negative).into_value().unwrap(), 12);

    let negative = parse("-3").and_then(non_negative);
    assert_eq!(
        negative.most_severe_deep().unwrap().unwrap().kind(),
        &ErrorKind::FAILURE
    );

    let garbage = parse("twelve").and_then(non_negative);
    let worst = garbage.most_severe_deep().unwrap().unwrap();
    assert_eq!(worst.description(), "not a number");
    assert!(worst.details().is_some());
}
