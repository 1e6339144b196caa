use errwrap::{
    as_type, chain, detailed_error, file_and_line, is, labeled_by, labeled_by_any, labels, string,
    unwrap, with, wrap, Cause, ContextualError, Error, Labelable, Located, Location,
};

#[test]
fn wrapping_nothing_unwraps_to_nothing() {
    let err: Error = ContextualError::new("custom error").into();
    assert!(unwrap(&err).is_none());
}

#[test]
fn wrapping_one_error() {
    let raw = string("stdlib error");
    let custom = ContextualError::new("custom error");
    let wrapping = wrap(custom.clone().into(), [raw.clone()]);

    let wrapped = wrapping.downcast_ref::<ContextualError>().unwrap();
    assert!(custom.equivalent(wrapped));
    assert!(is(&wrapping, &raw));
    assert!(is(&wrapping, &custom.clone().into()));
    assert!(unwrap(&wrapping).unwrap().ptr_eq(&raw));
}

#[test]
fn wrapping_multiple_errors() {
    let raw1 = string("stdlib error 1");
    let raw2 = string("stdlib error 2");
    let custom = ContextualError::new("custom error");
    let wrapping = wrap(custom.clone().into(), [raw1.clone(), raw2.clone()]);

    assert!(custom.equivalent(wrapping.downcast_ref().unwrap()));
    assert_eq!(wrapping.to_string(), "custom error");
    assert!(is(&wrapping, &raw1));
    assert!(is(&wrapping, &raw2));
    assert!(is(&wrapping, &custom.into()));

    let unwrapped = unwrap(&wrapping).unwrap();
    assert!(unwrapped.downcast_ref::<ContextualError>().is_none());
    assert_eq!(unwrapped.to_string(), "stdlib error 1");
    assert!(is(&unwrapped, &raw1));
    assert!(is(&unwrapped, &raw2));
}

#[test]
fn wrap_without_causes_changes_nothing() {
    let err = ContextualError::new("custom error").with(["a"]);
    let same = err.clone().wrap(Vec::<Error>::new());
    assert!(err.equivalent(&same));
    assert_eq!(same.labels(), ["a"]);
    assert!(same.unwrap_cause().is_none());
}

#[test]
fn unwrapping_drains_causes_in_order() {
    let c1 = string("c1");
    let c2 = string("c2");
    let c3 = string("c3");
    let w = errwrap::new("root", [c1.clone(), c2.clone(), c3.clone()]);

    let first = unwrap(&w).unwrap();
    assert_eq!(first.to_string(), "c1");
    let second = unwrap(&first).unwrap();
    assert_eq!(second.to_string(), "c2");
    let third = unwrap(&second).unwrap();
    assert!(third.ptr_eq(&c3));
    assert!(unwrap(&third).is_none());
}

#[test]
fn chained_wraps_compose() {
    let location = Location::new("src/main.rs", 1, 1);
    let (c1, c2, c3) = (string("c1"), string("c2"), string("c3"));
    let root = ContextualError::at("root", location);

    let stepwise = root.clone().wrap([c1.clone()]).wrap([c2.clone(), c3.clone()]);
    let at_once = root.wrap([c1, c2, c3]);

    let stepwise: Vec<String> = chain(&stepwise.into()).map(|e| e.to_string()).collect();
    let at_once: Vec<String> = chain(&at_once.into()).map(|e| e.to_string()).collect();
    assert_eq!(stepwise, at_once);
    assert_eq!(at_once, ["root", "c1", "c2", "c3"]);
}

#[test]
fn labels_are_copied_not_shared() {
    let e = ContextualError::new("custom error");
    let e2 = e.clone().with(["a"]);
    let e3 = e2.clone().with(["b"]);
    assert!(e.labels().is_empty());
    assert_eq!(e2.labels(), ["a"]);
    assert_eq!(e3.labels(), ["a", "b"]);
}

#[test]
fn labels_keep_duplicates_and_order() {
    let err = with(ContextualError::new("x").into(), ["b", "a", "b"]);
    assert_eq!(labels(&err), ["b", "a", "b"]);
    assert!(labeled_by(&err, "a"));
    assert!(!labeled_by(&err, "c"));
    assert!(labeled_by_any(&err, ["c", "a"]));
    assert!(!labeled_by_any(&err, ["c", "d"]));
    assert!(!labeled_by_any(&err, Vec::<&str>::new()));
}

#[test]
fn plain_errors_have_neutral_defaults() {
    let raw = string("stdlib error");
    let labeled = with(raw.clone(), ["a"]);
    assert!(labeled.ptr_eq(&raw));
    assert!(labels(&raw).is_empty());
    assert!(!labeled_by(&raw, "a"));
    assert!(!labeled_by_any(&raw, ["a"]));
    assert_eq!(file_and_line(&raw), None);
}

#[test]
fn equivalent_errors_match() {
    let at = Location::new("src/db.rs", 12, 5);
    let a: Error = ContextualError::at("connection lost", at.clone()).into();
    let b: Error = ContextualError::at("connection lost", at.clone()).with(["x"]).into();
    let other_message: Error = ContextualError::at("timeout", at).into();
    let other_line: Error =
        ContextualError::at("connection lost", Location::new("src/db.rs", 13, 5)).into();
    let other_file: Error =
        ContextualError::at("connection lost", Location::new("src/net.rs", 12, 5)).into();

    assert!(is(&a, &b));
    assert!(!is(&a, &other_message));
    assert!(!is(&a, &other_line));
    assert!(!is(&a, &other_file));
}

#[test]
fn is_finds_contextual_errors_deep_in_the_chain() {
    let inner = ContextualError::at("inner", Location::new("a.rs", 1, 1));
    let outer = errwrap::new("outer", [string("first"), inner.clone().into()]);
    assert!(is(&outer, &inner.into()));
    assert!(!is(&outer, &string("first")));
}

#[test]
fn scenario_operation_failed() {
    let e1 = string("disk full");
    let e2 = string("retry failed");
    let root = ContextualError::new("operation X failed");
    let wrapped = wrap(root.into(), [e1.clone(), e2.clone()]);

    assert_eq!(wrapped.to_string(), "operation X failed");
    assert!(is(&wrapped, &e1));
    assert!(is(&wrapped, &e2));
    assert_eq!(unwrap(&wrapped).unwrap().to_string(), "disk full");
}

#[test]
fn detailed_error_reports_location_and_causes() {
    let line = line!() + 1;
    let err = errwrap::new("operation X failed", [string("disk full")]);
    assert_eq!(
        detailed_error(&err),
        format!("({}:{line}) operation X failed\nCaused by: disk full", file!())
    );
}

#[test]
fn as_type_finds_a_link() {
    let inner = ContextualError::at("inner", Location::new("a.rs", 1, 1));
    let err = wrap(string("outer"), [inner.into()]);
    let found: ContextualError = as_type(&err).unwrap();
    assert_eq!(found.message(), "inner");
    assert!(as_type::<ContextualError>(&string("plain")).is_none());
}

#[test]
fn source_chain_matches_unwrap() {
    let err = errwrap::new("root", [string("c1"), string("c2"), string("c3")]);
    let mut sources = vec![];
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = current {
        sources.push(e.to_string());
        current = e.source();
    }
    assert_eq!(sources, ["root", "c1", "c2", "c3"]);
}

#[test]
fn converts_into_anyhow_and_eyre() {
    fn fails() -> errwrap::Result<()> {
        errwrap::bail!("kaboom {}", 42);
    }
    let report: anyhow::Error = fails().unwrap_err().into();
    assert_eq!(report.to_string(), "kaboom 42");
    let report: color_eyre::Report = fails().unwrap_err().into();
    assert_eq!(report.to_string(), "kaboom 42");

    let back = Error::from(anyhow::anyhow!("from anyhow"));
    assert_eq!(back.to_string(), "from anyhow");
}

#[test]
fn ensure_bails_when_false() {
    fn check(n: u32) -> errwrap::Result<u32> {
        errwrap::ensure!(n > 2, "{} is too small", n);
        Ok(n)
    }
    assert_eq!(check(3).unwrap(), 3);
    let err = check(1).unwrap_err();
    assert_eq!(err.to_string(), "1 is too small");
    assert_eq!(file_and_line(&err).unwrap().0, file!());
}

#[test]
fn format_err_is_plain() {
    let err = errwrap::format_err!("code {}", 7);
    assert_eq!(err.to_string(), "code 7");
    assert!(err.as_cause().is_none());
}

/// A third-party error joining the protocol without being a `ContextualError`.
#[derive(Debug)]
struct Tagged {
    tags: Vec<String>,
    at: Location,
}

impl std::fmt::Display for Tagged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tagged")
    }
}

impl std::error::Error for Tagged {}

impl Cause for Tagged {
    fn as_labelable(&self) -> Option<&dyn Labelable> {
        Some(self)
    }

    fn as_located(&self) -> Option<&dyn Located> {
        Some(self)
    }
}

impl Labelable for Tagged {
    fn with(&self, labels: Vec<String>) -> Error {
        let mut tags = self.tags.clone();
        tags.extend(labels);
        Error::from_cause(Tagged {
            tags,
            at: self.at.clone(),
        })
    }

    fn labels(&self) -> &[String] {
        &self.tags
    }
}

impl Located for Tagged {
    fn location(&self) -> Option<&Location> {
        Some(&self.at)
    }
}

#[test]
fn third_party_errors_opt_in() {
    let err = Error::from_cause(Tagged {
        tags: vec![],
        at: Location::new("lib.rs", 4, 2),
    });
    let labeled = with(err.clone(), ["net"]);
    assert!(labels(&err).is_empty());
    assert!(labeled_by(&labeled, "net"));
    assert_eq!(file_and_line(&labeled), Some(("lib.rs", 4)));

    let wrapped = wrap(err, [string("cause")]);
    assert_eq!(wrapped.to_string(), "tagged");
    assert_eq!(unwrap(&wrapped).unwrap().to_string(), "cause");
}
