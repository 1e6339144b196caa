use errwrap::{is, string, unwrap, wrap, ContextualError, Error};

fn main() {
    let disk_full = string("disk full");
    let retry_failed = string("retry failed");
    let root: Error = ContextualError::new("operation X failed").into();
    let wrapped = wrap(root, [disk_full.clone(), retry_failed.clone()]);

    assert_eq!(wrapped.to_string(), "operation X failed");
    assert!(is(&wrapped, &disk_full));
    assert!(is(&wrapped, &retry_failed));

    let causes = unwrap(&wrapped).unwrap();
    assert_eq!(causes.to_string(), "disk full");
    assert!(unwrap(&causes).unwrap().ptr_eq(&retry_failed));
}
