use std::any::Any;

/// Extract a human-readable message from a panic payload.
///
/// Payloads raised via `panic!("...")` are `&str` or `String`; anything else
/// gets a fixed placeholder.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
