use crate::boundary::{InvokePayload, Unlisten};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

fn counted() -> (Arc<AtomicUsize>, Unlisten) {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let unlisten = Unlisten::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (released, unlisten)
}

/// **VALUE**: Releasing twice runs the release once.
#[test]
fn given_unlisten_when_called_twice_then_releases_once() {
    let (released, unlisten) = counted();

    assert!(unlisten.unlisten(), "First call releases");
    assert!(!unlisten.unlisten(), "Second call is a no-op");

    assert_eq!(released.load(Ordering::SeqCst), 1);
    assert!(!unlisten.is_listening());
}

/// **VALUE**: Dropping the handle does not release the listener; only an
/// explicit call does.
#[test]
fn given_unlisten_when_dropped_then_listener_kept() {
    let (released, unlisten) = counted();

    drop(unlisten);

    assert_eq!(released.load(Ordering::SeqCst), 0);
}

#[test]
fn given_invoke_payload_when_serialized_then_nests_under_data() {
    let payload = InvokePayload {
        data: json!({ "key": "AddOne", "params": { "value": 5 } }),
    };

    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        value,
        json!({ "data": { "key": "AddOne", "params": { "value": 5 } } })
    );
}
