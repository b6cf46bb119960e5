//! Access policy as seen through the facade.

use news_proxy::{
    AccessPolicy, Caller, NewsFacade, Operation, OperationError, OperationResult, Role,
};

use crate::support::CountingStore;

fn run(facade: &NewsFacade<CountingStore>, operation: Operation, caller: &Caller) -> OperationResult {
    match operation {
        Operation::Read => facade.read_message(1, caller),
        Operation::Add => facade.add_message("Title", "Content", caller),
        Operation::Edit => facade.edit_message(1, "Updated content", caller),
        Operation::Delete => facade.delete_message(1, caller),
    }
}

// ============================================================================
// Test 1: every (operation, role) pair follows the role order
// ============================================================================

#[test]
fn facade_enforces_role_order_for_every_pair() {
    let policy = AccessPolicy::new();

    for operation in Operation::ALL {
        for role in Role::ALL {
            let facade = NewsFacade::new(CountingStore::new());
            facade.store().seed("Title", "Content");

            let result = run(&facade, operation, &Caller::new("caller", role));
            let allowed = role >= policy.minimum_role(operation);

            assert_eq!(
                !result.is_access_denied(),
                allowed,
                "{operation} as {role}: {result}"
            );
            if !allowed {
                assert_eq!(
                    result.error(),
                    Some(&OperationError::AccessDenied(operation))
                );
            }
        }
    }
}

// ============================================================================
// Test 2: denied calls have no store or cache side effects
// ============================================================================

#[test]
fn denied_calls_touch_neither_store_nor_cache() {
    let facade = NewsFacade::new(CountingStore::new());
    facade.store().seed("Title", "Content");
    // Warm the cache so a stray invalidation would be visible.
    facade.read_message(1, &Caller::guest("reader"));
    let calls_before = facade.store().calls();
    let stats_before = facade.cache().stats();

    let guest = Caller::guest("anon");
    let user = Caller::new("john", Role::User);
    let moderator = Caller::new("maria", Role::Moderator);

    assert!(facade.add_message("t", "c", &guest).is_access_denied());
    assert!(facade.edit_message(1, "c", &user).is_access_denied());
    assert!(facade.delete_message(1, &moderator).is_access_denied());

    assert_eq!(facade.store().calls(), calls_before);
    assert_eq!(facade.cache().stats(), stats_before);
    assert!(facade.cache().contains(1));
}

// ============================================================================
// Test 3: a guest cannot add
// ============================================================================

#[test]
fn guest_add_leaves_record_count_unchanged() {
    let facade = NewsFacade::new(CountingStore::new());
    let admin = Caller::new("root", Role::Admin);
    facade.add_message("existing", "record", &admin);
    assert_eq!(facade.store().record_count(), 1);

    let result = facade.add_message("Title", "Content", &Caller::guest("anon"));

    assert!(result.is_access_denied());
    assert_eq!(
        result.message(),
        "Access denied: insufficient permissions to add a message."
    );
    assert_eq!(facade.store().record_count(), 1);
}

// ============================================================================
// Test 4: guests can read
// ============================================================================

#[test]
fn guest_can_read() {
    let facade = NewsFacade::new(CountingStore::new());
    facade.store().seed("Title", "Content");

    let result = facade.read_message(1, &Caller::guest("anon"));
    assert_eq!(result, OperationResult::success("Title: Content"));
}
