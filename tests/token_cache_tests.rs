//! Token cache behavior: round-trips, per-type isolation and concurrency.

mod common;

use std::sync::Arc;
use std::thread;

use credentials_google::auth::{decode_profile, TokenCache, TokenCacheRegistry};
use pretty_assertions::assert_eq;

use common::{jane_doe_v2, john_doe_v2, to_bytes, BoundedProfile, TestGoogleToken, TOKEN, TOKEN_2};

fn john() -> TestGoogleToken {
    decode_profile(&to_bytes(&john_doe_v2())).expect("decode john")
}

fn jane() -> TestGoogleToken {
    decode_profile(&to_bytes(&jane_doe_v2())).expect("decode jane")
}

#[test]
fn put_then_get_returns_profile() {
    let cache = TokenCache::unbounded();
    let profile = john();

    cache.put(TOKEN, profile.clone());

    assert_eq!(cache.get(TOKEN), Some(profile));
}

#[test]
fn missing_token_returns_none() {
    let cache: TokenCache<TestGoogleToken> = TokenCache::unbounded();
    assert!(cache.get(TOKEN).is_none());
    assert!(cache.is_empty());
}

#[test]
fn two_tokens_resolve_to_distinct_profiles() {
    let cache = TokenCache::unbounded();
    let first = john();
    let second = jane();

    cache.put(TOKEN, first.clone());
    cache.put(TOKEN_2, second.clone());

    assert_eq!(cache.get(TOKEN), Some(first));
    assert_eq!(cache.get(TOKEN_2), Some(second));
    assert_eq!(cache.len(), 2);
}

#[test]
fn put_overwrites_existing_entry() {
    let cache = TokenCache::unbounded();
    cache.put(TOKEN, john());
    cache.put(TOKEN, jane());

    assert_eq!(cache.get(TOKEN).map(|p| p.name), Some("Jane Doe".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn registry_returns_same_cache_per_type() {
    let registry = TokenCacheRegistry::new();
    assert!(registry.is_empty());

    let first = registry.cache_for::<TestGoogleToken>();
    let second = registry.cache_for::<TestGoogleToken>();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_isolates_profile_types_with_same_token() {
    let registry = TokenCacheRegistry::new();
    let test_cache = registry.cache_for::<TestGoogleToken>();
    let bounded_cache = registry.cache_for::<BoundedProfile>();

    test_cache.put(TOKEN, john());

    assert!(bounded_cache.get(TOKEN).is_none());
    bounded_cache.put(
        TOKEN,
        BoundedProfile {
            id: "other".to_string(),
            name: "Other".to_string(),
        },
    );
    assert_eq!(test_cache.get(TOKEN), Some(john()));
    assert_eq!(registry.len(), 2);
}

#[test]
fn registry_sizes_cache_from_profile_type() {
    let registry = TokenCacheRegistry::new();
    assert_eq!(registry.cache_for::<TestGoogleToken>().capacity(), None);

    let bounded = registry.cache_for::<BoundedProfile>();
    assert_eq!(bounded.capacity(), Some(2));
    for i in 0..5 {
        bounded.put(
            format!("token-{i}"),
            BoundedProfile {
                id: i.to_string(),
                name: format!("user {i}"),
            },
        );
    }
    assert_eq!(bounded.len(), 2);
}

#[test]
fn concurrent_puts_and_gets_do_not_corrupt() {
    let cache = Arc::new(TokenCache::new(64));
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let token = format!("token-{}", i % 32);
                    cache.put(token.clone(), (worker, i));
                    let _ = cache.get(&token);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(cache.len(), 32);
    for i in 0..32 {
        assert!(cache.get(&format!("token-{i}")).is_some());
    }
}

#[test]
fn concurrent_registry_access_creates_one_cache() {
    let registry = Arc::new(TokenCacheRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || registry.cache_for::<TestGoogleToken>())
        })
        .collect();
    let caches: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker panicked"))
        .collect();

    assert!(caches.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(registry.len(), 1);
}
