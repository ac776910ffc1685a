//! Concurrency tests: mutations of distinct roles never lose updates, and
//! readers always see complete matcher lists.

use role_cache::{HttpMethod, MemoryRoleStore, Privilege, RoleCache, RoleRecord};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_inserts_of_distinct_roles_all_land() {
    let cache = Arc::new(RoleCache::new(MemoryRoleStore::new()));
    cache.initialize().unwrap();

    let writers: Vec<_> = (0..16i64)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let name = format!("ROLE_{i}");
                let record = RoleRecord::new(i, &name).with_privileges(vec![Privilege::new(
                    format!("/service/{i}/**"),
                    Some(HttpMethod::Get),
                )]);
                cache.insert_role(record).unwrap();
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let readers: Vec<_> = (0..16i64)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let name = format!("ROLE_{i}");
                assert!(cache.contains_role(&name).unwrap());
                assert_eq!(cache.role_id(&name).unwrap(), Some(i));
                assert!(cache
                    .is_authorized(&name, &format!("/service/{i}/status"), HttpMethod::Get)
                    .unwrap());
                assert!(!cache
                    .is_authorized(&name, &format!("/service/{i}/status"), HttpMethod::Post)
                    .unwrap());
            })
        })
        .collect();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_readers_racing_refreshes_see_complete_lists() {
    let store = MemoryRoleStore::new();
    store.seed(RoleRecord::new(1, "API").with_privileges(vec![
        Privilege::new("/api/v1/**", Some(HttpMethod::Get)),
        Privilege::new("/api/v2/**", Some(HttpMethod::Get)),
    ]));
    let cache = Arc::new(RoleCache::new(store));
    cache.initialize().unwrap();

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for _ in 0..500 {
                cache
                    .refresh_privileges(
                        "API",
                        vec![
                            Privilege::new("/api/v1/**", Some(HttpMethod::Get)),
                            Privilege::new("/api/v2/**", Some(HttpMethod::Get)),
                        ],
                    )
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..500 {
                    // Either both matchers or, mid-replace, a complete older
                    // pair; never a partially built list.
                    let matchers = cache.matchers_for("API").unwrap();
                    assert_eq!(matchers.len(), 2);
                    assert!(cache
                        .is_authorized("API", "/api/v1/items", HttpMethod::Get)
                        .unwrap());
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_last_writer_wins_on_same_role_without_corruption() {
    let store = MemoryRoleStore::new();
    store.seed(RoleRecord::new(1, "CONTESTED"));
    let cache = Arc::new(RoleCache::new(store));
    cache.initialize().unwrap();

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..100 {
                    cache
                        .refresh_privileges(
                            "CONTESTED",
                            vec![Privilege::new(format!("/writer/{i}/**"), None)],
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    // Whichever writer landed last, the matcher list is derived from exactly
    // one complete privilege set.
    let matchers = cache.matchers_for("CONTESTED").unwrap();
    assert_eq!(matchers.len(), 1);
    let privileges = cache.role_privileges("CONTESTED").unwrap();
    assert_eq!(privileges.len(), 1);
    assert_eq!(privileges[0].uri(), Some(matchers[0].uri()));
}
