//! Many clients creating vendors at once.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mock_sdc::handlers::dispatch;
use mock_sdc::onboarding::NewVendor;
use mock_sdc::{build_store, CatalogCommand, CatalogEnvironment, CatalogReply};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_every_concurrent_create_is_answered() {
    let store = Arc::new(build_store(CatalogEnvironment::production()).unwrap());
    let seeded = store.state(|s| s.vendors.len()).await;

    let handles: Vec<_> = (0..5_000)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let vendor = NewVendor {
                    vendor_name: format!("vendor-{n}"),
                    description: "load".to_string(),
                    ..NewVendor::default()
                };
                dispatch(&store, CatalogCommand::CreateVendor(vendor)).await
            })
        })
        .collect();

    for handle in handles {
        let reply = handle.await.expect("task panicked");
        assert!(matches!(reply, Ok(CatalogReply::ItemCreated(_))));
    }

    assert_eq!(store.state(|s| s.vendors.len()).await, seeded + 5_000);
}
