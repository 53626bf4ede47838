//! # Concurrent Submissions
//!
//! Invocations racing on the same records commit as if serialized: the
//! loser of a conflict is rejected by the host and nothing of it lands.

#[cfg(test)]
mod tests {
    use super::super::fixtures::Harness;
    use regnet_contracts::{ErrorKind, Property, PROPERTY_NAMESPACE};
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_buyers_only_one_wins() {
        let h = Arc::new(Harness::new());
        h.register_user("Alice", "A123", &[]).await;
        h.register_user("Bob", "B456", &["upg1000"]).await;
        h.register_user("Carol", "C789", &["upg1000"]).await;
        h.register_property("Alice", "A123", "P1", 500).await;
        h.list("Alice", "A123", "P1").await;

        let bob = {
            let h = Arc::clone(&h);
            tokio::spawn(async move { h.user("purchaseProperty", &["P1", "Bob", "B456"]).await })
        };
        let carol = {
            let h = Arc::clone(&h);
            tokio::spawn(async move { h.user("purchaseProperty", &["P1", "Carol", "C789"]).await })
        };
        let results = [bob.await.unwrap(), carol.await.unwrap()];

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(matches!(
                err.kind(),
                ErrorKind::Ledger | ErrorKind::NotFound | ErrorKind::InvalidState
            ));
        }

        assert_eq!(h.balance("Alice", "A123"), 500);
        assert_eq!(h.balance("Bob", "B456") + h.balance("Carol", "C789"), 1500);
        let keys = h.keys(PROPERTY_NAMESPACE);
        assert_eq!(keys.len(), 1);
        assert!(
            keys[0] == Property::key_for("P1", "Bob", "B456")
                || keys[0] == Property::key_for("P1", "Carol", "C789")
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_registrations_of_distinct_users() {
        let h = Arc::new(Harness::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let h = Arc::clone(&h);
            handles.push(tokio::spawn(async move {
                let name = format!("user{i}");
                let aadhar = format!("AAD{i:04}");
                h.user("requestNewUser", &[name.as_str(), "u@x", "1", aadhar.as_str()]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(h.keys(regnet_contracts::REQUEST_NAMESPACE).len(), 16);
        assert_eq!(h.service.stats().await.committed, 16);
    }
}
