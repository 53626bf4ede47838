//! # Atomicity Scenarios
//!
//! A failed invocation is rolled back in full: committed state, ledger
//! height and every record stay exactly as they were.

#[cfg(test)]
mod tests {
    use super::super::fixtures::Harness;
    use regnet_contracts::{ErrorKind, Property, User, PROPERTY_NAMESPACE, USER_NAMESPACE};
    use regnet_ledger::{ClientIdentity, LedgerHost, LedgerStub};

    async fn listed_p1(h: &Harness, bob_vouchers: &[&str]) {
        h.register_user("Alice", "A123", &[]).await;
        h.register_user("Bob", "B456", bob_vouchers).await;
        h.register_property("Alice", "A123", "P1", 500).await;
        h.list("Alice", "A123", "P1").await;
    }

    #[tokio::test]
    async fn test_insufficient_funds_changes_nothing() {
        let h = Harness::new();
        listed_p1(&h, &["upg100"]).await;
        let height = h.ledger().height();

        let err = h
            .user("purchaseProperty", &["P1", "Bob", "B456"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);

        assert_eq!(h.ledger().height(), height);
        assert_eq!(h.balance("Bob", "B456"), 100);
        assert_eq!(h.balance("Alice", "A123"), 0);
        let property = h
            .user("viewProperty", &["Alice", "A123", "P1"])
            .await
            .unwrap();
        assert_eq!(property["status"], "onSale");
    }

    #[tokio::test]
    async fn test_purchase_of_unlisted_property_changes_nothing() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &[]).await;
        h.register_user("Bob", "B456", &["upg1000"]).await;
        h.register_property("Alice", "A123", "P1", 500).await;

        let err = h
            .user("purchaseProperty", &["P1", "Bob", "B456"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(h.balance("Bob", "B456"), 1000);
        assert_eq!(
            h.keys(PROPERTY_NAMESPACE),
            vec![Property::key_for("P1", "Alice", "A123")]
        );
    }

    #[tokio::test]
    async fn test_invalid_voucher_leaves_balance() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &["upg500"]).await;

        for voucher in ["upg200", "UPG500", "", "upg1000x"] {
            let err = h
                .user("rechargeAccount", &["Alice", "A123", voucher])
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidVoucher);
        }
        assert_eq!(h.balance("Alice", "A123"), 500);
    }

    #[tokio::test]
    async fn test_non_owner_status_update_is_rejected() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &[]).await;
        h.register_property("Alice", "A123", "P1", 500).await;

        // Right name, wrong aadhar: no property exists under that key.
        let err = h
            .user("updateProperty", &["Alice", "A999", "P1", "onSale"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = h
            .user("updateProperty", &["Alice", "A123", "P1", "sold"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let property = h
            .user("viewProperty", &["Alice", "A123", "P1"])
            .await
            .unwrap();
        assert_eq!(property["status"], "registered");
    }

    #[tokio::test]
    async fn test_unregistered_seller_aborts_purchase() {
        let h = Harness::new();
        listed_p1(&h, &["upg1000"]).await;

        // Remove Alice's user record behind the contracts' back.
        let tx = h.ledger().begin(ClientIdentity::new("admin"));
        tx.delete_state(USER_NAMESPACE, &User::key_for("Alice", "A123"))
            .await
            .unwrap();
        h.ledger().commit(tx).unwrap();

        let err = h
            .user("purchaseProperty", &["P1", "Bob", "B456"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(h.balance("Bob", "B456"), 1000);
    }

    #[tokio::test]
    async fn test_bad_price_argument() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &[]).await;
        let err = h
            .user("propertyRegistrationRequest", &["Alice", "A123", "P1", "five hundred"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(h.keys(regnet_contracts::REQUEST_NAMESPACE).is_empty());
    }

    #[tokio::test]
    async fn test_rollbacks_are_counted() {
        let h = Harness::new();
        let _ = h.user("viewUser", &["Nobody", "0"]).await;
        let _ = h.registrar("approveNewUser", &["Nobody", "0"]).await;

        let stats = h.service.stats().await;
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.rolled_back, 2);
        assert_eq!(stats.committed, 0);
    }
}
