//! # Entity Lifecycle Scenarios
//!
//! ```text
//! requestNewUser ─→ approveNewUser ─→ rechargeAccount
//!        │
//!        └─→ propertyRegistrationRequest ─→ approvePropertyRegistration
//!                                                   │
//!                      updateProperty(onSale) ←─────┘
//!                               │
//!                               └─→ purchaseProperty ─→ new owner, registered
//! ```

#[cfg(test)]
mod tests {
    use super::super::fixtures::Harness;
    use regnet_contracts::{
        ErrorKind, Property, Request, PROPERTY_NAMESPACE, REQUEST_NAMESPACE, USER_NAMESPACE,
    };

    #[tokio::test]
    async fn test_alice_sells_to_bob() {
        let h = Harness::new();

        let request = h
            .user("requestNewUser", &["Alice", "alice@example.com", "555-0100", "A123"])
            .await
            .unwrap();
        assert_eq!(request["name"], "Alice");

        let alice = h.registrar("approveNewUser", &["Alice", "A123"]).await.unwrap();
        assert_eq!(alice["upgradCoins"], 0);
        assert!(h.keys(REQUEST_NAMESPACE).is_empty());

        let alice = h
            .user("rechargeAccount", &["Alice", "A123", "upg1000"])
            .await
            .unwrap();
        assert_eq!(alice["upgradCoins"], 1000);

        let request = h
            .user("propertyRegistrationRequest", &["Alice", "A123", "P1", "500"])
            .await
            .unwrap();
        assert_eq!(request["owner"], r#""P1":"Alice":"A123""#);
        assert!(request["status"].is_null());

        let property = h.registrar("approvePropertyRegistration", &["P1"]).await.unwrap();
        assert_eq!(property["status"], "registered");
        assert_eq!(property["price"], 500);
        assert!(h.keys(REQUEST_NAMESPACE).is_empty());

        let listed = h
            .user("updateProperty", &["Alice", "A123", "P1", "onSale"])
            .await
            .unwrap();
        assert_eq!(listed["status"], "onSale");

        h.register_user("Bob", "B456", &["upg500", "upg100"]).await;
        assert_eq!(h.balance("Bob", "B456"), 600);

        let bought = h
            .user("purchaseProperty", &["P1", "Bob", "B456"])
            .await
            .unwrap();
        assert_eq!(bought["name"], "Bob");
        assert_eq!(bought["status"], "registered");
        assert_eq!(bought["owner"], r#""P1":"Bob":"B456""#);

        assert_eq!(h.balance("Bob", "B456"), 100);
        assert_eq!(h.balance("Alice", "A123"), 1500);
        assert_eq!(
            h.keys(PROPERTY_NAMESPACE),
            vec![Property::key_for("P1", "Bob", "B456")]
        );

        let viewed = h
            .registrar("viewProperty", &["Bob", "B456", "P1"])
            .await
            .unwrap();
        assert_eq!(viewed, bought);
        let err = h
            .registrar("viewProperty", &["Alice", "A123", "P1"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_new_owner_can_relist_and_resell() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &[]).await;
        h.register_user("Bob", "B456", &["upg500"]).await;
        h.register_user("Carol", "C789", &["upg1000"]).await;
        h.register_property("Alice", "A123", "P1", 500).await;
        h.list("Alice", "A123", "P1").await;

        h.user("purchaseProperty", &["P1", "Bob", "B456"]).await.unwrap();

        // Alice no longer owns the key she used to list it.
        let err = h
            .user("updateProperty", &["Alice", "A123", "P1", "onSale"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        h.list("Bob", "B456", "P1").await;
        h.user("purchaseProperty", &["P1", "Carol", "C789"]).await.unwrap();

        assert_eq!(h.balance("Alice", "A123"), 500);
        assert_eq!(h.balance("Bob", "B456"), 500);
        assert_eq!(h.balance("Carol", "C789"), 500);
        assert_eq!(
            h.keys(PROPERTY_NAMESPACE),
            vec![Property::key_for("P1", "Carol", "C789")]
        );
    }

    #[tokio::test]
    async fn test_double_approval_fails_and_request_consumed_once() {
        let h = Harness::new();
        h.user("requestNewUser", &["Alice", "a@x", "1", "A123"]).await.unwrap();
        h.registrar("approveNewUser", &["Alice", "A123"]).await.unwrap();

        let err = h
            .registrar("approveNewUser", &["Alice", "A123"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(h.keys(USER_NAMESPACE).len(), 1);
        assert!(h.keys(REQUEST_NAMESPACE).is_empty());
    }

    #[tokio::test]
    async fn test_approve_without_request_creates_nothing() {
        let h = Harness::new();
        let err = h
            .registrar("approveNewUser", &["Ghost", "G000"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(h.keys(USER_NAMESPACE).is_empty());
        assert_eq!(h.ledger().height(), 0);
    }

    #[tokio::test]
    async fn test_user_and_property_requests_share_namespace() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &[]).await;
        // A pending user request whose name looks like a property id.
        h.user("requestNewUser", &["P1", "p@x", "1", "Z999"]).await.unwrap();

        let err = h
            .registrar("approvePropertyRegistration", &["P1"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        h.register_property("Alice", "A123", "P1", 300).await;
        assert_eq!(
            h.keys(REQUEST_NAMESPACE),
            vec![Request::user_key_for("P1", "Z999")]
        );
    }

    #[tokio::test]
    async fn test_vouchers_accumulate() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &["upg100", "upg500", "upg1000", "upg100"])
            .await;
        assert_eq!(h.balance("Alice", "A123"), 1700);
    }

    #[tokio::test]
    async fn test_created_at_is_transaction_time() {
        let h = Harness::new();
        let request = h
            .user("requestNewUser", &["Alice", "a@x", "1", "A123"])
            .await
            .unwrap();
        let user = h.registrar("approveNewUser", &["Alice", "A123"]).await.unwrap();

        let requested: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(request["createdAt"].clone()).unwrap();
        let approved: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(user["createdAt"].clone()).unwrap();
        assert!(approved > requested);
    }
}
