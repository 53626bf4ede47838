//! # Metrics Exposure
//!
//! Invocations through the service are visible in the Prometheus export.

#[cfg(test)]
mod tests {
    use super::super::fixtures::Harness;

    #[tokio::test]
    async fn test_operations_and_transfers_are_exported() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &[]).await;
        h.register_user("Bob", "B456", &["upg1000"]).await;
        h.register_property("Alice", "A123", "P1", 500).await;
        h.list("Alice", "A123", "P1").await;
        h.user("purchaseProperty", &["P1", "Bob", "B456"]).await.unwrap();
        let _ = h.user("rechargeAccount", &["Bob", "B456", "bogus"]).await;

        let text = regnet_telemetry::encode_metrics().unwrap();
        assert!(text.contains("regnet_contracts_operations_total"));
        assert!(text.contains(r#"function="purchaseProperty",outcome="committed""#));
        assert!(text.contains(r#"outcome="invalid_voucher""#));
        assert!(text.contains("regnet_contracts_property_transfers_total"));
        assert!(text.contains("regnet_ledger_transactions_rolled_back_total"));
    }
}
