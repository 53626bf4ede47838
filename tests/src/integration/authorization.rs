//! # Authorization Matrix
//!
//! Every function is callable by exactly one organization. Rejections
//! happen before any ledger access and leave no writes behind.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{Harness, APPLICANT_MSP, REGISTRAR_MSP};
    use regnet_contracts::{ContractName, ErrorKind, RegistryError};

    fn sample_args(function: &str) -> Vec<&'static str> {
        match function {
            "requestNewUser" => vec!["Alice", "a@x", "1", "A123"],
            "rechargeAccount" => vec!["Alice", "A123", "upg100"],
            "viewUser" | "approveNewUser" => vec!["Alice", "A123"],
            "propertyRegistrationRequest" => vec!["Alice", "A123", "P1", "500"],
            "viewProperty" => vec!["Alice", "A123", "P1"],
            "updateProperty" => vec!["Alice", "A123", "P1", "onSale"],
            "purchaseProperty" => vec!["P1", "Bob", "B456"],
            "approvePropertyRegistration" => vec!["P1"],
            _ => vec![],
        }
    }

    #[tokio::test]
    async fn test_each_contract_rejects_the_other_organization() {
        let h = Harness::new();
        let cases = [
            (ContractName::User, REGISTRAR_MSP),
            (ContractName::Registrar, APPLICANT_MSP),
            (ContractName::User, "Org3MSP"),
            (ContractName::Registrar, "Org3MSP"),
        ];

        for (contract, msp_id) in cases {
            for function in contract.functions() {
                if *function == "instantiate" {
                    continue;
                }
                let err = h
                    .call(msp_id, contract, function, &sample_args(function))
                    .await
                    .unwrap_err();
                assert!(
                    matches!(err, RegistryError::Unauthorized { operation, .. } if operation == *function),
                    "{contract}:{function} by {msp_id} gave {err:?}"
                );
            }
        }

        assert_eq!(h.ledger().height(), 0);
        assert!(h.ledger().is_empty());
        assert_eq!(h.service.stats().await.unauthorized, 22);
    }

    #[tokio::test]
    async fn test_registrar_and_applicant_can_both_view_users() {
        let h = Harness::new();
        h.register_user("Alice", "A123", &["upg100"]).await;

        let as_user = h.user("viewUser", &["Alice", "A123"]).await.unwrap();
        let as_registrar = h.registrar("viewUser", &["Alice", "A123"]).await.unwrap();
        assert_eq!(as_user, as_registrar);
        assert_eq!(as_user["upgradCoins"], 100);
    }

    #[tokio::test]
    async fn test_instantiate_is_open() {
        let h = Harness::new();
        assert!(h.user("instantiate", &[]).await.unwrap().is_null());
        assert!(h.registrar("instantiate", &[]).await.unwrap().is_null());
    }

    #[tokio::test]
    async fn test_unknown_function_is_reported() {
        let h = Harness::new();
        let err = h.user("approveNewUser", &["Alice", "A123"]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFunction);
    }
}
