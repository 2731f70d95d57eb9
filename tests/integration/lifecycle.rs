//! Record lifecycle across transactions

use crate::common::TestContract;
use howdog::{Error, Output, Record, RecordStatus, RegistrationPolicy};
use proptest::prelude::*;

#[test]
fn register_query_verify_scenario() {
    let contract = TestContract::new();

    assert_eq!(contract.register("R1", "guardA", "flu", 100).unwrap(), Output::Unit);
    assert_eq!(
        contract.query("R1").unwrap(),
        Record {
            guardian: "guardA".into(),
            rid: "R1".into(),
            diagnosis_info: "flu".into(),
            price: 100,
            status: Some(RecordStatus::Registered),
        }
    );

    contract.verify("R1", "vX").unwrap();
    let verified = contract.query("R1").unwrap();
    assert_eq!(verified.status, Some(RecordStatus::Verified));
    assert_eq!(verified.guardian, "guardA");

    let err = contract.verify("R1", "vY").unwrap_err();
    assert!(matches!(err, Error::InvalidStateTransition { .. }));
    assert_eq!(contract.query("R1").unwrap(), verified);
}

#[test]
fn query_unknown_receipt_is_not_found() {
    let contract = TestContract::new();
    assert_eq!(
        contract.query("nope").unwrap_err(),
        Error::RecordNotFound { rid: "nope".into() }
    );
}

#[test]
fn verify_unknown_receipt_is_not_found_and_writes_nothing() {
    let contract = TestContract::new();
    assert!(matches!(
        contract.verify("nope", "vX"),
        Err(Error::RecordNotFound { .. })
    ));
    assert_eq!(contract.ledger.key_count(), 0);
    assert_eq!(contract.ledger.committed_transactions(), 0);
}

#[test]
fn deleted_receipt_cannot_be_verified() {
    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    contract.delete("R1");

    assert!(matches!(contract.query("R1"), Err(Error::RecordNotFound { .. })));
    assert!(matches!(contract.verify("R1", "v"), Err(Error::RecordNotFound { .. })));
}

#[test]
fn reregistration_resets_status_under_overwrite() {
    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    contract.verify("R1", "v").unwrap();
    contract.register("R1", "g2", "d2", 2).unwrap();

    let record = contract.query("R1").unwrap();
    assert_eq!(record.status, Some(RecordStatus::Registered));
    assert_eq!(record.price, 2);
    contract.verify("R1", "v").unwrap();
}

#[test]
fn reregistration_fails_under_reject() {
    let contract = TestContract::with_policy(RegistrationPolicy::Reject);
    contract.register("R1", "g", "d", 1).unwrap();
    assert_eq!(
        contract.register("R1", "g2", "d2", 2).unwrap_err(),
        Error::RecordExists { rid: "R1".into() }
    );
    assert_eq!(contract.query("R1").unwrap().price, 1);
}

#[test]
fn receipts_are_independent() {
    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    contract.register("R2", "g", "d", 2).unwrap();
    contract.verify("R1", "v").unwrap();

    assert_eq!(contract.query("R1").unwrap().status, Some(RecordStatus::Verified));
    assert_eq!(contract.query("R2").unwrap().status, Some(RecordStatus::Registered));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn register_then_query_returns_inputs(
        rid in "[A-Za-z0-9_-]{1,16}",
        guardian in ".{0,24}",
        diagnosis_info in ".{0,64}",
        price in any::<u64>(),
    ) {
        let contract = TestContract::new();
        contract.register(&rid, &guardian, &diagnosis_info, price).unwrap();

        let record = contract.query(&rid).unwrap();
        prop_assert_eq!(record, Record::registered(rid.as_str(), guardian.as_str(), diagnosis_info.as_str(), price));
    }

    #[test]
    fn only_the_first_verify_succeeds(attempts in 1usize..5) {
        let contract = TestContract::new();
        contract.register("R1", "g", "d", 1).unwrap();

        let outcomes: Vec<bool> = (0..attempts).map(|_| contract.verify("R1", "v").is_ok()).collect();
        prop_assert!(outcomes[0]);
        prop_assert!(outcomes[1..].iter().all(|ok| !ok));
        prop_assert_eq!(contract.ledger.history("R1").len(), 2);
    }
}
