//! Wire-level invocations and responses

use crate::common::TestContract;
use howdog::Response;
use serde_json::json;

#[test]
fn full_session_over_wire_names() {
    let contract = TestContract::new();

    assert_eq!(
        contract.invoke("Register_receipt", &["R1", "guardA", "flu", "100"]),
        Response::Success {
            message: json!("Transaction has been submitted.")
        }
    );
    assert!(contract.invoke("Verify_receipt", &["R1", "vX"]).is_success());

    match contract.invoke("Query_record", &["R1"]) {
        Response::Success { message } => assert_eq!(
            message,
            json!({
                "guardian": "guardA",
                "receiptid": "R1",
                "diagnosisinfo": "flu",
                "price": 100,
                "status": "verified"
            })
        ),
        other => panic!("expected success, got {:?}", other),
    }

    match contract.invoke("GetHistory", &["R1"]) {
        Response::Success { message } => {
            let statuses: Vec<_> = message
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["record"]["status"].clone())
                .collect();
            assert_eq!(statuses, vec![json!("registered"), json!("verified")]);
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn failures_are_reported_not_committed() {
    let contract = TestContract::new();

    let cases: [(&str, &[&str]); 5] = [
        ("Register_receipt", &["R1", "g", "d", "abc"]),
        ("Register_receipt", &["R1", "g", "d"]),
        ("Query_record", &["R1"]),
        ("Verify_receipt", &["R1", "v"]),
        ("QueryAll", &[]),
    ];
    for (function, args) in cases {
        let response = contract.invoke(function, args);
        assert!(!response.is_success(), "{} {:?} should fail", function, args);
    }
    assert_eq!(contract.ledger.committed_transactions(), 0);
}

#[test]
fn not_found_message_names_the_receipt() {
    let contract = TestContract::new();
    assert_eq!(
        contract.invoke("Query_record", &["R42"]),
        Response::Fail {
            error: "R42 does not exist".into()
        }
    );
}
