//! History reconstruction end to end

use crate::common::TestContract;
use chrono::{TimeZone, Utc};
use howdog::{replay, Command, Error, Record, RecordStatus};

#[test]
fn history_lists_every_revision_with_commit_metadata() {
    let contract = TestContract::new();
    contract
        .execute_at(
            "tx-1",
            1_600_000_000,
            Command::RegisterReceipt {
                rid: "R1".into(),
                guardian: "guardA".into(),
                diagnosis_info: "flu".into(),
                price: 100,
            },
        )
        .unwrap();
    contract
        .execute_at(
            "tx-2",
            1_600_000_100,
            Command::VerifyReceipt {
                rid: "R1".into(),
                verifier: "vX".into(),
            },
        )
        .unwrap();

    let history = contract.history("R1").unwrap();
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].tx_id, "tx-1");
    assert_eq!(history[0].timestamp, Utc.timestamp_opt(1_600_000_000, 0).unwrap());
    assert_eq!(history[0].record.status, Some(RecordStatus::Registered));

    assert_eq!(history[1].tx_id, "tx-2");
    assert_eq!(history[1].timestamp, Utc.timestamp_opt(1_600_000_100, 0).unwrap());
    assert_eq!(history[1].record.status, Some(RecordStatus::Verified));
    assert!(history.iter().all(|e| !e.is_delete));
}

#[test]
fn failed_operations_leave_no_revision() {
    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    contract.verify("R1", "v").unwrap();
    assert!(contract.verify("R1", "v").is_err());
    assert!(contract.verify("R1", "v").is_err());

    assert_eq!(contract.history("R1").unwrap().len(), 2);
}

#[test]
fn history_of_unwritten_key_is_empty() {
    let contract = TestContract::new();
    assert!(contract.history("ghost").unwrap().is_empty());
}

#[test]
fn delete_shows_as_placeholder_revision() {
    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    contract.delete("R1");
    contract.register("R1", "g2", "d2", 2).unwrap();

    let history = contract.history("R1").unwrap();
    let deletes: Vec<bool> = history.iter().map(|e| e.is_delete).collect();
    assert_eq!(deletes, vec![false, true, false]);
    assert_eq!(history[1].record, Record::placeholder("R1"));
    assert_eq!(replay(&history), Some(contract.query("R1").unwrap()));
}

#[test]
fn replay_matches_query_after_every_step() {
    let contract = TestContract::new();
    let steps: Vec<Box<dyn Fn(&TestContract)>> = vec![
        Box::new(|c| {
            c.register("R1", "g", "d", 1).unwrap();
        }),
        Box::new(|c| {
            c.verify("R1", "v").unwrap();
        }),
        Box::new(|c| {
            c.register("R1", "g", "d", 3).unwrap();
        }),
        Box::new(|c| {
            c.verify("R1", "v").unwrap();
        }),
    ];

    for step in steps {
        step(&contract);
        let history = contract.history("R1").unwrap();
        assert_eq!(replay(&history), Some(contract.query("R1").unwrap()));
    }
}

#[test]
fn history_read_releases_cursors() {
    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    for _ in 0..10 {
        contract.history("R1").unwrap();
        contract.history("R2").unwrap();
    }
    assert_eq!(contract.ledger.open_cursors(), 0);
}

#[test]
fn corrupt_revision_fails_whole_history() {
    use howdog::LedgerStub;

    let contract = TestContract::new();
    contract.register("R1", "g", "d", 1).unwrap();
    let tx = contract.ledger.begin();
    tx.put_state("R1", br#"{"receiptid":"R1","status":"archived"}"#.to_vec())
        .unwrap();
    tx.commit().unwrap();

    assert!(matches!(contract.history("R1"), Err(Error::Decode { .. })));
    assert!(matches!(contract.query("R1"), Err(Error::Decode { .. })));
    assert_eq!(contract.ledger.open_cursors(), 0);
}
