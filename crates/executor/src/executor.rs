//! The Executor - single entry point to the receipt contract.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! contract operations and converts results to outputs.

use std::fmt;
use std::sync::Arc;

use howdog_core::{LedgerStub, ReceiptContract};
use tracing::debug;

use crate::handlers::record;
use crate::{Command, Output, Result};

/// The command executor.
///
/// The Executor is **stateless**: it holds the contract implementation but no
/// record state. All state lives in the ledger behind the stub passed to
/// each call.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use howdog_executor::{Command, Executor, Output};
/// use howdog_records::RecordService;
/// use howdog_storage::MemoryLedger;
///
/// let ledger = MemoryLedger::new();
/// let executor = Executor::new(Arc::new(RecordService::new()));
///
/// let tx = ledger.begin();
/// executor
///     .execute(&tx, Command::RegisterReceipt {
///         rid: "R1".into(),
///         guardian: "guardA".into(),
///         diagnosis_info: "flu".into(),
///         price: 100,
///     })
///     .unwrap();
/// tx.commit().unwrap();
///
/// let tx = ledger.begin();
/// let output = executor.execute(&tx, Command::QueryRecord { rid: "R1".into() }).unwrap();
/// assert!(matches!(output, Output::Record(r) if r.price == 100));
/// ```
#[derive(Clone)]
pub struct Executor {
    contract: Arc<dyn ReceiptContract + Send + Sync>,
}

impl Executor {
    /// Create a new executor over a contract implementation.
    pub fn new(contract: Arc<dyn ReceiptContract + Send + Sync>) -> Self {
        Self { contract }
    }

    /// Execute a single command inside the transaction `stub` belongs to.
    pub fn execute(&self, stub: &dyn LedgerStub, cmd: Command) -> Result<Output> {
        debug!(
            target: "howdog::executor",
            function = cmd.function_name(),
            rid = %cmd.rid(),
            tx_id = %stub.tx_id(),
            "Executing command"
        );

        let contract = self.contract.as_ref();
        match cmd {
            Command::RegisterReceipt {
                rid,
                guardian,
                diagnosis_info,
                price,
            } => record::register_receipt(contract, stub, rid, guardian, diagnosis_info, price),
            Command::QueryRecord { rid } => record::query_record(contract, stub, rid),
            Command::VerifyReceipt { rid, verifier } => {
                record::verify_receipt(contract, stub, rid, verifier)
            }
            Command::GetHistory { rid } => record::get_history(contract, stub, rid),
        }
    }

    /// Execute several commands in order against the same transaction.
    ///
    /// Each command runs independently; a failure does not stop the rest.
    /// Whether a later command observes an earlier command's writes is up to
    /// the stub; snapshot ledgers expose them only on commit.
    pub fn execute_many(&self, stub: &dyn LedgerStub, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(stub, cmd)).collect()
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}
