//! Host boundary
//!
//! A host runtime owns the ledger and the transport. It receives a
//! [`Chaincode`] from [`bootstrap`], and for every request it opens a
//! transaction, calls [`Chaincode::invoke`], and commits only when the
//! returned [`Response`] is a success.

use std::fmt;
use std::sync::Arc;

use howdog_core::LedgerStub;
use howdog_records::RecordService;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{ContractConfig, Error, Executor, Invocation, Output, Result};

/// Reply to one invocation
///
/// Serializes as `{"result":"success","message":…}` or
/// `{"result":"fail","error":…}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Response {
    /// Invocation succeeded
    Success {
        /// Acknowledgement for writes, the record or history for reads
        message: serde_json::Value,
    },
    /// Invocation failed; nothing should be committed
    Fail {
        /// Human-readable error
        error: String,
    },
}

impl Response {
    /// Build a success response from a command output
    pub fn from_output(output: &Output) -> Result<Self> {
        let message = output.to_message().map_err(|e| Error::Serialization {
            reason: e.to_string(),
        })?;
        Ok(Response::Success { message })
    }

    /// Build a failure response
    pub fn fail(error: &Error) -> Self {
        Response::Fail {
            error: error.to_string(),
        }
    }

    /// Whether the host should commit the transaction
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }
}

/// The receipt contract packaged for a host runtime
pub struct Chaincode {
    name: String,
    executor: Executor,
}

impl Chaincode {
    /// Package an executor under a contract name
    pub fn new(name: impl Into<String>, executor: Executor) -> Self {
        Chaincode {
            name: name.into(),
            executor,
        }
    }

    /// Contract name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying executor
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Run one invocation inside the transaction `stub` belongs to
    ///
    /// Never fails: errors become a [`Response::Fail`].
    pub fn invoke(&self, stub: &dyn LedgerStub, invocation: Invocation) -> Response {
        let function = invocation.function.clone();
        let result = invocation
            .into_command()
            .and_then(|cmd| self.executor.execute(stub, cmd))
            .and_then(|output| Response::from_output(&output));

        match result {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    target: "howdog::runtime",
                    contract = %self.name,
                    function = %function,
                    tx_id = %stub.tx_id(),
                    error = %e,
                    "Invocation failed"
                );
                Response::fail(&e)
            }
        }
    }
}

impl fmt::Debug for Chaincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chaincode")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A host that serves a chaincode until its transport is exhausted
pub trait HostRuntime {
    /// Serve invocations with `chaincode`
    fn serve(&mut self, chaincode: Arc<Chaincode>) -> Result<()>;
}

/// Build the chaincode described by `config` and hand it to `runtime`
///
/// # Errors
///
/// - `Config` if the configuration is invalid (nothing is served)
/// - Whatever the runtime returns from [`HostRuntime::serve`]
pub fn bootstrap<R>(config: &ContractConfig, runtime: &mut R) -> Result<()>
where
    R: HostRuntime + ?Sized,
{
    config.validate()?;
    let policy = config.registration_policy()?;

    let executor = Executor::new(Arc::new(RecordService::with_policy(policy)));
    let chaincode = Arc::new(Chaincode::new(config.contract.clone(), executor));

    info!(
        target: "howdog::runtime",
        contract = %chaincode.name(),
        registration = %policy,
        "Starting chaincode"
    );
    runtime.serve(chaincode)
}
