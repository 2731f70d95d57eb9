//! Pipe runtime: JSON lines in, JSON lines out.
//!
//! Every non-empty input line is one invocation. Lines starting with `#` are
//! comments. Each invocation runs in its own transaction on an in-memory
//! ledger; the transaction commits only when the response is a success.

use std::io::{BufRead, Write};
use std::sync::Arc;

use howdog_executor::{Chaincode, Error, HostRuntime, Invocation, Response, Result};
use howdog_storage::MemoryLedger;
use tracing::{debug, info};

/// [`HostRuntime`] over a line reader and writer
pub struct PipeRuntime<R, W> {
    ledger: MemoryLedger,
    input: R,
    output: W,
    served: usize,
    failures: usize,
}

impl<R: BufRead, W: Write> PipeRuntime<R, W> {
    /// Create a runtime with an empty ledger
    pub fn new(input: R, output: W) -> Self {
        PipeRuntime {
            ledger: MemoryLedger::new(),
            input,
            output,
            served: 0,
            failures: 0,
        }
    }

    /// Number of invocations answered with a failure
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Ledger backing the runtime
    #[allow(dead_code)]
    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    fn handle_line(&self, chaincode: &Chaincode, line: &str) -> Response {
        let invocation: Invocation = match serde_json::from_str(line) {
            Ok(invocation) => invocation,
            Err(e) => {
                return Response::fail(&Error::InvalidArgument {
                    reason: format!("malformed invocation: {}", e),
                })
            }
        };

        let tx = self.ledger.begin();
        let response = chaincode.invoke(&tx, invocation);
        if !response.is_success() {
            tx.rollback();
            return response;
        }

        match tx.commit() {
            Ok(receipt) => {
                debug!(
                    target: "howdog::runtime",
                    tx_id = %receipt.tx_id,
                    operations = receipt.total_operations(),
                    "Transaction committed"
                );
                response
            }
            Err(e) => Response::fail(&Error::Internal {
                reason: format!("commit failed: {}", e),
            }),
        }
    }
}

fn io_error(e: std::io::Error) -> Error {
    Error::Io {
        reason: e.to_string(),
    }
}

impl<R: BufRead, W: Write> HostRuntime for PipeRuntime<R, W> {
    fn serve(&mut self, chaincode: Arc<Chaincode>) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line).map_err(io_error)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let response = self.handle_line(&chaincode, trimmed);
            self.served += 1;
            if !response.is_success() {
                self.failures += 1;
            }

            let json = serde_json::to_string(&response).map_err(|e| Error::Serialization {
                reason: e.to_string(),
            })?;
            writeln!(self.output, "{}", json).map_err(io_error)?;
            self.output.flush().map_err(io_error)?;
        }

        info!(
            target: "howdog::runtime",
            contract = %chaincode.name(),
            served = self.served,
            failures = self.failures,
            "Input exhausted"
        );
        Ok(())
    }
}
