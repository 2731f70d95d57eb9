//! Receipt command handlers.
//!
//! Each handler calls one [`ReceiptContract`] operation and wraps its result
//! in the [`Output`] variant documented on the command.

use howdog_core::{LedgerStub, ReceiptContract};

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle RegisterReceipt command.
pub fn register_receipt(
    contract: &dyn ReceiptContract,
    stub: &dyn LedgerStub,
    rid: String,
    guardian: String,
    diagnosis_info: String,
    price: u64,
) -> Result<Output> {
    convert_result(contract.register_receipt(stub, &rid, &guardian, &diagnosis_info, price))?;
    Ok(Output::Unit)
}

/// Handle QueryRecord command.
pub fn query_record(
    contract: &dyn ReceiptContract,
    stub: &dyn LedgerStub,
    rid: String,
) -> Result<Output> {
    let record = convert_result(contract.query_record(stub, &rid))?;
    Ok(Output::Record(record))
}

/// Handle VerifyReceipt command.
pub fn verify_receipt(
    contract: &dyn ReceiptContract,
    stub: &dyn LedgerStub,
    rid: String,
    verifier: String,
) -> Result<Output> {
    convert_result(contract.verify_receipt(stub, &rid, &verifier))?;
    Ok(Output::Unit)
}

/// Handle GetHistory command.
pub fn get_history(
    contract: &dyn ReceiptContract,
    stub: &dyn LedgerStub,
    rid: String,
) -> Result<Output> {
    let entries = convert_result(contract.get_history(stub, &rid))?;
    Ok(Output::History(entries))
}
