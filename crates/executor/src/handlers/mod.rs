//! Command handlers.
//!
//! | Module | Commands | Service |
//! |--------|----------|---------|
//! | `record` | 4 | ReceiptContract |

pub mod record;
