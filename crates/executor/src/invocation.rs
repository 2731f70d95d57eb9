//! Wire invocations.
//!
//! Invokers name a contract function and pass every argument as a string:
//!
//! ```json
//! {"function": "Register_receipt", "args": ["R1", "guardA", "flu", "100"]}
//! ```
//!
//! [`Invocation::into_command`] checks the argument count and parses typed
//! arguments before anything touches the ledger.

use serde::{Deserialize, Serialize};

use crate::{Command, Error, Result};

/// Function names exported by the contract, in declaration order
pub const FUNCTIONS: [&str; 4] = ["Register_receipt", "Query_record", "Verify_receipt", "GetHistory"];

/// A function call as it arrives from an invoker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Exported function name
    pub function: String,
    /// Positional string arguments
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation from a function name and arguments
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse into a typed command
    ///
    /// # Errors
    ///
    /// - `UnknownFunction` if the function is not exported
    /// - `InvalidArgument` on a wrong argument count or an unparsable price
    pub fn into_command(self) -> Result<Command> {
        let Invocation { function, args } = self;
        match function.as_str() {
            "Register_receipt" => {
                let [rid, guardian, diagnosis_info, price] = take_args(&function, args)?;
                let price = parse_price(&price)?;
                Ok(Command::RegisterReceipt {
                    rid,
                    guardian,
                    diagnosis_info,
                    price,
                })
            }
            "Query_record" => {
                let [rid] = take_args(&function, args)?;
                Ok(Command::QueryRecord { rid })
            }
            "Verify_receipt" => {
                let [rid, verifier] = take_args(&function, args)?;
                Ok(Command::VerifyReceipt { rid, verifier })
            }
            "GetHistory" => {
                let [rid] = take_args(&function, args)?;
                Ok(Command::GetHistory { rid })
            }
            _ => Err(Error::UnknownFunction { function }),
        }
    }
}

impl From<Command> for Invocation {
    fn from(cmd: Command) -> Self {
        let function = cmd.function_name();
        let args = match cmd {
            Command::RegisterReceipt {
                rid,
                guardian,
                diagnosis_info,
                price,
            } => vec![rid, guardian, diagnosis_info, price.to_string()],
            Command::QueryRecord { rid } | Command::GetHistory { rid } => vec![rid],
            Command::VerifyReceipt { rid, verifier } => vec![rid, verifier],
        };
        Invocation::new(function, args)
    }
}

fn take_args<const N: usize>(function: &str, args: Vec<String>) -> Result<[String; N]> {
    let got = args.len();
    args.try_into().map_err(|_| Error::InvalidArgument {
        reason: format!(
            "{} expects {} argument{}, got {}",
            function,
            N,
            if N == 1 { "" } else { "s" },
            got
        ),
    })
}

/// Parse a price argument: a base-10 integer, zero or greater
fn parse_price(raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| {
        let reason = match raw.parse::<i64>() {
            Ok(n) if n < 0 => format!("price must not be negative, got {}", n),
            _ => format!("price must be an integer, got '{}'", raw),
        };
        Error::InvalidArgument { reason }
    })
}
