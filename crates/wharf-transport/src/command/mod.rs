//! The [`Command`] trait: Rust's stand-in for the CDP driver's "command
//! coroutine" model.
//!
//! CDP's canonical description of issuing a command is generator-shaped: the
//! caller's code yields a single request, is resumed once with the decoded
//! result, and returns. Rust has no general resumable generators, so the
//! contract is modeled as a value with two operations instead: [`request`]
//! produces the wire request body, and [`decode`] turns the raw JSON result
//! into the command's typed return value. A [`CdpConnection`](crate::CdpConnection)
//! drives a command by calling `request()`, sending it with a freshly
//! allocated id, awaiting the raw result, and calling `decode()`.
//!
//! Generated bindings in `wharf-protocol` implement this trait once per CDP
//! command. The same value is reusable against a real session or a mock.
//!
//! [`request`]: Command::request
//! [`decode`]: Command::decode

use serde_json::Value;

use crate::error::CdpError;

/// The request body a [`Command`] yields: a method name plus optional params.
#[derive(Debug, Clone)]
pub struct CdpRequestBody {
    /// The wire method name, e.g. `"Page.navigate"`.
    pub method: &'static str,
    /// The JSON-encoded parameters, or `None` for a parameterless command.
    pub params: Option<Value>,
}

/// A single CDP command: a typed request paired with how to decode its result.
///
/// Implementations must describe exactly one request and exactly one decode
/// step; a connection driving a command that violates this invariant returns
/// [`CdpError::ContractViolation`].
pub trait Command {
    /// The decoded return type of this command.
    type Return;

    /// Produce the wire request body for this command.
    fn request(&self) -> CdpRequestBody;

    /// Decode a raw JSON result into this command's return type.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not match the command's return
    /// schema.
    fn decode(&self, value: Value) -> Result<Self::Return, CdpError>;
}

#[cfg(test)]
mod tests;
