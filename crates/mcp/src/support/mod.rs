#![forbid(unsafe_code)]

mod jsonrpc;
mod logging;
mod runtime;

pub(crate) use jsonrpc::*;
pub(crate) use logging::*;
pub(crate) use runtime::*;
