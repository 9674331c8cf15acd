//! JSON-RPC gateway to the remote automaton execution backend.
//!
//! Acceptance checking (`check`) and minimization (`minimize`) are opaque
//! remote operations. This crate owns the wire shapes, batches one `check`
//! request per test case into a single HTTP POST, correlates responses back
//! to their test cases by id, and reshapes everything into the typed results
//! the rest of the workspace works with.
//!
//! Failure semantics differ per operation: a `check` error reported for a
//! single test case is absorbed into that test case's result, while a
//! transport-level failure of the whole batch is an error. A `minimize`
//! response carrying an error means "no proposal available" (`Ok(None)`);
//! only transport failures are errors.

mod error;
mod gateway;
mod protocol;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{ExecutionGateway, GatewayConfig};
pub use protocol::{CheckRequest, CheckResponse, MinimizeRequest, MinimizeResponse};
