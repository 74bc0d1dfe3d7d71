pub mod address;
pub mod rpc;
pub mod signature;

pub use address::is_valid_address;
pub use rpc::{JsonRpcClient, RpcError};
pub use signature::{generate_nonce, verify_signature};
