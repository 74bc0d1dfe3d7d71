use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// GET /api/web3/status — probe the configured JSON-RPC provider
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let probe = async {
        let block_number = state.rpc.block_number().await?;
        let chain_id = state.rpc.chain_id().await?;
        Ok::<_, crate::web3::RpcError>((block_number, chain_id))
    };

    match probe.await {
        Ok((block_number, chain_id)) => Json(json!({
            "connected": true,
            "blockNumber": block_number,
            "chainId": chain_id,
            "provider": state.rpc.url(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, provider = state.rpc.url(), "Web3 provider unreachable");
            Json(json!({
                "connected": false,
                "error": e.to_string(),
            }))
        }
    }
}
