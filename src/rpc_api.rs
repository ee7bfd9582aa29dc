use near_primitives::types::{AccountId, BlockId, BlockReference};
use serde_json::Value;

use crate::errors;
use crate::rpc_helpers::RpcClient;
use crate::types::views;

/// Account state as of the given block; `amount` is the balance in yocto.
pub async fn view_account(
    rpc_client: &RpcClient,
    block_reference: &BlockReference,
    account_id: &AccountId,
) -> crate::Result<views::AccountView> {
    let mut params = serde_json::Map::new();
    params.insert("request_type".to_owned(), "view_account".into());
    params.insert("account_id".to_owned(), account_id.to_string().into());
    let params = with_block_reference(params, block_reference);
    tracing::info!(
        target: crate::LOGGER_MSG,
        "RPC request: query view_account {} at {:?}",
        account_id,
        block_reference
    );
    let response = rpc_client.call_method("query", params).await;
    Ok(serde_json::from_value(result_or_error(response, "query")?)?)
}

/// State changes of type `account_update` touching the given accounts at the
/// given block.
pub async fn get_account_changes(
    rpc_client: &RpcClient,
    block_reference: &BlockReference,
    account_ids: &[AccountId],
) -> crate::Result<views::AccountChangesView> {
    let mut params = serde_json::Map::new();
    params.insert("changes_type".to_owned(), "account_changes".into());
    params.insert(
        "account_ids".to_owned(),
        account_ids
            .iter()
            .map(|account_id| Value::from(account_id.to_string()))
            .collect::<Vec<_>>()
            .into(),
    );
    let params = with_block_reference(params, block_reference);
    tracing::info!(
        target: crate::LOGGER_MSG,
        "RPC request: EXPERIMENTAL_changes for {} accounts at {:?}",
        account_ids.len(),
        block_reference
    );
    let response = rpc_client.call_method("EXPERIMENTAL_changes", params).await;
    Ok(serde_json::from_value(result_or_error(
        response,
        "EXPERIMENTAL_changes",
    )?)?)
}

/// Transaction status without receipt details (positional params form).
pub async fn get_transaction_status(
    rpc_client: &RpcClient,
    tx_hash: &str,
    account_id: &AccountId,
) -> crate::Result<views::TransactionStatusView> {
    let tx_hash = errors::validate_crypto_hash(tx_hash)?;
    tracing::info!(target: crate::LOGGER_MSG, "RPC request: tx {}", tx_hash);
    let response = rpc_client
        .call_method(
            "tx",
            serde_json::json!([tx_hash.to_string(), account_id.to_string()]),
        )
        .await;
    Ok(serde_json::from_value(result_or_error(response, "tx")?)?)
}

/// Transaction status including the execution outcome of every produced
/// receipt. `wait_until: NONE` because historical transactions are final
/// already; there is nothing to wait for.
pub async fn get_transaction_status_with_receipts(
    rpc_client: &RpcClient,
    tx_hash: &str,
    sender_account_id: &AccountId,
) -> crate::Result<views::TransactionStatusView> {
    let tx_hash = errors::validate_crypto_hash(tx_hash)?;
    tracing::info!(
        target: crate::LOGGER_MSG,
        "RPC request: tx {} with receipts",
        tx_hash
    );
    let response = rpc_client
        .call_method(
            "tx",
            serde_json::json!({
                "tx_hash": tx_hash.to_string(),
                "sender_account_id": sender_account_id.to_string(),
                "wait_until": "NONE",
            }),
        )
        .await;
    Ok(serde_json::from_value(result_or_error(response, "tx")?)?)
}

/// Block header lookup, used to recover a height from a block hash.
pub async fn get_block_info(
    rpc_client: &RpcClient,
    block_hash: &str,
) -> crate::Result<views::BlockInfoView> {
    let block_hash = errors::validate_crypto_hash(block_hash)?;
    tracing::info!(target: crate::LOGGER_MSG, "RPC request: block {}", block_hash);
    let response = rpc_client
        .call_method(
            "block",
            serde_json::json!({ "block_id": block_hash.to_string() }),
        )
        .await;
    Ok(serde_json::from_value(result_or_error(response, "block")?)?)
}

fn with_block_reference(
    mut params: serde_json::Map<String, Value>,
    block_reference: &BlockReference,
) -> Value {
    match block_reference {
        BlockReference::BlockId(BlockId::Hash(hash)) => {
            params.insert("block_id".to_owned(), hash.to_string().into());
        }
        BlockReference::BlockId(BlockId::Height(height)) => {
            params.insert("block_id".to_owned(), (*height).into());
        }
        _ => {
            params.insert("finality".to_owned(), "final".into());
        }
    }
    Value::Object(params)
}

fn result_or_error(response: Option<Value>, method: &str) -> crate::Result<Value> {
    match response {
        None => Err(errors::ErrorKind::RPCError(format!(
            "All RPC endpoints failed to serve {}",
            method
        ))
        .into()),
        Some(response) => {
            if let Some(error) = response.get("error").filter(|error| !error.is_null()) {
                return Err(errors::ErrorKind::RPCError(format!(
                    "{} request failed: {}",
                    method, error
                ))
                .into());
            }
            response.get("result").cloned().ok_or_else(|| {
                errors::ErrorKind::RPCError(format!("{} response carries no result", method)).into()
            })
        }
    }
}
