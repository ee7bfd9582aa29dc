use std::collections::HashMap;

use near_primitives::types::{AccountId, BlockId, BlockReference};

use crate::rpc_helpers::RpcClient;
use crate::types::views;
use crate::{errors, rpc_api, types};

/// Balance plus the authoritative transaction data it was derived from.
#[derive(Debug)]
pub struct ResolvedBalance {
    pub transaction: views::TransactionStatusView,
    pub balance: types::U128,
}

/// Resolves the account's balance right after the transaction finished
/// executing: the last state the transaction could have touched is the block
/// of its causally deepest receipt.
pub async fn account_balance_after_transaction(
    rpc_client: &RpcClient,
    account_id: &AccountId,
    tx_hash: &str,
) -> crate::Result<ResolvedBalance> {
    let transaction =
        rpc_api::get_transaction_status_with_receipts(rpc_client, tx_hash, account_id).await?;
    let block_hash = match find_deepest_receipt(&transaction) {
        Some((receipt, _depth)) => receipt.block_hash.clone(),
        // No receipts at all; the transaction outcome's block is the closest
        // state there is.
        None => transaction.transaction_outcome.block_hash.clone(),
    };
    let block_hash = errors::validate_crypto_hash(&block_hash)?;
    let account = rpc_api::view_account(
        rpc_client,
        &BlockReference::BlockId(BlockId::Hash(block_hash)),
        account_id,
    )
    .await?;
    Ok(ResolvedBalance {
        transaction,
        balance: account.amount,
    })
}

/// Walks the receipt forest rooted at the transaction outcome's receipt ids
/// and picks the deepest node; on equal depth the one listed later in
/// `receipts_outcome` wins. Receipts referenced but not present in the
/// outcome list (e.g. still pending on another shard) are ignored.
pub(crate) fn find_deepest_receipt(
    transaction: &views::TransactionStatusView,
) -> Option<(&views::ExecutionOutcomeWithIdView, usize)> {
    let arena: HashMap<&str, (usize, &views::ExecutionOutcomeWithIdView)> = transaction
        .receipts_outcome
        .iter()
        .enumerate()
        .map(|(position, receipt)| (receipt.id.as_str(), (position, receipt)))
        .collect();

    let mut work: Vec<(&str, usize)> = transaction
        .transaction_outcome
        .outcome
        .receipt_ids
        .iter()
        .map(|receipt_id| (receipt_id.as_str(), 0))
        .collect();
    let mut deepest: Option<(usize, usize)> = None; // (position, depth)

    while let Some((receipt_id, depth)) = work.pop() {
        let Some(&(position, receipt)) = arena.get(receipt_id) else {
            continue;
        };
        let wins = match deepest {
            None => true,
            Some((best_position, best_depth)) => {
                depth > best_depth || (depth == best_depth && position > best_position)
            }
        };
        if wins {
            deepest = Some((position, depth));
        }
        for child in &receipt.outcome.receipt_ids {
            work.push((child.as_str(), depth + 1));
        }
    }

    deepest.map(|(position, depth)| (&transaction.receipts_outcome[position], depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(
        root_receipt_ids: Vec<&str>,
        receipts: Vec<(&str, Vec<&str>)>,
    ) -> views::TransactionStatusView {
        serde_json::from_value(json!({
            "transaction": {
                "hash": "4HTB8ZwXHkDbbcKhct4aWmZtWGCFjmSYq8NzVmRnmwCT",
                "signer_id": "alice.near",
                "receiver_id": "wrap.near",
                "actions": [],
            },
            "transaction_outcome": {
                "id": "4HTB8ZwXHkDbbcKhct4aWmZtWGCFjmSYq8NzVmRnmwCT",
                "block_hash": "tx-block",
                "outcome": { "receipt_ids": root_receipt_ids },
            },
            "receipts_outcome": receipts.iter().map(|(id, children)| json!({
                "id": id,
                "block_hash": format!("block-of-{}", id),
                "outcome": { "receipt_ids": children },
            })).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    #[test]
    fn test_later_listed_receipt_wins_a_depth_tie() {
        let transaction = status(
            vec!["A"],
            vec![("A", vec!["B", "C"]), ("B", vec![]), ("C", vec![])],
        );
        let (deepest, depth) = find_deepest_receipt(&transaction).unwrap();
        assert_eq!(deepest.id, "C");
        assert_eq!(depth, 1);
    }

    #[test]
    fn test_depth_beats_list_position() {
        // D sits earlier in the list than C, but one level deeper.
        let transaction = status(
            vec!["A"],
            vec![
                ("A", vec!["B", "C"]),
                ("D", vec![]),
                ("B", vec!["D"]),
                ("C", vec![]),
            ],
        );
        let (deepest, depth) = find_deepest_receipt(&transaction).unwrap();
        assert_eq!(deepest.id, "D");
        assert_eq!(depth, 2);
    }

    #[test]
    fn test_no_receipts_yields_none() {
        let transaction = status(vec![], vec![]);
        assert!(find_deepest_receipt(&transaction).is_none());
    }

    #[test]
    fn test_dangling_receipt_ids_are_ignored() {
        let transaction = status(vec!["A"], vec![("A", vec!["missing"])]);
        let (deepest, depth) = find_deepest_receipt(&transaction).unwrap();
        assert_eq!(deepest.id, "A");
        assert_eq!(depth, 0);
    }
}
