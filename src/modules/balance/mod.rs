pub mod blocks;
pub mod receipts;
pub mod schemas;

pub use blocks::{BlockProvider, NeardataProvider};

use near_primitives::types::AccountId;

use crate::modules::history::schemas::TransactionRecord;
use crate::progress::ProgressReporter;
use crate::retry::{self, RetryPolicy};
use crate::rpc_helpers::RpcClient;
use crate::types::views;
use crate::{rpc_api, utils};

/// Annotates every record still missing a balance, in place. Receipt data is
/// authoritative, so the signer, receiver and action summary are refined at
/// the same time. The pass is cancellable between items; records left
/// unresolved on cancellation keep an absent balance.
pub async fn fill_missing_balances<B, P>(
    rpc_client: &RpcClient,
    blocks: &B,
    account_id: &AccountId,
    transactions: &mut Vec<TransactionRecord>,
    progress: &P,
) -> crate::Result<()>
where
    B: BlockProvider,
    P: ProgressReporter,
{
    let missing: Vec<usize> = transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| tx.balance.is_none())
        .map(|(index, _)| index)
        .collect();
    let total = missing.len();

    for (n, index) in missing.into_iter().enumerate() {
        let label = format!(
            "{} {}",
            account_id,
            utils::timestamp_date_label(transactions[index].block_timestamp.0)
        );
        if progress.report(n as f64 / total as f64, &label, true).stop_requested {
            tracing::info!(
                target: crate::LOGGER_MSG,
                "Balance annotation for {} stopped by the user after {} of {} records",
                account_id,
                n,
                total
            );
            break;
        }

        let tx_hash = transactions[index].hash.clone();
        let block_height = match transactions[index].block_height {
            Some(block_height) => block_height,
            None => {
                let block_info =
                    rpc_api::get_block_info(rpc_client, &transactions[index].block_hash).await?;
                transactions[index].block_height = Some(block_info.header.height);
                block_info.header.height
            }
        };

        match retry::with_retries(RetryPolicy::default(), || {
            receipts::account_balance_after_transaction(rpc_client, account_id, &tx_hash)
        })
        .await
        {
            Ok(resolved) => apply_transaction_view(
                &mut transactions[index],
                &resolved.transaction.transaction,
                resolved.balance,
            ),
            Err(receipt_err) => {
                tracing::warn!(
                    target: crate::LOGGER_MSG,
                    "Receipt-based balance resolution failed for {}: {}. Walking raw blocks from {} instead.",
                    tx_hash,
                    receipt_err,
                    block_height
                );
                match blocks::account_balance_by_traversing_blocks(
                    blocks,
                    rpc_client,
                    account_id,
                    &tx_hash,
                    block_height,
                )
                .await
                {
                    Ok(walked) => apply_transaction_view(
                        &mut transactions[index],
                        &walked.transaction.transaction,
                        walked.balance,
                    ),
                    Err(walk_err) if walk_err.is_not_found() => {
                        tracing::warn!(
                            target: crate::LOGGER_MSG,
                            "{}. Leaving the balance of {} unresolved.",
                            walk_err,
                            tx_hash
                        );
                    }
                    Err(walk_err) => return Err(walk_err),
                }
            }
        }
    }

    Ok(())
}

/// On-chain data beats whatever an indexer reported earlier.
fn apply_transaction_view(
    record: &mut TransactionRecord,
    transaction: &views::TransactionView,
    balance: crate::types::U128,
) {
    record.balance = Some(balance);
    record.signer_id = transaction.signer_id.clone();
    record.receiver_id = transaction.receiver_id.clone();
    let (action_kind, method_name) = utils::first_action_summary(&transaction.actions);
    record.action_kind = action_kind;
    record.args.method_name = method_name;
}
