use near_primitives::types::AccountId;

use super::schemas::{HistoryCursor, TransactionRecord};
use super::sources::TransactionSource;
use crate::modules::balance::{self, blocks::BlockProvider};
use crate::progress::ProgressReporter;
use crate::rpc_helpers::RpcClient;
use crate::utils;

/// Assembles the account's history up to the cursor's timestamp into the
/// caller-provided accumulator, then annotates every record with its
/// post-transaction balance. Cancelling through the progress reporter leaves
/// the remaining balances unresolved; that is a partial result, not an error.
pub async fn get_transactions_to_date<S, B, P>(
    source: &S,
    rpc_client: &RpcClient,
    blocks: &B,
    account_id: &AccountId,
    cursor: HistoryCursor,
    transactions: &mut Vec<TransactionRecord>,
    progress: &P,
) -> crate::Result<()>
where
    S: TransactionSource,
    B: BlockProvider,
    P: ProgressReporter,
{
    collect_history(source, account_id, cursor, transactions, progress).await?;
    balance::fill_missing_balances(rpc_client, blocks, account_id, transactions, progress).await
}

/// Walks the source backward page by page, merging unseen transactions into
/// the accumulator and tightening the cursor, until a page makes no progress.
pub(crate) async fn collect_history<S, P>(
    source: &S,
    account_id: &AccountId,
    mut cursor: HistoryCursor,
    transactions: &mut Vec<TransactionRecord>,
    progress: &P,
) -> crate::Result<()>
where
    S: TransactionSource,
    P: ProgressReporter,
{
    let mut insert_index = 0usize;
    let mut page_records = source.next_page(account_id, &cursor).await?;

    while !page_records.is_empty() {
        let mut added = 0u32;
        let mut skipped = 0u32;
        let page_len = page_records.len();

        for (n, record) in page_records.iter().enumerate() {
            if record.block_timestamp.0 > cursor.offset_timestamp {
                // Already covered by a previous, more specific request.
                skipped += 1;
            } else if !transactions.iter().any(|known| known.hash == record.hash) {
                transactions.insert(insert_index, record.clone());
                insert_index += 1;
                cursor.offset_timestamp = record.block_timestamp.0 + 1;
                added += 1;
            }
            progress.report(
                n as f64 / page_len as f64,
                &format!(
                    "{} {}",
                    account_id,
                    utils::timestamp_date_label(record.block_timestamp.0)
                ),
                false,
            );
        }

        // A page that neither skipped nor added anything cannot move the
        // cursor: the source is either exhausted or stuck replaying.
        // todo a source with an indexing gap also lands here (a full page
        // older than anything seen) and cuts the history short; distinguish
        // that case from true exhaustion
        if skipped == 0 && added == 0 {
            break;
        }

        cursor.page += 1;
        cursor.max_block_height = match page_records.last() {
            Some(tail) => tail.block_height,
            None => transactions.last().and_then(|known| known.block_height),
        };
        page_records = match source.next_page(account_id, &cursor).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    target: crate::LOGGER_MSG,
                    "Error getting account history for {}: {}. Treating the source as exhausted.",
                    account_id,
                    err
                );
                Vec::new()
            }
        };
    }

    Ok(())
}
