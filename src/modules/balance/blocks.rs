use near_primitives::types::{AccountId, BlockId, BlockReference};

use super::schemas::{BlockData, IndexerTransactionView};
use crate::config::Config;
use crate::rpc_helpers::RpcClient;
use crate::{errors, rpc_api, types};

const MAX_BLOCKS_WITHOUT_TRACE: u32 = 10;

/// Raw per-block shard data, by height. `None` is a height the chain skipped
/// (or the provider has nothing for); callers treat it as a block with no
/// trace of anything.
#[allow(async_fn_in_trait)]
pub trait BlockProvider {
    async fn block(&self, block_height: u64) -> crate::Result<Option<BlockData>>;
}

/// Raw block endpoint of the neardata service.
pub struct NeardataProvider {
    http: reqwest::Client,
    base_url: String,
}

impl NeardataProvider {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.neardata_url.clone(),
        }
    }
}

impl BlockProvider for NeardataProvider {
    async fn block(&self, block_height: u64) -> crate::Result<Option<BlockData>> {
        let url = format!("{}/v0/block/{}", self.base_url, block_height);
        Ok(self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Option<BlockData>>()
            .await?)
    }
}

/// What the walk dug up: the embedded transaction and the account's balance
/// once the whole receipt chain had executed.
#[derive(Debug)]
pub struct BlockWalkOutcome {
    pub transaction: IndexerTransactionView,
    pub balance: types::U128,
}

/// Locates the transaction in raw shard data by walking backward from the
/// given height, then follows its receipt chain forward block by block until
/// every receipt has executed, capturing the account's balance from the state
/// changes along the way. Ten consecutive blocks without any trace of the
/// transaction abort the backward walk.
pub async fn account_balance_by_traversing_blocks<B: BlockProvider>(
    blocks: &B,
    rpc_client: &RpcClient,
    account_id: &AccountId,
    tx_hash: &str,
    block_height: u64,
) -> crate::Result<BlockWalkOutcome> {
    let given_block_height = block_height;
    let mut height = block_height;
    let mut blocks_without_trace = 0u32;
    let mut balance: Option<types::U128> = None;

    let no_trace_error = || {
        errors::ErrorKind::NotFound(format!(
            "No transaction or receipts found for transaction {} by {} in block {}",
            tx_hash, account_id, given_block_height
        ))
    };

    // Backward: find the block whose chunk carries the transaction itself.
    let (transaction, found_block) = loop {
        let fetched = blocks.block(height).await?;
        let mut evidence = false;
        let mut found = None;
        if let Some(block_data) = fetched {
            let scan = scan_block_for_transaction(&block_data, tx_hash, account_id);
            if scan.balance.is_some() {
                balance = scan.balance;
            }
            evidence = scan.receipt_evidence;
            if let Some(transaction) = scan.transaction {
                found = Some((transaction, block_data));
            }
        }
        if let Some(found) = found {
            break found;
        }
        if evidence {
            // The receipts executed here even though the transaction sits in
            // an earlier block; keep digging.
            blocks_without_trace = 0;
        } else {
            blocks_without_trace += 1;
            if blocks_without_trace == MAX_BLOCKS_WITHOUT_TRACE {
                return Err(no_trace_error().into());
            }
        }
        height = height.checked_sub(1).ok_or_else(no_trace_error)?;
    };

    // Forward: chase the receipt frontier until every receipt has executed.
    let mut pending: Vec<String> = transaction
        .outcome
        .execution_outcome
        .outcome
        .receipt_ids
        .clone();
    let mut last_block_hash = found_block.block.header.hash.clone();
    let mut current = Some(found_block);

    while !pending.is_empty() {
        if let Some(block_data) = &current {
            last_block_hash = block_data.block.header.hash.clone();
            if let Some(update) = advance_receipt_frontier(block_data, &mut pending, account_id) {
                balance = Some(update);
            }
        }
        if pending.is_empty() {
            break;
        }
        height += 1;
        current = blocks.block(height).await?;
    }

    let balance = match balance {
        Some(balance) => balance,
        // No state change named the account; ask the chain directly at the
        // last block the walk touched.
        None => {
            let block_hash = errors::validate_crypto_hash(&last_block_hash)?;
            rpc_api::view_account(
                rpc_client,
                &BlockReference::BlockId(BlockId::Hash(block_hash)),
                account_id,
            )
            .await?
            .amount
        }
    };

    Ok(BlockWalkOutcome {
        transaction,
        balance,
    })
}

struct BlockScan {
    transaction: Option<IndexerTransactionView>,
    receipt_evidence: bool,
    balance: Option<types::U128>,
}

fn scan_block_for_transaction(
    block: &BlockData,
    tx_hash: &str,
    account_id: &AccountId,
) -> BlockScan {
    let mut scan = BlockScan {
        transaction: None,
        receipt_evidence: false,
        balance: None,
    };
    for shard in &block.shards {
        let in_chunk = shard.chunk.as_ref().and_then(|chunk| {
            chunk
                .transactions
                .iter()
                .find(|tx| tx.transaction.hash == tx_hash)
        });
        match in_chunk {
            Some(transaction) => scan.transaction = Some(transaction.clone()),
            None => {
                // Partial evidence: the transaction executed in receipts here
                // even though its chunk lives elsewhere.
                if shard
                    .receipt_execution_outcomes
                    .iter()
                    .any(|outcome| outcome.tx_hash.as_deref() == Some(tx_hash))
                {
                    scan.receipt_evidence = true;
                }
            }
        }
        if let Some(update) = shard.state_changes.iter().find(|change| {
            change.change_type == "account_update"
                && change.cause.tx_hash.as_deref() == Some(tx_hash)
                && change.change.account_id.as_deref() == Some(account_id.as_ref())
        }) {
            if update.change.amount.is_some() {
                scan.balance = update.change.amount;
            }
        }
    }
    scan
}

/// Replaces every pending receipt id whose execution outcome shows up in this
/// block with its child receipt ids, and reports the account's balance if one
/// of the pending receipts updated it here.
fn advance_receipt_frontier(
    block: &BlockData,
    pending: &mut Vec<String>,
    account_id: &AccountId,
) -> Option<types::U128> {
    let mut balance = None;
    for shard in &block.shards {
        // State changes first: a receipt's balance effect lands in the same
        // block as its execution outcome, so the id must still be pending.
        if let Some(update) = shard.state_changes.iter().find(|change| {
            change.change_type == "account_update"
                && change
                    .cause
                    .receipt_hash
                    .as_deref()
                    .map_or(false, |receipt_hash| {
                        pending.iter().any(|id| id == receipt_hash)
                    })
                && change.change.account_id.as_deref() == Some(account_id.as_ref())
        }) {
            if update.change.amount.is_some() {
                balance = update.change.amount;
            }
        }
        for outcome in &shard.receipt_execution_outcomes {
            if let Some(position) = pending
                .iter()
                .position(|id| *id == outcome.execution_outcome.id)
            {
                pending.remove(position);
                pending.extend(outcome.execution_outcome.outcome.receipt_ids.iter().cloned());
            }
        }
    }
    balance
}
