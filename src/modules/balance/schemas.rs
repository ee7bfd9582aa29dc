use serde::{Deserialize, Serialize};

use crate::types::views;
use crate::types;

/// One raw block as served by the per-height block-data endpoint: the header
/// plus every shard's chunk transactions, receipt execution outcomes and
/// state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    pub block: views::BlockInfoView,
    #[serde(default)]
    pub shards: Vec<ShardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardView {
    #[serde(default)]
    pub chunk: Option<ChunkView>,
    #[serde(default)]
    pub receipt_execution_outcomes: Vec<ReceiptExecutionOutcomeView>,
    #[serde(default)]
    pub state_changes: Vec<StateChangeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkView {
    #[serde(default)]
    pub transactions: Vec<IndexerTransactionView>,
}

/// A transaction as embedded in chunk data, with its execution outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerTransactionView {
    pub transaction: views::TransactionView,
    pub outcome: IndexerExecutionOutcomeView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerExecutionOutcomeView {
    pub execution_outcome: views::ExecutionOutcomeWithIdView,
}

/// Execution outcome of one receipt, annotated with the transaction that
/// caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptExecutionOutcomeView {
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub execution_outcome: views::ExecutionOutcomeWithIdView,
}

/// A recorded state mutation with its cause. Only `account_update` changes
/// are of interest here; everything else is carried opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChangeView {
    #[serde(rename = "type")]
    pub change_type: String,
    #[serde(default)]
    pub cause: StateChangeCauseView,
    #[serde(default)]
    pub change: AccountUpdateView,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateChangeCauseView {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub receipt_hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdateView {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub amount: Option<types::U128>,
}
