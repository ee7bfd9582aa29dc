use serde::{Deserialize, Serialize};

use crate::types;

/// Account state as returned by the `view_account` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub amount: types::U128,
    pub locked: types::U128,
    pub code_hash: String,
    pub storage_usage: u64,
    pub storage_paid_at: u64,
    pub block_height: u64,
    pub block_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInfoView {
    pub header: BlockHeaderView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeaderView {
    pub height: u64,
    pub hash: String,
    pub timestamp: u64,
}

/// Full transaction status, including the execution outcomes of every receipt
/// the transaction produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStatusView {
    pub transaction: TransactionView,
    pub transaction_outcome: ExecutionOutcomeWithIdView,
    #[serde(default)]
    pub receipts_outcome: Vec<ExecutionOutcomeWithIdView>,
}

/// The signed part of a transaction. Actions stay untyped: new action kinds
/// appear on chain faster than any hardcoded list, and only the first action's
/// name and method are ever surfaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    pub hash: String,
    pub signer_id: String,
    pub receiver_id: String,
    #[serde(default)]
    pub actions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeWithIdView {
    pub id: String,
    pub block_hash: String,
    pub outcome: ExecutionOutcomeView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeView {
    #[serde(default)]
    pub receipt_ids: Vec<String>,
}

/// Account-affecting state changes at one block (`EXPERIMENTAL_changes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountChangesView {
    pub block_hash: String,
    #[serde(default)]
    pub changes: Vec<serde_json::Value>,
}
