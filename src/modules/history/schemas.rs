use crate::types;

/// One line of an account's history, normalized across all sources.
/// `hash` is the identity; `balance` stays empty until the balance-fill pass
/// resolves it from on-chain data.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionRecord {
    pub block_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    pub block_timestamp: types::U64,
    pub hash: String,
    pub signer_id: String,
    pub receiver_id: String,
    #[serde(default)]
    pub action_kind: Option<String>,
    #[serde(default)]
    pub args: TransactionArgs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<types::U128>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionArgs {
    #[serde(default)]
    pub method_name: Option<String>,
}

/// Mutable traversal state of one reconciliation call. `offset_timestamp`
/// only tightens as older records are discovered, and `max_block_height`
/// never grows, so every page request covers a window at or below the
/// previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    pub offset_timestamp: u64,
    pub page: u32,
    pub max_block_height: Option<u64>,
}

impl HistoryCursor {
    pub fn new(offset_timestamp: u64) -> Self {
        Self {
            offset_timestamp,
            page: 1,
            max_block_height: None,
        }
    }
}
