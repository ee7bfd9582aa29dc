use near_primitives::types::AccountId;

use super::TransactionSource;
use crate::config::Config;
use crate::modules::history::schemas::{HistoryCursor, TransactionArgs, TransactionRecord};
use crate::types;

/// NearBlocks REST indexer, the default backend. Pages are requested in
/// descending order; a transaction with several actions is summarized by its
/// first action only.
pub struct NearBlocksSource {
    http: reqwest::Client,
    base_url: String,
    per_page: u32,
}

impl NearBlocksSource {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.nearblocks_url.clone(),
            per_page: crate::DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct NearBlocksResponse {
    #[serde(default)]
    txns: Vec<NearBlocksTransaction>,
}

#[derive(Debug, serde::Deserialize)]
struct NearBlocksTransaction {
    included_in_block_hash: String,
    #[serde(default)]
    block: Option<NearBlocksBlock>,
    block_timestamp: types::U64,
    transaction_hash: String,
    predecessor_account_id: String,
    receiver_account_id: String,
    #[serde(default)]
    actions: Option<Vec<NearBlocksAction>>,
}

#[derive(Debug, serde::Deserialize)]
struct NearBlocksBlock {
    block_height: u64,
}

#[derive(Debug, serde::Deserialize)]
struct NearBlocksAction {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    method: Option<String>,
}

impl From<NearBlocksTransaction> for TransactionRecord {
    fn from(tx: NearBlocksTransaction) -> Self {
        let (action_kind, method_name) =
            match tx.actions.as_ref().and_then(|actions| actions.first()) {
                Some(action) => (action.action.clone(), action.method.clone()),
                None => (None, None),
            };
        Self {
            block_hash: tx.included_in_block_hash,
            block_height: tx.block.map(|block| block.block_height),
            block_timestamp: tx.block_timestamp,
            hash: tx.transaction_hash,
            signer_id: tx.predecessor_account_id,
            receiver_id: tx.receiver_account_id,
            action_kind,
            args: TransactionArgs { method_name },
            balance: None,
        }
    }
}

impl TransactionSource for NearBlocksSource {
    async fn next_page(
        &self,
        account_id: &AccountId,
        cursor: &HistoryCursor,
    ) -> crate::Result<Vec<TransactionRecord>> {
        let url = format!("{}/v1/account/{}/txns", self.base_url, account_id);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("page", cursor.page.to_string()),
                ("per_page", self.per_page.to_string()),
                ("order", "desc".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<NearBlocksResponse>()
            .await?;
        Ok(response
            .txns
            .into_iter()
            .map(TransactionRecord::from)
            .collect())
    }
}
