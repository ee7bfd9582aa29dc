use near_primitives::types::AccountId;

use super::TransactionSource;
use crate::config::Config;
use crate::modules::history::schemas::{HistoryCursor, TransactionRecord};

/// FastNear serves records already normalized to the common shape; one
/// request per page, keyed by the account and a block-height ceiling.
pub struct FastNearSource {
    http: reqwest::Client,
    base_url: String,
}

impl FastNearSource {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.fastnear_url.clone(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct FastNearResponse {
    #[serde(default)]
    transactions: Vec<TransactionRecord>,
}

impl TransactionSource for FastNearSource {
    async fn next_page(
        &self,
        account_id: &AccountId,
        cursor: &HistoryCursor,
    ) -> crate::Result<Vec<TransactionRecord>> {
        let url = format!("{}/v1/account/{}/transactions", self.base_url, account_id);
        let mut request = self.http.get(&url);
        if let Some(max_block_height) = cursor.max_block_height {
            request = request.query(&[("max_block_height", max_block_height.to_string())]);
        }
        let response = request
            .send()
            .await?
            .error_for_status()?
            .json::<FastNearResponse>()
            .await?;
        Ok(response.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_is_already_normalized() {
        let response: FastNearResponse = serde_json::from_value(json!({
            "account_id": "alice.near",
            "transactions": [{
                "block_hash": "9y2tQdvkbNr9UzFnXmV8iqcoWyvzyDqMUXGDAR19jeRr",
                "block_height": 68000000,
                "block_timestamp": "1655571176644255779",
                "hash": "4HTB8ZwXHkDbbcKhct4aWmZtWGCFjmSYq8NzVmRnmwCT",
                "signer_id": "alice.near",
                "receiver_id": "wrap.near",
                "action_kind": "FUNCTION_CALL",
                "args": { "method_name": "near_deposit" }
            }]
        }))
        .unwrap();
        let record = &response.transactions[0];
        assert_eq!(record.block_height, Some(68000000));
        assert_eq!(record.args.method_name.as_deref(), Some("near_deposit"));
        assert_eq!(record.balance, None);
    }

    #[test]
    fn test_missing_transactions_key_reads_as_exhaustion() {
        let response: FastNearResponse =
            serde_json::from_value(json!({ "account_id": "alice.near" })).unwrap();
        assert!(response.transactions.is_empty());
    }
}
