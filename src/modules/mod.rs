pub mod balance;
pub mod history;

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Mutex;

    use near_primitives::types::AccountId;

    use crate::modules::balance::blocks::BlockProvider;
    use crate::modules::balance::schemas::BlockData;
    use crate::modules::history::schemas::{HistoryCursor, TransactionRecord, TransactionArgs};
    use crate::modules::history::sources::TransactionSource;
    use crate::progress::{ProgressReporter, ProgressSignal};
    use crate::{errors, types};

    pub(crate) fn account() -> AccountId {
        AccountId::from_str("alice.near").unwrap()
    }

    pub(crate) fn record(hash: &str, timestamp: u64, block_height: u64) -> TransactionRecord {
        TransactionRecord {
            block_hash: format!("block-of-{}", hash),
            block_height: Some(block_height),
            block_timestamp: types::U64(timestamp),
            hash: hash.to_string(),
            signer_id: "alice.near".to_string(),
            receiver_id: "bob.near".to_string(),
            action_kind: Some("Transfer".to_string()),
            args: TransactionArgs::default(),
            balance: None,
        }
    }

    /// Serves prepared pages by page number and records every cursor it saw.
    pub(crate) struct FakeSource {
        pub(crate) pages: Vec<Vec<TransactionRecord>>,
        pub(crate) calls: Mutex<Vec<HistoryCursor>>,
        pub(crate) fail_from_page: Option<u32>,
    }

    impl FakeSource {
        pub(crate) fn new(pages: Vec<Vec<TransactionRecord>>) -> Self {
            Self {
                pages,
                calls: Mutex::new(Vec::new()),
                fail_from_page: None,
            }
        }
    }

    impl TransactionSource for FakeSource {
        async fn next_page(
            &self,
            _account_id: &AccountId,
            cursor: &HistoryCursor,
        ) -> crate::Result<Vec<TransactionRecord>> {
            self.calls.lock().unwrap().push(*cursor);
            if self.fail_from_page.map_or(false, |page| cursor.page >= page) {
                return Err(
                    errors::ErrorKind::SourceError("the indexer is down".to_string()).into(),
                );
            }
            Ok(self
                .pages
                .get(cursor.page as usize - 1)
                .cloned()
                .unwrap_or_default())
        }
    }

    /// Serves prepared raw blocks by height; unknown heights read as skipped.
    pub(crate) struct FakeBlocks {
        pub(crate) blocks: HashMap<u64, BlockData>,
    }

    impl FakeBlocks {
        pub(crate) fn empty() -> Self {
            Self {
                blocks: HashMap::new(),
            }
        }

        pub(crate) fn new(blocks: Vec<BlockData>) -> Self {
            Self {
                blocks: blocks
                    .into_iter()
                    .map(|block| (block.block.header.height, block))
                    .collect(),
            }
        }
    }

    impl BlockProvider for FakeBlocks {
        async fn block(&self, block_height: u64) -> crate::Result<Option<BlockData>> {
            Ok(self.blocks.get(&block_height).cloned())
        }
    }

    /// Reporter that optionally requests a stop and counts what it saw.
    pub(crate) struct FakeProgress {
        pub(crate) reports: Mutex<Vec<String>>,
        pub(crate) stop_requested: bool,
    }

    impl FakeProgress {
        pub(crate) fn new() -> Self {
            Self {
                reports: Mutex::new(Vec::new()),
                stop_requested: false,
            }
        }

        pub(crate) fn stopping() -> Self {
            Self {
                reports: Mutex::new(Vec::new()),
                stop_requested: true,
            }
        }
    }

    impl ProgressReporter for FakeProgress {
        fn report(&self, _fraction: f64, label: &str, cancellable: bool) -> ProgressSignal {
            self.reports.lock().unwrap().push(label.to_string());
            ProgressSignal {
                stop_requested: cancellable && self.stop_requested,
            }
        }
    }
}
