use tracing::warn;

use super::{ffi, FilterEngine};
use crate::error::Error;
use crate::filter_engine::condition::ConditionBuilder;
use crate::filter_engine::filter::Filter;
use crate::installer::ObjectInstaller;

/// Transaction guard for the filter engine. Aborts on drop unless committed.
pub struct Transaction<'a> {
    filter_engine: &'a FilterEngine,
    commited: bool,
}

impl<'a> Transaction<'a> {
    fn begin(filter_engine: &'a FilterEngine, flags: u32) -> Result<Self, Error> {
        ffi::filter_engine_transaction_begin(filter_engine.handle()?, flags)?;

        Ok(Self {
            filter_engine,
            commited: false,
        })
    }

    /// Creates a read/write guard for filter engine transaction.
    pub fn begin_write(filter_engine: &'a FilterEngine) -> Result<Self, Error> {
        return Self::begin(filter_engine, 0);
    }

    pub fn engine(&self) -> &'a FilterEngine {
        self.filter_engine
    }

    /// Applies all the changes made inside the transaction.
    pub fn commit(mut self) -> Result<(), Error> {
        ffi::filter_engine_transaction_commit(self.filter_engine.handle()?)?;
        self.commited = true;

        Ok(())
    }
}

impl ObjectInstaller for Transaction<'_> {
    fn add_filter(&mut self, filter: &Filter, conditions: &ConditionBuilder) -> Result<(), Error> {
        self.filter_engine.add_filter(filter, conditions)
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.commited {
            return;
        }
        if let Ok(handle) = self.filter_engine.handle() {
            if let Err(err) = ffi::filter_engine_transaction_abort(handle) {
                warn!("failed to abort transaction: {}", err);
            }
        }
    }
}
