use tracing::info;
use wfp::{Error, FilterEngine, Transaction};

use crate::guids;
use crate::rules::{baseline::BlockAll, FirewallRule};

/// Owns the engine session the firewall's filters live in. Dropping it
/// removes every filter it installed.
pub struct Firewall {
    engine: FilterEngine,
}

impl Firewall {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            engine: FilterEngine::open()?,
        })
    }

    pub fn apply_baseline(&self) -> Result<(), Error> {
        self.apply(&BlockAll::default())
    }

    /// Registers the provider and baseline sublayer, then applies `rule`,
    /// all in one transaction.
    pub fn apply(&self, rule: &dyn FirewallRule) -> Result<(), Error> {
        let mut transaction = Transaction::begin_write(&self.engine)?;
        self.register_objects(&transaction)?;
        rule.apply(&mut transaction)?;
        transaction.commit()?;
        info!("transaction commited");

        Ok(())
    }

    /// Removes the baseline filters, including ones left by an earlier session.
    pub fn reset(&self) -> Result<(), Error> {
        let transaction = Transaction::begin_write(&self.engine)?;
        for key in guids::baseline_filters() {
            transaction.engine().delete_filter(key)?;
        }
        transaction.commit()?;
        info!("baseline filters removed");

        Ok(())
    }

    fn register_objects(&self, transaction: &Transaction<'_>) -> Result<(), Error> {
        let engine = transaction.engine();
        engine.register_provider(
            guids::PROVIDER,
            guids::PROVIDER_NAME,
            guids::PROVIDER_DESCRIPTION,
        )?;
        engine.register_sublayer(
            guids::SUBLAYER_BASELINE,
            guids::PROVIDER,
            guids::SUBLAYER_BASELINE_NAME,
            guids::SUBLAYER_BASELINE_DESCRIPTION,
            guids::SUBLAYER_BASELINE_WEIGHT,
        )
    }
}
