use crate::error::Error;
use crate::filter_engine::condition::ConditionBuilder;
use crate::filter_engine::filter::Filter;

/// Receives filters and registers them with a filter engine.
///
/// Implementations are expected to run inside a transaction owned by the caller,
/// so a rejected filter leaves nothing half-installed once that transaction aborts.
pub trait ObjectInstaller {
    fn add_filter(&mut self, filter: &Filter, conditions: &ConditionBuilder) -> Result<(), Error>;
}

impl<T: ObjectInstaller + ?Sized> ObjectInstaller for &mut T {
    fn add_filter(&mut self, filter: &Filter, conditions: &ConditionBuilder) -> Result<(), Error> {
        (**self).add_filter(filter, conditions)
    }
}
