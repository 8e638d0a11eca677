use tracing::{debug, error};
use windows_sys::Win32::Foundation::HANDLE;

use super::ffi;
use crate::error::Error;
use crate::filter_engine::condition::ConditionBuilder;
use crate::filter_engine::filter::Filter;
use crate::Guid;

/// A dynamic session with the filter engine. Objects added through it are
/// removed by the engine when the session closes.
pub struct FilterEngine {
    filter_engine_handle: Option<HANDLE>,
}

impl FilterEngine {
    pub fn open() -> Result<Self, Error> {
        let filter_engine_handle = match ffi::create_filter_engine() {
            Ok(handle) => handle,
            Err(err) => {
                error!("failed to initialize filter engine: {}", err);
                return Err(err);
            }
        };

        Ok(Self {
            filter_engine_handle: Some(filter_engine_handle),
        })
    }

    pub(crate) fn handle(&self) -> Result<HANDLE, Error> {
        self.filter_engine_handle.ok_or(Error::InvalidState)
    }

    pub fn register_provider(
        &self,
        guid: Guid,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        let added = ffi::register_provider(self.handle()?, name, description, guid)?;
        debug!("provider {:#034x} ({}): added={}", guid, name, added);
        Ok(())
    }

    pub fn register_sublayer(
        &self,
        guid: Guid,
        provider: Guid,
        name: &str,
        description: &str,
        weight: u16,
    ) -> Result<(), Error> {
        let added = ffi::register_sublayer(
            self.handle()?,
            name,
            description,
            guid,
            provider,
            weight,
        )?;
        debug!("sublayer {:#034x} ({}): added={}", guid, name, added);
        Ok(())
    }

    pub fn add_filter(&self, filter: &Filter, conditions: &ConditionBuilder) -> Result<(), Error> {
        conditions.check_layer(filter.layer)?;
        let id = ffi::register_filter(self.handle()?, filter, conditions.conditions())?;
        debug!("registered filter {} -> {}", filter.name, id);
        Ok(())
    }

    /// Deleting a filter that does not exist is not an error.
    pub fn delete_filter(&self, key: Guid) -> Result<(), Error> {
        let deleted = ffi::unregister_filter(self.handle()?, key)?;
        debug!("filter {:#034x}: deleted={}", key, deleted);
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), Error> {
        if let Some(handle) = self.filter_engine_handle.take() {
            ffi::filter_engine_close(handle)?;
        }
        Ok(())
    }
}

impl Drop for FilterEngine {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            error!("failed to close filter engine: {}", err);
        }
    }
}
