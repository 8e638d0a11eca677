use core::mem::MaybeUninit;
use core::ptr;

use widestring::U16CString;
use windows_sys::core::GUID;
use windows_sys::Win32::Foundation::{FWP_E_ALREADY_EXISTS, FWP_E_FILTER_NOT_FOUND, HANDLE};
use windows_sys::Win32::NetworkManagement::WindowsFilteringPlatform::{
    FwpmEngineClose0, FwpmEngineOpen0, FwpmFilterAdd0, FwpmFilterDeleteByKey0, FwpmProviderAdd0,
    FwpmSubLayerAdd0, FwpmTransactionAbort0, FwpmTransactionBegin0, FwpmTransactionCommit0,
    FWPM_CONDITION_INTERFACE_INDEX, FWPM_CONDITION_L2_FLAGS, FWPM_FILTER0,
    FWPM_FILTER_CONDITION0, FWPM_PROVIDER0, FWPM_SESSION0, FWPM_SESSION_FLAG_DYNAMIC,
    FWPM_SUBLAYER0, FWP_ACTION_BLOCK, FWP_ACTION_PERMIT, FWP_MATCH_EQUAL,
    FWP_MATCH_FLAGS_ANY_SET, FWP_MATCH_NOT_EQUAL, FWP_UINT32, FWP_UINT8,
};
use windows_sys::Win32::System::Rpc::RPC_C_AUTHN_WINNT;

use crate::error::Error;
use crate::filter_engine::condition::{CompareOp, Condition};
use crate::filter_engine::filter::{Action, Filter};
use crate::Guid;

const ERROR_SUCCESS: u32 = 0;

// Every FWP_CONDITION_L2_* bit: native ethernet, wifi, mobile broadband,
// wifi direct, vm2vm, malformed, ip fragment group, connector present.
const L2_FLAGS_ANY: u32 = 0xFF;

fn check(status: u32) -> Result<(), Error> {
    if status == ERROR_SUCCESS {
        return Ok(());
    }
    Err(Error::Engine(status))
}

fn wide(value: &str, field: &str) -> Result<U16CString, Error> {
    U16CString::from_str(value).map_err(|_| Error::InvalidString(field.to_owned()))
}

pub(crate) fn create_filter_engine() -> Result<HANDLE, Error> {
    unsafe {
        let mut handle: HANDLE = 0;
        let mut session: FWPM_SESSION0 = MaybeUninit::zeroed().assume_init();
        session.flags = FWPM_SESSION_FLAG_DYNAMIC;
        let status = FwpmEngineOpen0(
            ptr::null(),
            RPC_C_AUTHN_WINNT,
            ptr::null(),
            &session,
            &mut handle,
        );
        check(status)?;
        Ok(handle)
    }
}

pub(crate) fn filter_engine_close(filter_engine_handle: HANDLE) -> Result<(), Error> {
    unsafe { check(FwpmEngineClose0(filter_engine_handle)) }
}

pub(crate) fn filter_engine_transaction_begin(
    filter_engine_handle: HANDLE,
    flags: u32,
) -> Result<(), Error> {
    unsafe { check(FwpmTransactionBegin0(filter_engine_handle, flags)) }
}

pub(crate) fn filter_engine_transaction_commit(filter_engine_handle: HANDLE) -> Result<(), Error> {
    unsafe { check(FwpmTransactionCommit0(filter_engine_handle)) }
}

pub(crate) fn filter_engine_transaction_abort(filter_engine_handle: HANDLE) -> Result<(), Error> {
    unsafe { check(FwpmTransactionAbort0(filter_engine_handle)) }
}

/// Returns `Ok(false)` if a provider with this key is already registered.
pub(crate) fn register_provider(
    filter_engine_handle: HANDLE,
    name: &str,
    description: &str,
    guid: Guid,
) -> Result<bool, Error> {
    let name = wide(name, "name")?;
    let description = wide(description, "description")?;

    unsafe {
        let mut provider: FWPM_PROVIDER0 = MaybeUninit::zeroed().assume_init();
        provider.providerKey = GUID::from_u128(guid);
        provider.displayData.name = name.as_ptr() as _;
        provider.displayData.description = description.as_ptr() as _;

        let status = FwpmProviderAdd0(filter_engine_handle, &provider, ptr::null_mut());
        if status == FWP_E_ALREADY_EXISTS as u32 {
            return Ok(false);
        }
        check(status)?;
        Ok(true)
    }
}

/// Returns `Ok(false)` if a sublayer with this key is already registered.
pub(crate) fn register_sublayer(
    filter_engine_handle: HANDLE,
    name: &str,
    description: &str,
    guid: Guid,
    provider: Guid,
    weight: u16,
) -> Result<bool, Error> {
    let name = wide(name, "name")?;
    let description = wide(description, "description")?;
    let mut provider_key = GUID::from_u128(provider);

    unsafe {
        let mut sublayer: FWPM_SUBLAYER0 = MaybeUninit::zeroed().assume_init();
        sublayer.subLayerKey = GUID::from_u128(guid);
        sublayer.displayData.name = name.as_ptr() as _;
        sublayer.displayData.description = description.as_ptr() as _;
        sublayer.providerKey = &mut provider_key;
        sublayer.flags = 0;
        sublayer.weight = weight;

        let status = FwpmSubLayerAdd0(filter_engine_handle, &sublayer, ptr::null_mut());
        if status == FWP_E_ALREADY_EXISTS as u32 {
            return Ok(false);
        }
        check(status)?;
        Ok(true)
    }
}

fn lower_condition(condition: &Condition) -> FWPM_FILTER_CONDITION0 {
    unsafe {
        let mut lowered: FWPM_FILTER_CONDITION0 = MaybeUninit::zeroed().assume_init();
        match condition {
            Condition::InterfaceIndex { op, index } => {
                lowered.fieldKey = FWPM_CONDITION_INTERFACE_INDEX;
                lowered.matchType = match op {
                    CompareOp::Eq => FWP_MATCH_EQUAL,
                    CompareOp::Neq => FWP_MATCH_NOT_EQUAL,
                };
                lowered.conditionValue.r#type = FWP_UINT32;
                lowered.conditionValue.Anonymous.uint32 = *index;
            }
            Condition::L2Flags => {
                lowered.fieldKey = FWPM_CONDITION_L2_FLAGS;
                lowered.matchType = FWP_MATCH_FLAGS_ANY_SET;
                lowered.conditionValue.r#type = FWP_UINT32;
                lowered.conditionValue.Anonymous.uint32 = L2_FLAGS_ANY;
            }
        }
        lowered
    }
}

pub(crate) fn register_filter(
    filter_engine_handle: HANDLE,
    filter: &Filter,
    conditions: &[Condition],
) -> Result<u64, Error> {
    let name = wide(&filter.name, "name")?;
    let description = match &filter.description {
        Some(description) => Some(wide(description, "description")?),
        None => None,
    };
    let mut provider_key = GUID::from_u128(filter.provider);
    let mut lowered: Vec<FWPM_FILTER_CONDITION0> =
        conditions.iter().map(lower_condition).collect();

    let mut filter_id: u64 = 0;
    unsafe {
        let mut raw: FWPM_FILTER0 = MaybeUninit::zeroed().assume_init();
        raw.filterKey = GUID::from_u128(filter.key);
        raw.displayData.name = name.as_ptr() as _;
        if let Some(description) = &description {
            raw.displayData.description = description.as_ptr() as _;
        }
        raw.providerKey = &mut provider_key;
        raw.layerKey = GUID::from_u128(filter.layer.get_guid());
        raw.subLayerKey = GUID::from_u128(filter.sublayer);
        raw.weight.r#type = FWP_UINT8;
        raw.weight.Anonymous.uint8 = filter.weight.value();
        raw.action.r#type = match filter.action {
            Action::Block => FWP_ACTION_BLOCK,
            Action::Permit => FWP_ACTION_PERMIT,
        };
        // Zero conditions make the filter apply to all traffic in its layer.
        raw.numFilterConditions = lowered.len() as u32;
        if !lowered.is_empty() {
            raw.filterCondition = lowered.as_mut_ptr();
        }

        let status = FwpmFilterAdd0(filter_engine_handle, &raw, ptr::null_mut(), &mut filter_id);
        check(status)?;
    }

    Ok(filter_id)
}

/// Returns `Ok(false)` if no filter with this key exists.
pub(crate) fn unregister_filter(filter_engine_handle: HANDLE, key: Guid) -> Result<bool, Error> {
    let key = GUID::from_u128(key);
    unsafe {
        let status = FwpmFilterDeleteByKey0(filter_engine_handle, &key);
        if status == FWP_E_FILTER_NOT_FOUND as u32 {
            return Ok(false);
        }
        check(status)?;
        Ok(true)
    }
}
