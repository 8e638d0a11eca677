use std::ffi::CString;

use crate::error::Error;

/// Maps network interface names to the index the OS currently assigns them.
pub trait InterfaceResolver {
    /// `None` when no interface by that name exists right now.
    fn index_of(&self, name: &str) -> Option<u32>;

    fn resolve(&self, name: &str) -> Result<u32, Error> {
        self.index_of(name)
            .ok_or_else(|| Error::InterfaceNotFound(name.to_owned()))
    }
}

impl<T: InterfaceResolver + ?Sized> InterfaceResolver for &T {
    fn index_of(&self, name: &str) -> Option<u32> {
        (**self).index_of(name)
    }
}

/// Looks interfaces up through `if_nametoindex`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemInterfaces;

impl InterfaceResolver for SystemInterfaces {
    fn index_of(&self, name: &str) -> Option<u32> {
        let c_name = CString::new(name).ok()?;
        let index = if_nametoindex(&c_name);
        // Zero is the documented "no such interface" result.
        if index == 0 {
            return None;
        }
        Some(index)
    }
}

#[cfg(windows)]
fn if_nametoindex(name: &CString) -> u32 {
    unsafe {
        windows_sys::Win32::NetworkManagement::IpHelper::if_nametoindex(name.as_ptr() as _)
    }
}

#[cfg(unix)]
fn if_nametoindex(name: &CString) -> u32 {
    unsafe { libc::if_nametoindex(name.as_ptr()) }
}

#[cfg(not(any(windows, unix)))]
fn if_nametoindex(_name: &CString) -> u32 {
    0
}
