pub mod guids;
pub mod rules;

#[cfg(windows)]
mod firewall;

#[cfg(windows)]
pub use firewall::Firewall;
pub use rules::{baseline::BlockAll, FirewallRule};
