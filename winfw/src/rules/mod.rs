use wfp::{Error, ObjectInstaller};

pub mod baseline;

/// A set of filters installed as one unit.
pub trait FirewallRule {
    /// Submits every filter of the rule in order and stops at the first error.
    /// Rolling back what was already submitted is up to the caller's transaction.
    fn apply(&self, installer: &mut dyn ObjectInstaller) -> Result<(), Error>;

    /// `true` iff every filter was accepted.
    fn try_apply(&self, installer: &mut dyn ObjectInstaller) -> bool {
        self.apply(installer).is_ok()
    }
}
