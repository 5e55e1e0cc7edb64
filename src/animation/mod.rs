//! The reveal state machine.

pub(crate) mod machine;
pub(crate) mod phase;
