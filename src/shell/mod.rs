//! Interactive shell: text entry, keybindings and the per-tick driver.

pub(crate) mod headless;
pub(crate) mod state;
pub(crate) mod terminal;
