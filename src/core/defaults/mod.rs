/*!
Lazily constructed process defaults.
*/

pub mod process;
pub mod slot;

pub use process::SecurityDefaults;
pub use slot::{DefaultSlot, InitStrategy, SlotState};
