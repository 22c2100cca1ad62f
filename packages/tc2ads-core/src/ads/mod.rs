//! ADS protocol primitives - command ids, state flags, device states, return
//! codes and the well-known index groups.

pub mod command_id;
pub mod index_group;
pub mod return_code;
pub mod state;
pub mod state_flags;

pub use command_id::CommandId;
pub use return_code::ReturnCode;
pub use state::AdsState;
pub use state_flags::StateFlags;

/// Index group of an ADS address.
pub type IndexGroup = u32;
/// Index offset of an ADS address.
pub type IndexOffset = u32;
