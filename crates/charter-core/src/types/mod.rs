//! Enumerations shared across charter crates.

mod instance_status;
mod item_kind;

pub use instance_status::InstanceStatus;
pub use item_kind::ItemKind;
