//! Backend bridge wiring for both window surfaces.
//!
//! This module exposes the UI-side command/event protocol, the TCP
//! connection to the backend process, and the worker spawn helper used by
//! the egui update loops.

mod protocol;
mod remote;
mod worker;

pub use protocol::{BridgeCmd, BridgeErrorSource, BridgeEvent};
pub use remote::RemoteConn;
pub use worker::{spawn_bridge, BridgeHandle};
