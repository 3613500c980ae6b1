//! Portal sidecar: stored schedule lessons, week grid synthesis and the
//! JSON-lines IPC surface the portal front end talks to.

pub mod db;
pub mod ipc;
pub mod schedule;
