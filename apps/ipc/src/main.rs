//! # Suanpan IPC Entry Point
//!
//! The binary the Electron shell spawns. All logic lives in the library
//! (`lib.rs`) so the serve loop stays testable; this file only starts it.
//!
//! ## Process Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Electron main process                                                  │
//! │      │ spawn("suanpan-ipc")                                             │
//! │      ▼                                                                  │
//! │  suanpan-ipc                                                            │
//! │      stdin   ◄── one JSON request per line                              │
//! │      stdout  ──► one JSON response per line                             │
//! │      stderr  ──► logs (RUST_LOG controls verbosity)                     │
//! │      exit 0  ◄── when the shell closes stdin                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

fn main() {
    suanpan_ipc::run();
}
