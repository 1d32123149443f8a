//! USB touch digitizer to absolute pointer bridge, host side.
//!
//! This crate wires real I/O into [`touch_core`]: a hidraw or file reader
//! thread feeding the bridge's chunk channel, a file-backed calibration
//! store, and a dry-run pointer sink.

pub mod calibration_file;
pub mod config;
pub mod input;
pub mod logging;
pub mod output;

// Re-export core types for convenience
pub use touch_core::{
    load_or_init, ByteSource, Calibration, DeviceError, DeviceSelector, InputError, OutputError,
    PointerMapper, PointerSink, SyncPolicy, TouchBridge, INTERRUPT_IN_PIPE, TOUCH_DIGITIZER,
};

pub use calibration_file::FileCalibrationStore;
pub use config::{Cli, Config};
pub use input::{spawn_reader, DevicePipe, HostChannel, PathSelector, ReaderLink, ReaderSource};
pub use output::LogPointerSink;
