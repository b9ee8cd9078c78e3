//! Windowed shell support code. The event loop itself lives in the
//! `headful` binary; this module holds the parts worth unit testing.

pub mod input_adapter;
