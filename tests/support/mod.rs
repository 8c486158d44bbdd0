#![allow(dead_code)]

pub mod harness;
pub mod mock_buffer;
pub mod mock_clipboard;
