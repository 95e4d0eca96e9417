//! Test tooling for code built on `dynval`
//!
//! - `Buffer` and the mutex-guarded `SafeBuffer` writer doubles
//! - Process environment mocking that restores the original state
//! - Path existence checks (`is_dir`, `is_file`)

pub mod buffer;
pub mod env;
pub mod error;
pub mod fs;

pub use buffer::{Buffer, SafeBuffer};
pub use env::{mock_env_value, mock_os_env, mock_os_env_by_text, parse_env_text};
pub use error::{EnvError, EnvResult};
pub use fs::{is_dir, is_file};
