pub mod config;
pub mod logging;

pub mod error;
pub mod naming;
pub mod storage;
pub mod upload;

pub use error::{ErrorKind, UploadError};
pub use naming::{resolve, TargetPath};
pub use storage::{write_bounded, WriteOptions};
pub use upload::{UploadResult, UploadStore};
