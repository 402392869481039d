//! HTTP API handlers for moodmix-api

pub mod buildinfo;
pub mod diagnostics;
pub mod greeting;
pub mod health;
pub mod radios;
pub mod suggest;

pub use buildinfo::get_build_info;
pub use diagnostics::diagnostics;
pub use greeting::{hello, root};
pub use health::health_check;
pub use radios::list_radios;
pub use suggest::suggest;
