//! Light/dark theme pickers for gpui, backed by a shared theme state and a
//! JSON design-token table.

pub mod primitives;

pub mod components;

pub mod theme;

mod utils;
pub use utils::ElementIdExt;

mod assets;
pub use assets::*;

mod init;
pub use init::*;
