//! Light/dark theme state and the design-token table it selects from.
//!
//! [`ThemeState`] holds the current [`ThemeMode`] and is handed to the
//! components that read or change it. The token table ([`Theme`]) is a gpui
//! global with one color variant per mode, kept pointing at the current mode
//! through [`ActiveThemeMode`].

mod error;
pub use error::*;

mod mode;
pub use mode::*;

mod state;
pub use state::*;

mod preference;
pub use preference::*;

mod schema;
pub use schema::*;

mod colors;
pub use colors::*;

mod tokens;
pub use tokens::*;

mod shadow;
pub use shadow::*;

mod motion;
pub use motion::*;

mod styles;
pub use styles::*;

mod deserializers;

mod ext;
pub use ext::*;

mod kinds;
pub use kinds::*;
