mod colors;
pub use colors::*;

mod element_id;
pub use element_id::*;

mod squircle;
pub use squircle::*;
