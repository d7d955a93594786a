pub mod format;
pub mod mount;
pub mod render;
pub mod view;

pub use mount::*;
pub use render::*;
pub use view::*;
