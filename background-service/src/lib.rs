pub mod controller;
pub mod frame;
pub mod notify;
pub mod timer;


pub use controller::*;
pub use frame::*;
pub use timer::RefreshTimer;
