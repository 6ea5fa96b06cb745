pub mod entry;
pub mod view;

pub use entry::*;
pub use view::*;
