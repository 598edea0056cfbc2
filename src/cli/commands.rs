pub mod check;
pub mod serve;

pub use check::check;
pub use serve::serve;
