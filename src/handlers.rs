pub mod dashboard;
pub mod health;
pub mod options;
pub mod page;
pub mod summary;
