pub mod dispatch;
pub mod resources;
pub mod shell;
pub mod tools;
