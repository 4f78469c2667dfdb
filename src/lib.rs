pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod presentation;

pub use application::LeaveService;
pub use domain::*;
