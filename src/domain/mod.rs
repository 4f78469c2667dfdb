mod employee;
mod leave_request;
mod ledger;
mod policy;

pub use employee::*;
pub use leave_request::*;
pub use ledger::*;
pub use policy::*;
