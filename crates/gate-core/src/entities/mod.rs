//! Record shapes for the society directory and the visitor log.
//!
//! Field names follow the REST API's JSON. Aliases cover the older
//! spellings the mock API used (`unit`, `check_in_time`, ...).

mod member;
mod staff;
mod user;
mod visitor;

pub use member::{Member, MemberFields};
pub use staff::{SecurityStaff, StaffFields};
pub use user::User;
pub use visitor::{CheckInRequest, VisitSession};
