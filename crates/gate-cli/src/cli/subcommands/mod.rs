pub mod auth;
pub mod member;
pub mod staff;
pub mod visitor;

pub use auth::AuthCommands;
pub use member::MemberCommands;
pub use staff::StaffCommands;
pub use visitor::VisitorCommands;
