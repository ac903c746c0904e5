pub mod auth;
pub mod dispatch;
pub mod home;
pub mod houses;
pub mod member;
pub mod shared;
pub mod staff;
pub mod stats;
pub mod visitor;
