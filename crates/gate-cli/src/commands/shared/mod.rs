pub mod confirm;
pub mod dates;
pub mod limit;
pub mod respond;
