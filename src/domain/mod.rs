pub mod errors;
pub mod events;
pub mod info;
pub mod insights;
pub mod logging;
pub mod repositories;
pub mod search;
pub mod session;
pub mod validation;
pub mod wishlist;
