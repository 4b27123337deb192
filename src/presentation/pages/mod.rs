pub mod dashboard;
pub mod home;
pub mod info;
pub mod login;
pub mod signup;
pub mod wishlist;
