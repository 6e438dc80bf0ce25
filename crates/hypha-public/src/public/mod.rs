pub mod home;
pub mod pages;
