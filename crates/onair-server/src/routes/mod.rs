pub mod home;
pub mod zoom;
