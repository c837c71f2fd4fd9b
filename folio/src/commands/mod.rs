pub mod contact;
pub mod email;
pub mod serve;
