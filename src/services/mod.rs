pub mod account;
pub mod booking;
pub mod catalog;
pub mod checkout;
pub mod otp;
pub mod pricing;
pub(crate) mod transient;
