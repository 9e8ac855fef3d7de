pub mod availability;
pub mod booking;
pub mod catalog;
pub mod otp;
pub mod user;

pub use availability::TimeSlot;
pub use booking::{BookingDraft, PaymentDetails, PaymentType, ServiceItem, VenueRef};
pub use catalog::{Provider, Salon, VenueKind};
pub use otp::{OtpPhase, OtpPurpose};
pub use user::{Gender, LoginForm, PasswordResetForm, RegistrationForm};
