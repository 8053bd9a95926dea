//! Domain types for the booking backend core.

mod order;
mod otp;

pub use order::{OrderAmount, RECEIPT_MAX_LEN, derive_receipt};
pub use otp::{OTP_TTL_MINUTES, OtpCode, OtpEmail, OtpId, OtpPurpose, is_valid_email};
