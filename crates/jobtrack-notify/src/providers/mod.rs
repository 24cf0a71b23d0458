//! Mail transport implementations.

pub mod log;
pub mod resend;
pub mod smtp;

pub use self::log::LogMailer;
pub use self::resend::ResendMailer;
pub use self::smtp::SmtpMailer;
