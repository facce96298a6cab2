//! # freshguard-mailer
//!
//! Implementations of [`freshguard_core::traits::Dispatcher`]:
//!
//! - [`SmtpDispatcher`] sends multipart email through an SMTP relay
//! - [`LogDispatcher`] logs messages when email is disabled
//! - [`RecordingDispatcher`] keeps messages in memory and can be told to fail

pub mod log;
pub mod recording;
pub mod smtp;

pub use log::LogDispatcher;
pub use recording::RecordingDispatcher;
pub use smtp::SmtpDispatcher;
