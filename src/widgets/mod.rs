// Reusable UI widgets

pub mod dialog;
pub mod otp_boxes;
pub mod text_input;

pub use dialog::Dialog;
pub use otp_boxes::OtpBoxes;
pub use text_input::{TextInputWidget, TextInputWidgetExt};
