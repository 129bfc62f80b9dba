//! Form state shared by the screens: what the user has typed and how it
//! is validated before anything is sent.

pub mod buyer;
pub mod otp_entry;
pub mod seller;

pub use buyer::{BuyerField, BuyerForm};
pub use otp_entry::OtpEntry;
pub use seller::{ListingDraft, PhotoError, PhotoList, SellerField, SellerForm};
