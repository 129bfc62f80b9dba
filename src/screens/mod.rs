//! Screen controllers for the application.
//!
//! One controller per route. Each owns its form state and implements
//! [`Screen`]; the app keeps exactly one alive for the current route.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      App                               │
//! │  ┌────────────────────────────────────────────────┐    │
//! │  │  Navigator (route stack)                       │    │
//! │  │  Login → RegisterAndOtp | VerifyOtp → RoleToggle│   │
//! │  └────────────────────────────────────────────────┘    │
//! │  ┌────────────────────────────────────────────────┐    │
//! │  │  Screen trait                                  │    │
//! │  │  - render(frame, area, context)                │    │
//! │  │  - handle_event(event, context) -> Action      │    │
//! │  │  - on_outcome(task outcome) -> Action          │    │
//! │  └────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod login;
pub mod otp;
pub mod register;
pub mod role_toggle;
pub mod screen_trait;

pub use login::LoginScreen;
pub use otp::OtpScreen;
pub use register::RegisterScreen;
pub use role_toggle::{Role, RoleToggleScreen};
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};

use crate::flow::Route;

/// A fresh controller for `route`
pub fn screen_for(route: &Route) -> Box<dyn Screen> {
    match route {
        Route::Login => Box::new(LoginScreen::new()),
        Route::RegisterAndOtp { phone } => Box::new(RegisterScreen::new(phone.clone())),
        Route::VerifyOtp { phone } => Box::new(OtpScreen::new(phone.clone())),
        Route::RoleToggle => Box::new(RoleToggleScreen::new()),
    }
}
