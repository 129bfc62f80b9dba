//! Screen flow state machine.
//!
//! Routes are a tagged union and every move between them is an explicit
//! [`Transition`]. The [`Navigator`] keeps the history stack the way a
//! native stack navigator does: `Push` adds a route, `Replace` swaps the
//! current one, `Back` pops.
//!
//! ```text
//!            sendOTP ok, isNewUser            verifyOTP ok
//!   Login ─────────────────────────► RegisterAndOtp ──────────┐
//!     │                                                       ▼ (replace)
//!     └──────────────────────────► VerifyOtp ───────────► RoleToggle
//!            sendOTP ok, returning             verifyOTP ok
//! ```

mod error;

pub use error::FlowError;

use crate::api::SendOtpPayload;

/// A screen in the sign-in flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Phone entry (initial)
    Login,
    /// Name, optional email and OTP for a new user
    RegisterAndOtp { phone: String },
    /// Six-slot OTP entry for a returning user
    VerifyOtp { phone: String },
    /// Buyer/seller forms (terminal)
    RoleToggle,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::RegisterAndOtp { .. } => "RegisterAndOtp",
            Route::VerifyOtp { .. } => "VerifyOtp",
            Route::RoleToggle => "RoleToggle",
        }
    }

    /// The phone number awaiting verification on this route
    pub fn pending_phone(&self) -> Option<&str> {
        match self {
            Route::RegisterAndOtp { phone } | Route::VerifyOtp { phone } => Some(phone),
            _ => None,
        }
    }

    /// Whether the user may leave this route by going back
    pub fn allows_back(&self) -> bool {
        !matches!(self, Route::RoleToggle)
    }
}

/// A move between routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Push(Route),
    Replace(Route),
    Back,
}

/// Where `sendOTP` success leads: registration for new users, OTP entry otherwise
pub fn after_otp_sent(phone: String, payload: &SendOtpPayload) -> Transition {
    if payload.is_new_user() {
        Transition::Push(Route::RegisterAndOtp { phone })
    } else {
        Transition::Push(Route::VerifyOtp { phone })
    }
}

/// Where a successful verification leads. History is replaced, not pushed.
pub fn after_verified() -> Transition {
    Transition::Replace(Route::RoleToggle)
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A blocking message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NoticeKind::Success)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NoticeKind::Info)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NoticeKind::Error)
    }
}

/// A transition plus an optional notice to show alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub transition: Transition,
    pub notice: Option<Notice>,
}

impl Navigation {
    pub fn to(transition: Transition) -> Self {
        Self {
            transition,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Route history
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start at [`Route::Login`]
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Login],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack is never empty: back() refuses to pop the last route
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn history(&self) -> &[Route] {
        &self.stack
    }

    /// Apply a transition. Returns `false` if it was refused.
    pub fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Push(route) => {
                self.stack.push(route);
                true
            }
            Transition::Replace(route) => {
                if let Some(last) = self.stack.last_mut() {
                    *last = route;
                }
                true
            }
            Transition::Back => {
                if self.stack.len() > 1 && self.current().allows_back() {
                    self.stack.pop();
                    true
                } else {
                    false
                }
            }
        }
    }
}
