//! Phone sign-in: OTP request, registration and verification.
//!
//! Every operation checks its inputs locally first and only calls the API
//! once they pass. Both verification paths finish through
//! [`AuthService::complete_sign_in`], which stores the issued tokens before
//! the flow moves on.

use crate::api::{MarketplaceApi, VerifyOtpInput, VerifyOtpPayload};
use crate::flow::{after_otp_sent, after_verified, FlowError, Navigation, Notice};
use crate::session::{save_session, Session, SessionStore};
use crate::utils::validation::{is_valid_email, is_valid_otp, is_valid_phone, normalize_phone};
use tracing::{error, info, warn};

/// What the new-user screen submits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub email: String,
    pub otp: String,
}

/// Notice texts for an email availability check
#[derive(Debug, Clone, Copy)]
pub struct EmailWording {
    pub unavailable_title: &'static str,
    pub unavailable_message: &'static str,
    pub failure_message: &'static str,
}

impl EmailWording {
    pub const REGISTRATION: EmailWording = EmailWording {
        unavailable_title: "Email Unavailable",
        unavailable_message: "Email already in use",
        failure_message: "Email verification failed",
    };

    pub const LISTING: EmailWording = EmailWording {
        unavailable_title: "Email already used",
        unavailable_message: "Try a different email",
        failure_message: "Failed to verify email",
    };
}

/// Service for the sign-in flow
pub struct AuthService;

impl AuthService {
    /// Request an OTP for `raw_phone`.
    ///
    /// On success the navigation carries the normalized phone number into
    /// either the registration or the OTP route.
    pub async fn request_otp(
        api: &dyn MarketplaceApi,
        raw_phone: &str,
        country_code: &str,
    ) -> Result<Navigation, FlowError> {
        if !is_valid_phone(raw_phone) {
            return Err(FlowError::invalid(
                "Invalid Phone",
                "Please enter a valid 10-digit phone number",
            ));
        }

        let phone = normalize_phone(raw_phone, country_code);
        info!("Requesting OTP for {}", mask_phone(&phone));

        let payload = match api.send_otp(&phone).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                warn!("sendOTP returned no payload");
                return Err(FlowError::rejected("Error", None, "No response from server."));
            }
            Err(e) => {
                error!("sendOTP failed: {}", e);
                return Err(FlowError::transport(e, "Network issue. Try again later."));
            }
        };

        if !payload.success {
            warn!("sendOTP refused: {:?}", payload.message);
            return Err(FlowError::rejected(
                "Error",
                payload.message.as_deref(),
                "Failed to send OTP",
            ));
        }

        info!(
            "OTP sent ({} user)",
            if payload.is_new_user() { "new" } else { "returning" }
        );
        Ok(Navigation::to(after_otp_sent(phone, &payload)))
    }

    /// Check that `email` is free for use.
    ///
    /// A missing answer counts as unavailable. `wording` supplies the
    /// notice texts, which differ between registration and listing.
    pub async fn check_email(
        api: &dyn MarketplaceApi,
        email: &str,
        wording: &EmailWording,
    ) -> Result<(), FlowError> {
        match api.verify_email(email).await {
            Ok(Some(result)) if result.available => Ok(()),
            Ok(result) => {
                info!("Email rejected by server");
                Err(FlowError::rejected(
                    wording.unavailable_title,
                    result.as_ref().and_then(|r| r.message.as_deref()),
                    wording.unavailable_message,
                ))
            }
            Err(e) => {
                error!("verifyEmailId failed: {}", e);
                Err(FlowError::transport(e, wording.failure_message))
            }
        }
    }

    /// Register a new user and verify the OTP in one submit
    pub async fn register_and_verify(
        api: &dyn MarketplaceApi,
        store: &dyn SessionStore,
        phone: &str,
        registration: &Registration,
    ) -> Result<Navigation, FlowError> {
        let first_name = registration.first_name.trim();
        if first_name.is_empty() {
            return Err(FlowError::invalid("Name required", "Please enter your name"));
        }

        let email = registration.email.trim();
        if !email.is_empty() {
            if !is_valid_email(email) {
                return Err(FlowError::invalid(
                    "Invalid Email",
                    "Please enter a valid email address",
                ));
            }
            Self::check_email(api, email, &EmailWording::REGISTRATION).await?;
        }

        if !is_valid_otp(&registration.otp) {
            return Err(FlowError::invalid("Invalid OTP", "Enter the OTP you received"));
        }

        let input = VerifyOtpInput {
            phone_number: phone.to_string(),
            otp: registration.otp.clone(),
            first_name: Some(first_name.to_string()),
        };

        let payload = Self::verify(api, &input, Refusal::Registration).await?;
        Self::complete_sign_in(store, &payload)?;

        Ok(Navigation::to(after_verified()))
    }

    /// Verify the OTP for a returning user
    pub async fn verify_otp(
        api: &dyn MarketplaceApi,
        store: &dyn SessionStore,
        phone: &str,
        code: &str,
    ) -> Result<Navigation, FlowError> {
        if !is_valid_otp(code) {
            return Err(FlowError::invalid("Invalid OTP", "Please enter a valid OTP"));
        }

        let input = VerifyOtpInput {
            phone_number: phone.to_string(),
            otp: code.to_string(),
            first_name: None,
        };

        let payload = Self::verify(api, &input, Refusal::ReturningUser).await?;
        Self::complete_sign_in(store, &payload)?;

        Ok(Navigation::to(after_verified())
            .with_notice(Notice::success("Success", "OTP verified successfully!")))
    }

    /// Persist the tokens from a successful verification.
    ///
    /// Shared by both verification paths.
    pub fn complete_sign_in(
        store: &dyn SessionStore,
        payload: &VerifyOtpPayload,
    ) -> Result<Session, FlowError> {
        let Some(session) = payload.session() else {
            warn!("verifyOTP succeeded without a full token set");
            return Err(FlowError::rejected(
                "Verification failed",
                None,
                "The server did not issue a session. Please try again.",
            ));
        };

        save_session(store, &session).map_err(|e| {
            error!("Failed to store session: {:#}", e);
            FlowError::local("Error", format!("Could not save your session: {e}"))
        })?;

        Ok(session)
    }

    async fn verify(
        api: &dyn MarketplaceApi,
        input: &VerifyOtpInput,
        refusal: Refusal,
    ) -> Result<VerifyOtpPayload, FlowError> {
        info!("Verifying OTP for {}", mask_phone(&input.phone_number));

        match api.verify_otp(input).await {
            Ok(Some(payload)) if payload.success => Ok(payload),
            Ok(payload) => {
                let server_message = payload.and_then(|p| p.message);
                warn!("verifyOTP refused: {:?}", server_message);
                Err(refusal.rejected(server_message.as_deref()))
            }
            Err(e) => {
                error!("verifyOTP failed: {}", e);
                Err(FlowError::transport(e, refusal.transport_fallback()))
            }
        }
    }
}

/// How a failed verification is reported on each path
#[derive(Debug, Clone, Copy)]
enum Refusal {
    /// New user: fixed message, the server text is not shown
    Registration,
    /// Returning user: the server message when there is one
    ReturningUser,
}

impl Refusal {
    fn rejected(self, server_message: Option<&str>) -> FlowError {
        match self {
            Refusal::Registration => {
                FlowError::rejected("Verification failed", None, "OTP verification failed")
            }
            Refusal::ReturningUser => {
                FlowError::rejected("Failed", server_message, "OTP verification failed")
            }
        }
    }

    fn transport_fallback(self) -> &'static str {
        match self {
            Refusal::Registration => "Verification failed",
            Refusal::ReturningUser => "Something went wrong",
        }
    }
}

/// Keep the last four digits of a phone number for logs
fn mask_phone(phone: &str) -> String {
    let count = phone.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = phone.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
