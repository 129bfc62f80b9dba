//! Posting auction listings.

use super::auth_service::{AuthService, EmailWording};
use crate::api::MarketplaceApi;
use crate::flow::{FlowError, Notice};
use crate::forms::ListingDraft;
use crate::location::LocationProvider;
use crate::session::{load_session, SessionStore};
use tracing::{error, info, warn};

/// Service for seller listings
pub struct ListingService;

impl ListingService {
    /// Post a validated listing.
    ///
    /// When the draft carries an email its availability is checked first.
    /// The seller id comes from the stored session and the coordinates
    /// from `location`.
    pub async fn submit(
        api: &dyn MarketplaceApi,
        store: &dyn SessionStore,
        location: &dyn LocationProvider,
        draft: &ListingDraft,
    ) -> Result<Notice, FlowError> {
        if let Some(email) = &draft.email {
            AuthService::check_email(api, email, &EmailWording::LISTING).await?;
        }

        let user_id = Self::seller_id(store)?;
        let Some(point) = location.current_location() else {
            warn!("No location available for listing");
            return Err(FlowError::local(
                "Location unavailable",
                "Set [location] lat and lng in the config file",
            ));
        };

        let input = draft.to_input(&user_id, point);
        info!(
            "Posting listing '{}' with {} photo(s)",
            input.name,
            input.image_urls.len()
        );

        match api.add_product(&input).await {
            Ok(Some(product)) => {
                info!("Product added: {}", product.product_id);
                Ok(Notice::success(
                    "Success",
                    format!("Product added! ID: {}", product.product_id),
                ))
            }
            Ok(None) => {
                warn!("addProduct returned no payload");
                Err(FlowError::rejected("Error", None, "Failed to add product"))
            }
            Err(e) => {
                error!("addProduct failed: {}", e);
                Err(FlowError::transport(e, "Something went wrong"))
            }
        }
    }

    /// The signed-in user's id
    fn seller_id(store: &dyn SessionStore) -> Result<String, FlowError> {
        let session = load_session(store).map_err(|e| {
            error!("Failed to read session: {:#}", e);
            FlowError::local("Error", format!("Could not read your session: {e}"))
        })?;

        session.and_then(|s| s.user_id()).ok_or_else(|| {
            FlowError::invalid(
                "Sign in required",
                "Your session has no user id. Sign in again to post a listing.",
            )
        })
    }
}
