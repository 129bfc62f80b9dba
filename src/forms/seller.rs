//! Seller listing form: field state, photos and submit validation.

use crate::api::{AddProductInput, GeoPoint};
use crate::flow::FlowError;
use crate::media::MediaAsset;
use crate::utils::text_input::TextInput;
use crate::utils::validation::{
    count_words, is_amount_char, photo_size_ok, within_word_limit, MAX_DESCRIPTION_WORDS,
};
use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};

/// How bid dates are typed and shown
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Location name sent when the field is left blank
pub const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SellerField {
    #[default]
    Name,
    Email,
    Photos,
    Description,
    Location,
    Price,
    BidStart,
    BidEnd,
}

impl SellerField {
    pub const ALL: [SellerField; 8] = [
        SellerField::Name,
        SellerField::Email,
        SellerField::Photos,
        SellerField::Description,
        SellerField::Location,
        SellerField::Price,
        SellerField::BidStart,
        SellerField::BidEnd,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SellerField::Name => "Product name",
            SellerField::Email => "Email (for verification)",
            SellerField::Photos => "Photo paths",
            SellerField::Description => "Description",
            SellerField::Location => "Location name",
            SellerField::Price => "Bid price (₹)",
            SellerField::BidStart => "Bid start",
            SellerField::BidEnd => "Bid end",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A photo was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoError {
    #[error("Photo too large: {uri} is {size} bytes")]
    TooLarge { uri: String, size: u64 },
}

/// Photos attached to a listing, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoList {
    items: Vec<MediaAsset>,
}

impl PhotoList {
    /// Append `asset` unless its reported size is over the cap
    pub fn add(&mut self, asset: MediaAsset) -> Result<(), PhotoError> {
        if !photo_size_ok(asset.size) {
            return Err(PhotoError::TooLarge {
                uri: asset.uri,
                size: asset.size.unwrap_or_default(),
            });
        }
        self.items.push(asset);
        Ok(())
    }

    /// Append every acceptable asset; returns the refusals
    pub fn add_all(&mut self, assets: impl IntoIterator<Item = MediaAsset>) -> Vec<PhotoError> {
        assets
            .into_iter()
            .filter_map(|asset| self.add(asset).err())
            .collect()
    }

    pub fn remove(&mut self, index: usize) -> Option<MediaAsset> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn remove_last(&mut self) -> Option<MediaAsset> {
        self.items.pop()
    }

    pub fn uris(&self) -> Vec<String> {
        self.items.iter().map(|a| a.uri.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaAsset> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A listing that passed local validation
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub expected_price: f64,
    pub bid_start: DateTime<Utc>,
    pub bid_end: DateTime<Utc>,
    pub image_urls: Vec<String>,
    pub description: String,
    pub location_name: String,
    /// Email to check for availability before posting
    pub email: Option<String>,
}

impl ListingDraft {
    /// Build the `addProduct` input for `user_id` at `location`
    pub fn to_input(&self, user_id: &str, location: GeoPoint) -> AddProductInput {
        AddProductInput {
            name: self.name.clone(),
            expected_price: self.expected_price,
            bid_start_date: self.bid_start.timestamp_millis(),
            bid_end_date: self.bid_end.timestamp_millis(),
            image_urls: self.image_urls.clone(),
            description_text: self.description.clone(),
            user_id: user_id.to_string(),
            location,
            location_name: self.location_name.clone(),
        }
    }
}

/// Parse a bid date typed as `YYYY-MM-DD HH:MM` (local time) or RFC 3339
pub fn parse_bid_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, DATE_FORMAT) {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The bidding window must end strictly after it starts
pub fn check_bid_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), FlowError> {
    if end <= start {
        return Err(FlowError::invalid(
            "Invalid end date",
            "End date must be after start date",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SellerForm {
    pub name: TextInput,
    pub email: TextInput,
    /// Comma-separated paths to add with the pick action
    pub photo_paths: TextInput,
    pub description: TextInput,
    pub location: TextInput,
    pub price: TextInput,
    pub bid_start: TextInput,
    pub bid_end: TextInput,
    pub photos: PhotoList,
    pub focus: SellerField,
}

impl Default for SellerForm {
    fn default() -> Self {
        Self::starting_at(Local::now())
    }
}

impl SellerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank form whose bidding window opens at `start` and lasts a day
    pub fn starting_at(start: DateTime<Local>) -> Self {
        let end = start + Duration::hours(24);
        Self {
            name: TextInput::new(),
            email: TextInput::new(),
            photo_paths: TextInput::new(),
            description: TextInput::new(),
            location: TextInput::new(),
            price: TextInput::new().with_filter(is_amount_char),
            bid_start: TextInput::with_text(start.format(DATE_FORMAT).to_string()),
            bid_end: TextInput::with_text(end.format(DATE_FORMAT).to_string()),
            photos: PhotoList::default(),
            focus: SellerField::Name,
        }
    }

    pub fn input(&self, field: SellerField) -> &TextInput {
        match field {
            SellerField::Name => &self.name,
            SellerField::Email => &self.email,
            SellerField::Photos => &self.photo_paths,
            SellerField::Description => &self.description,
            SellerField::Location => &self.location,
            SellerField::Price => &self.price,
            SellerField::BidStart => &self.bid_start,
            SellerField::BidEnd => &self.bid_end,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            SellerField::Name => &mut self.name,
            SellerField::Email => &mut self.email,
            SellerField::Photos => &mut self.photo_paths,
            SellerField::Description => &mut self.description,
            SellerField::Location => &mut self.location,
            SellerField::Price => &mut self.price,
            SellerField::BidStart => &mut self.bid_start,
            SellerField::BidEnd => &mut self.bid_end,
        }
    }

    /// Counter shown under the description
    pub fn word_count_label(&self) -> String {
        format!(
            "{}/{} words",
            count_words(self.description.text()),
            MAX_DESCRIPTION_WORDS
        )
    }

    /// Validate in submit order and produce the draft to post.
    ///
    /// Order: name, description present, description length, price,
    /// dates. The email is only carried along; its availability is a
    /// remote check made when posting.
    pub fn validate(&self) -> Result<ListingDraft, FlowError> {
        if self.name.is_empty() {
            return Err(FlowError::invalid("Error", "Product name is required"));
        }
        if self.description.is_empty() {
            return Err(FlowError::invalid("Error", "Description is required"));
        }
        if !within_word_limit(self.description.text()) {
            return Err(FlowError::invalid(
                "Error",
                "Description must be 100 words or less",
            ));
        }
        if self.price.is_empty() {
            return Err(FlowError::invalid("Error", "Bid price is required"));
        }
        let expected_price = self
            .price
            .text_trimmed()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FlowError::invalid("Error", "Bid price must be a number"))?;

        let (Some(bid_start), Some(bid_end)) = (
            parse_bid_date(self.bid_start.text()),
            parse_bid_date(self.bid_end.text()),
        ) else {
            return Err(FlowError::invalid(
                "Invalid date",
                "Enter bid dates as YYYY-MM-DD HH:MM",
            ));
        };
        check_bid_window(bid_start, bid_end)?;

        let location_name = if self.location.is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            self.location.text().to_string()
        };

        Ok(ListingDraft {
            name: self.name.text().to_string(),
            expected_price,
            bid_start,
            bid_end,
            image_urls: self.photos.uris(),
            description: self.description.text().to_string(),
            location_name,
            email: (!self.email.is_empty()).then(|| self.email.text_trimmed().to_string()),
        })
    }
}
