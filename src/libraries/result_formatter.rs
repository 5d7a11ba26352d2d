use std::cmp::Ordering;

use crate::models::{Contact, Coordinate, Dealer, RawListing, WorkingHours};

/// Substrings that mark a listing as a car dealer (matched case-insensitively
/// against the name and category names).
pub const DEALER_KEYWORDS: [&str; 3] = ["авто", "car", "auto"];

pub const DEFAULT_DEALER_NAME: &str = "Car Dealership";
pub const DEFAULT_ADDRESS: &str = "Address not available";
pub const PHONE_PLACEHOLDER: &str = "Phone not available";

/// A listing with every optional field resolved. `name` stays empty when the
/// provider sent none, so keyword matching never sees the default name.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    pub id: Option<String>,
    pub name: String,
    pub categories: Vec<String>,
    pub address: String,
    pub phone: String,
    pub coordinate: Coordinate,
}

impl NormalizedListing {
    pub fn from_raw(raw: RawListing) -> Self {
        let categories = raw
            .rubrics
            .unwrap_or_default()
            .into_iter()
            .map(|rubric| rubric.name.unwrap_or_default())
            .collect();

        let point = raw.point.unwrap_or_default();

        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            categories,
            address: raw
                .address_name
                .filter(|address| !address.is_empty())
                .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            phone: resolve_phone(raw.contacts.as_deref().unwrap_or_default()),
            coordinate: Coordinate::new(point.lat.unwrap_or(0.0), point.lon.unwrap_or(0.0)),
        }
    }

    /// Name shown to users
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_DEALER_NAME
        } else {
            &self.name
        }
    }
}

/// Pick the first phone-type contact, then the first contact of any type.
pub fn resolve_phone(contacts: &[Contact]) -> String {
    let non_empty = |contact: &Contact| contact.value.clone().filter(|value| !value.is_empty());

    contacts
        .iter()
        .find(|contact| contact.kind.as_deref() == Some("phone"))
        .and_then(non_empty)
        .or_else(|| contacts.first().and_then(non_empty))
        .unwrap_or_else(|| PHONE_PLACEHOLDER.to_string())
}

/// Kilometers with one decimal place
pub fn format_distance(km: f64) -> String {
    format!("{:.1}", km)
}

/// Turns raw provider listings into dealers ordered by distance from the
/// search origin.
#[derive(Debug, Clone)]
pub struct ResultFormatter {
    keywords: Vec<String>,
    working_hours: WorkingHours,
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::with_keywords(DEALER_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            working_hours: WorkingHours::default(),
        }
    }

    pub fn format(&self, listings: Vec<RawListing>, origin: &Coordinate) -> Vec<Dealer> {
        let mut dealers: Vec<Dealer> = listings
            .into_iter()
            .map(NormalizedListing::from_raw)
            .filter(|listing| self.is_dealer(listing))
            .map(|listing| self.to_dealer(listing, origin))
            .collect();

        sort_by_distance(&mut dealers);
        dealers
    }

    pub fn is_dealer(&self, listing: &NormalizedListing) -> bool {
        let name = listing.name.to_lowercase();
        let categories = listing.categories.join(" ").to_lowercase();

        self.keywords
            .iter()
            .any(|keyword| name.contains(keyword.as_str()) || categories.contains(keyword.as_str()))
    }

    fn to_dealer(&self, listing: NormalizedListing, origin: &Coordinate) -> Dealer {
        let distance = origin.distance_to(&listing.coordinate);

        Dealer {
            name: listing.display_name().to_string(),
            address: listing.address,
            distance_km: format_distance(distance),
            working_hours: self.working_hours.clone(),
            coordinates: listing.coordinate,
            phone: listing.phone,
            id: listing.id,
        }
    }
}

/// Stable sort on the rounded distance, so dealers that round to the same
/// value keep their input order.
pub fn sort_by_distance(dealers: &mut [Dealer]) {
    dealers.sort_by(|a, b| {
        let a = a.distance_km.parse::<f64>().unwrap_or(f64::NAN);
        let b = b.distance_km.parse::<f64>().unwrap_or(f64::NAN);
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    });
}
