//! JSON source of [`Listing`]s.

use derive_more::{Display, Error as StdError};
use serde::Deserialize;
use tracing as log;

use crate::domain::{listing, Listing};

/// Raw [`Listing`] record, as stored in the JSON source.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// ID of the [`Listing`].
    pub id: String,

    /// URL slug of the [`Listing`].
    pub slug: String,

    /// Title of the [`Listing`].
    pub title: String,

    /// Location of the [`Listing`].
    pub location: String,

    /// Price of the [`Listing`] in whole Kenyan Shillings.
    #[serde(rename = "priceKES")]
    pub price_kes: u64,

    /// Size of the [`Listing`] in acres.
    pub size_acres: String,

    /// Coordinates of the [`Listing`], if any.
    ///
    /// Kept raw, so malformed coordinates only hide the [`Listing`] from the
    /// map instead of rejecting the whole [`Record`].
    #[serde(default)]
    pub coords: Option<serde_json::Value>,

    /// Sale status of the [`Listing`].
    pub status: String,

    /// Image URLs of the [`Listing`].
    pub images: Vec<String>,

    /// Payment plan of the [`Listing`].
    pub payment_plan: RawPaymentPlan,

    /// Feature tags of the [`Listing`].
    #[serde(default)]
    pub features: Vec<String>,

    /// Amenity tags of the [`Listing`].
    #[serde(default)]
    pub amenities: Vec<String>,

    /// Short description of the [`Listing`].
    #[serde(default)]
    pub short_description: String,

    /// Long description of the [`Listing`].
    #[serde(default)]
    pub long_description: String,
}

/// Raw coordinates of a [`Record`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RawCoords {
    /// Latitude in degrees.
    pub lat: Option<f64>,

    /// Longitude in degrees.
    pub lng: Option<f64>,
}

/// Raw payment plan of a [`Record`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaymentPlan {
    /// Deposit in whole Kenyan Shillings.
    #[serde(rename = "depositKES")]
    pub deposit_kes: u64,

    /// Number of monthly installments.
    pub months: u16,
}

impl TryFrom<Record> for Listing {
    type Error = RecordError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let price =
            listing::Price::new(record.price_kes).ok_or(RecordError::Price)?;
        let months = listing::Months::new(record.payment_plan.months)
            .ok_or(RecordError::Months)?;

        Ok(Self {
            id: listing::Id::new(record.id).ok_or(RecordError::Id)?,
            slug: listing::Slug::new(record.slug).ok_or(RecordError::Slug)?,
            title: listing::Title::new(record.title)
                .ok_or(RecordError::Title)?,
            location: listing::Location::new(record.location)
                .ok_or(RecordError::Location)?,
            price,
            size: listing::SizeAcres::new(record.size_acres)
                .ok_or(RecordError::Size)?,
            coords: record
                .coords
                .and_then(|v| serde_json::from_value::<RawCoords>(v).ok())
                .and_then(|c| listing::Coords::new(c.lat?, c.lng?)),
            status: record
                .status
                .parse()
                .map_err(|_| RecordError::Status)?,
            images: listing::Images::new(record.images)
                .ok_or(RecordError::Images)?,
            payment_plan: listing::PaymentPlan::new(
                record.payment_plan.deposit_kes,
                months,
                price,
            )
            .ok_or(RecordError::Deposit)?,
            features: record.features,
            amenities: record.amenities,
            short_description: record.short_description,
            long_description: record.long_description,
        })
    }
}

/// Error of converting a [`Record`] into a [`Listing`].
#[derive(Debug, Display, StdError)]
pub enum RecordError {
    /// [`Record`] doesn't have the expected shape.
    #[display("malformed record: {_0}")]
    Malformed(serde_json::Error),

    /// `id` is empty or contains whitespace.
    #[display("invalid `id`")]
    Id,

    /// `slug` is empty or contains non-URL characters.
    #[display("invalid `slug`")]
    Slug,

    /// `title` is blank or untrimmed.
    #[display("invalid `title`")]
    Title,

    /// `location` is blank or untrimmed.
    #[display("invalid `location`")]
    Location,

    /// `priceKES` is zero.
    #[display("`priceKES` must be positive")]
    Price,

    /// `sizeAcres` is blank or untrimmed.
    #[display("invalid `sizeAcres`")]
    Size,

    /// `status` is neither `available` nor `sold`.
    #[display("unknown `status`")]
    Status,

    /// `images` is empty or contains a blank URL.
    #[display("`images` must be non-empty")]
    Images,

    /// `paymentPlan.months` is zero.
    #[display("`paymentPlan.months` must be positive")]
    Months,

    /// `paymentPlan.depositKES` exceeds `priceKES`.
    #[display("`paymentPlan.depositKES` exceeds `priceKES`")]
    Deposit,
}

/// Parses [`Listing`]s out of the provided JSON array.
///
/// Invalid records are skipped and logged, so a single broken record never
/// hides the rest.
///
/// # Errors
///
/// If the provided `json` is not an array.
pub fn parse(json: &[u8]) -> Result<Vec<Listing>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(json)?;

    let mut listings = Vec::with_capacity(values.len());
    for (n, value) in values.into_iter().enumerate() {
        let listing = serde_json::from_value::<Record>(value)
            .map_err(RecordError::Malformed)
            .and_then(Listing::try_from);
        match listing {
            Ok(l) => {
                if l.coords.is_none() {
                    log::warn!(
                        "listing `{}` has no valid `coords`, \
                         it won't appear on the map",
                        l.id,
                    );
                }
                listings.push(l);
            }
            Err(e) => log::error!("skipping listing record #{n}: {e}"),
        }
    }
    Ok(listings)
}
