use {
    crate::{
        AuctionId,
        BidAmount,
        PropertyId,
        UserId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

#[derive(
    Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug, AsRefStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuctionStatus {
    Upcoming,
    Active,
    Extended,
    Completed,
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct PropertySize {
    #[schema(example = 1200.0)]
    pub value: f64,
    #[schema(example = "sqft")]
    pub unit:  String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug, Default)]
pub struct PropertyAddress {
    pub address:  Option<String>,
    #[schema(example = "Lisbon")]
    pub city:     Option<String>,
    pub state:    Option<String>,
    #[schema(example = "Portugal")]
    pub country:  Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct PropertyImage {
    #[schema(example = "https://images.example.com/villa-1.jpg")]
    pub url:         String,
    #[serde(default)]
    pub description: String,
}

/// Immutable copy of the property listing taken when the auction is created.
///
/// Later edits to the live property do not affect it.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct PropertySnapshot {
    #[schema(example = "Seaside villa with garden")]
    pub title:         String,
    #[schema(example = "House")]
    pub property_type: String,
    pub size:          PropertySize,
    pub address:       PropertyAddress,
    pub images:        Vec<PropertyImage>,
}

/// The auction's current maximum accepted bid.
///
/// `bidder` and `timestamp` are empty until the first bid is accepted; the
/// amount then equals the auction's base price.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct HighestBid {
    #[schema(example = 250_000)]
    pub amount:    BidAmount,
    #[schema(value_type = Option<String>)]
    pub bidder:    Option<UserId>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, example = "2026-05-01T12:00:00Z")]
    pub timestamp: Option<OffsetDateTime>,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Auction {
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                AuctionId,
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub property_id:       PropertyId,
    #[schema(value_type = String)]
    pub seller_id:         UserId,
    #[schema(example = 200_000)]
    pub base_price:        BidAmount,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-05-01T12:00:00Z")]
    pub start_time:        OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-05-08T12:00:00Z")]
    pub end_time:          OffsetDateTime,
    pub status:            AuctionStatus,
    pub current_highest_bid: HighestBid,
    pub settlement_status: SettlementStatus,
    pub property_details:  PropertySnapshot,
    /// Bid history, oldest first. Empty in list responses.
    pub bids:              Vec<crate::bid::Bid>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-04-30T09:00:00Z")]
    pub creation_time:     OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct CreateAuction {
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub property_id: PropertyId,
    #[schema(example = 200_000)]
    pub base_price:  BidAmount,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-05-01T12:00:00Z")]
    pub start_time:  OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-05-08T12:00:00Z")]
    pub end_time:    OffsetDateTime,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug, Default)]
pub struct GetAuctionsQueryParams {
    /// Restrict the listing to one seller.
    #[param(value_type = Option<String>)]
    pub seller_id: Option<UserId>,
    /// Restrict the listing to one lifecycle status.
    #[param(value_type = Option<AuctionStatus>)]
    pub status:    Option<AuctionStatus>,
}
