use {
    crate::{
        auction::AuctionStatus,
        AuctionId,
        BidAmount,
        BidId,
        UserId,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct Bid {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:          BidId,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id:  AuctionId,
    #[schema(value_type = String)]
    pub bidder:      UserId,
    #[schema(example = 250_000)]
    pub amount:      BidAmount,
    pub is_auto_bid: bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-05-02T10:30:00Z")]
    pub timestamp:   OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct BidCreate {
    #[schema(example = 250_000)]
    pub amount:      BidAmount,
    /// Whether the bid was placed by a standing order rather than by hand.
    /// Carried through the ledger; no escalation logic is attached to it.
    #[serde(default)]
    pub is_auto_bid: bool,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct BidResult {
    #[schema(example = "OK")]
    pub status: String,
    /// The id of the accepted bid.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:     BidId,
    #[schema(example = 250_000)]
    pub amount: BidAmount,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct UpdateBid {
    /// The new, higher amount for the bid.
    #[schema(example = 275_000)]
    pub amount: BidAmount,
}

/// One entry of a bidder's history, enriched with details of the parent
/// auction where they could be resolved.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct BidHistoryEntry {
    #[schema(value_type = String)]
    pub bid_id:           BidId,
    #[schema(value_type = String)]
    pub auction_id:       AuctionId,
    #[schema(example = 250_000)]
    pub amount:           BidAmount,
    pub is_auto_bid:      bool,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, example = "2026-05-02T10:30:00Z")]
    pub timestamp:        OffsetDateTime,
    pub auction_status:   Option<AuctionStatus>,
    pub property_title:   Option<String>,
    pub property_type:    Option<String>,
    #[schema(example = "https://images.example.com/villa-1.jpg")]
    pub property_image:   String,
}
