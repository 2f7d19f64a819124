use {
    serde::{
        Deserialize,
        Serialize,
    },
    utoipa::{
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub mod auction;
pub mod bid;

pub type AuctionId = Uuid;
pub type BidId = Uuid;
pub type PropertyId = Uuid;

/// Opaque user id issued by the identity provider.
pub type UserId = String;

/// Monetary amount in the smallest currency unit.
pub type BidAmount = i64;

#[derive(ToResponse, ToSchema, Serialize, Deserialize, Clone, Debug)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}
