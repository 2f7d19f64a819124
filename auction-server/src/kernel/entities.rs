use uuid::Uuid;

pub type AuctionId = Uuid;
pub type BidId = Uuid;
pub type PropertyId = Uuid;

/// Opaque identity issued by the external identity provider. The server
/// trusts it as-is and never validates that the user exists.
pub type UserId = String;

/// Monetary amount in the smallest currency unit.
pub type BidAmount = i64;
