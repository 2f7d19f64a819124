use {
    super::auction::AuctionStatus,
    crate::kernel::entities::{
        AuctionId,
        BidAmount,
        BidId,
        UserId,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:          BidId,
    pub auction_id:  AuctionId,
    pub bidder:      UserId,
    pub amount:      BidAmount,
    pub is_auto_bid: bool,
    pub timestamp:   OffsetDateTime,
}

impl Bid {
    pub fn new(auction_id: AuctionId, bidder: UserId, amount: BidAmount, is_auto_bid: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            auction_id,
            bidder,
            amount,
            is_auto_bid,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// A bidder's history entry. The auction side is display enrichment only and
/// stays `None` when the parent auction could not be resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct BidHistoryEntry {
    pub bid:            Bid,
    pub auction_status: Option<AuctionStatus>,
    pub property_title: Option<String>,
    pub property_type:  Option<String>,
    pub property_image: Option<String>,
}
