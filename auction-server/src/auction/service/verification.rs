use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::entities::BidAmount,
    },
    time::OffsetDateTime,
};

impl<D: Database> Service<D> {
    /// Decides whether a proposed amount may be accepted against the given
    /// auction snapshot. Rules, in order: the amount must be positive, the
    /// auction must be in a bidding state, the end time must not have
    /// passed, and the amount must strictly exceed the highest-bid cache.
    /// Ties are rejected; since the cache is seeded with the base price, the
    /// first bid must strictly exceed it.
    ///
    /// There is no upper bound, no increment step, and no self-outbid
    /// protection: a bidder may overbid themself.
    pub fn verify_bid(
        &self,
        auction: &entities::Auction,
        amount: BidAmount,
        now: OffsetDateTime,
    ) -> Result<(), RestError> {
        if amount <= 0 {
            return Err(RestError::BadParameters(
                "Bid amount must be positive".to_string(),
            ));
        }
        if !auction.status.accepts_bids() {
            return Err(RestError::AuctionNotActive);
        }
        if auction.has_ended(now) {
            return Err(RestError::AuctionExpired);
        }
        if amount <= auction.highest_bid.amount {
            return Err(RestError::BidTooLow);
        }
        Ok(())
    }
}
