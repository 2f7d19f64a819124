use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::entities::UserId,
    },
};

impl<D: Database> Service<D> {
    /// The caller's bid history, newest first, enriched with the parent
    /// auction's state for display. An auction that can no longer be
    /// resolved degrades that entry to the bare bid instead of failing the
    /// whole listing.
    pub async fn get_bids(
        &self,
        bidder_id: UserId,
    ) -> Result<Vec<entities::BidHistoryEntry>, RestError> {
        let bids = self.repo.get_bids_by_bidder(bidder_id).await?;
        let mut entries = Vec::with_capacity(bids.len());
        for bid in bids {
            let auction = self.repo.get_auction_digest(bid.auction_id).await.ok();
            entries.push(match auction {
                Some(auction) => entities::BidHistoryEntry {
                    auction_status: Some(auction.status),
                    property_title: Some(auction.property_details.title),
                    property_type:  Some(auction.property_details.property_type),
                    property_image: auction
                        .property_details
                        .images
                        .first()
                        .map(|image| image.url.clone()),
                    bid,
                },
                None => entities::BidHistoryEntry {
                    bid,
                    auction_status: None,
                    property_title: None,
                    property_type: None,
                    property_image: None,
                },
            });
        }
        Ok(entries)
    }
}
