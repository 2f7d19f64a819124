use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::entities::{
            AuctionId,
            BidAmount,
            UserId,
        },
    },
    time::OffsetDateTime,
};

pub struct HandleBidInput {
    pub auction_id:  AuctionId,
    pub bidder:      UserId,
    pub amount:      BidAmount,
    pub is_auto_bid: bool,
}

impl<D: Database> Service<D> {
    /// Accepts or rejects a bid. Acceptance for one auction is serialized
    /// through the per-auction lock, so validation always runs against the
    /// latest committed highest bid; the conditional write in the repository
    /// backstops the same rule at the database.
    pub async fn handle_bid(&self, input: HandleBidInput) -> Result<entities::Bid, RestError> {
        let auction_lock = self.repo.get_or_create_auction_lock(input.auction_id).await;
        self.handle_bid_for_lock(input, auction_lock).await
    }

    async fn handle_bid_for_lock(
        &self,
        input: HandleBidInput,
        auction_lock: entities::AuctionLock,
    ) -> Result<entities::Bid, RestError> {
        let _lock = auction_lock.lock().await;
        let auction = self.repo.get_auction(input.auction_id).await?;
        self.verify_bid(&auction, input.amount, OffsetDateTime::now_utc())?;
        let bid = entities::Bid::new(
            input.auction_id,
            input.bidder,
            input.amount,
            input.is_auto_bid,
        );
        self.repo.add_bid(bid).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{
            super::{
                testing::{
                    active_auction,
                    FakeDatabase,
                },
                Service,
            },
            HandleBidInput,
        },
        crate::{
            api::RestError,
            auction::entities::AuctionStatus,
        },
        std::time::Duration,
        time::OffsetDateTime,
    };

    fn input(auction: &crate::auction::entities::Auction, bidder: &str, amount: i64) -> HandleBidInput {
        HandleBidInput {
            auction_id: auction.id,
            bidder: bidder.to_string(),
            amount,
            is_auto_bid: false,
        }
    }

    #[tokio::test]
    async fn test_first_bid_above_base_price_is_accepted() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let bid = service
            .handle_bid(input(&auction, "buyer-1", 1500))
            .await
            .unwrap();
        assert_eq!(bid.amount, 1500);
        assert_eq!(service.repo.db.highest_amount(auction.id), 1500);
        assert_eq!(service.repo.db.ledger(auction.id).len(), 1);
    }

    #[tokio::test]
    async fn test_lower_bid_is_rejected_and_leaves_no_trace() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        service
            .handle_bid(input(&auction, "buyer-1", 1500))
            .await
            .unwrap();
        let result = service.handle_bid(input(&auction, "buyer-2", 1200)).await;
        assert_eq!(result.unwrap_err(), RestError::BidTooLow);

        // The rejected bid must not appear in the ledger nor move the cache.
        assert_eq!(service.repo.db.highest_amount(auction.id), 1500);
        assert_eq!(service.repo.db.ledger(auction.id).len(), 1);
    }

    #[tokio::test]
    async fn test_bid_on_expired_auction_is_rejected() {
        let mut auction = active_auction(1000);
        auction.end_time = OffsetDateTime::now_utc() - time::Duration::minutes(5);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let result = service.handle_bid(input(&auction, "buyer-1", 2000)).await;
        assert_eq!(result.unwrap_err(), RestError::AuctionExpired);
        assert!(service.repo.db.ledger(auction.id).is_empty());
    }

    #[tokio::test]
    async fn test_bid_on_concluded_auction_is_rejected() {
        let mut auction = active_auction(1000);
        auction.status = AuctionStatus::Completed;
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let result = service.handle_bid(input(&auction, "buyer-1", 2000)).await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotActive);
    }

    #[tokio::test]
    async fn test_bid_on_unknown_auction_is_rejected() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::default());

        let result = service.handle_bid(input(&auction, "buyer-1", 2000)).await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotFound);
    }

    #[tokio::test]
    async fn test_concurrent_bids_are_serialized_per_auction() {
        let auction = active_auction(1000);
        let db = FakeDatabase {
            add_bid_delay: Some(Duration::from_millis(50)),
            ..FakeDatabase::default()
        };
        db.state
            .lock()
            .unwrap()
            .auctions
            .insert(auction.id, crate::auction::repository::Auction::new(&auction));
        let service = Service::new(db);

        // The lower bid enters first and is still being committed when the
        // higher one arrives; serialization accepts both in arrival order.
        let first = {
            let service = service.clone();
            let input = input(&auction, "buyer-1", 2000);
            tokio::spawn(async move { service.handle_bid(input).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = {
            let service = service.clone();
            let input = input(&auction, "buyer-2", 2500);
            tokio::spawn(async move { service.handle_bid(input).await })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let ledger = service.repo.db.ledger(auction.id);
        assert_eq!(
            ledger.iter().map(|bid| bid.amount).collect::<Vec<_>>(),
            vec![2000, 2500]
        );
        assert_eq!(service.repo.db.highest_amount(auction.id), 2500);
    }

    #[tokio::test]
    async fn test_bidder_may_overbid_themself() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        service
            .handle_bid(input(&auction, "buyer-1", 1500))
            .await
            .unwrap();
        service
            .handle_bid(input(&auction, "buyer-1", 1600))
            .await
            .unwrap();
        assert_eq!(service.repo.db.highest_amount(auction.id), 1600);
        assert_eq!(service.repo.db.ledger(auction.id).len(), 2);
    }
}
