use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::{
                self,
                AuctionFilter,
                Database,
                MockDatabase,
            },
        },
        kernel::entities::{
            AuctionId,
            BidAmount,
            BidId,
            PropertyId,
            UserId,
        },
    },
    axum::async_trait,
    std::{
        collections::HashMap,
        sync::Mutex,
        time::Duration,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub fn mock_service() -> Service<MockDatabase> {
    Service::new(MockDatabase::default())
}

pub fn active_auction(base_price: BidAmount) -> entities::Auction {
    entities::Auction::new(
        "seller-1".to_string(),
        Uuid::new_v4(),
        base_price,
        OffsetDateTime::now_utc() - time::Duration::hours(1),
        OffsetDateTime::now_utc() + time::Duration::hours(1),
        entities::PropertySnapshot {
            title: "Seaside villa".to_string(),
            property_type: "House".to_string(),
            ..Default::default()
        },
    )
}

pub fn property_fixture(id: PropertyId, seller_id: &str) -> repository::Property {
    repository::Property {
        id,
        seller_id: seller_id.to_string(),
        title: "Seaside villa".to_string(),
        description: "Villa with a garden".to_string(),
        property_type: "House".to_string(),
        size: sqlx::types::Json(entities::PropertySize {
            value: 120.0,
            unit:  "sqm".to_string(),
        }),
        address: sqlx::types::Json(entities::PropertyAddress::default()),
        images: sqlx::types::Json(vec![entities::PropertyImage {
            url:         "https://images.example.com/villa-1.jpg".to_string(),
            description: String::new(),
        }]),
        status: repository::PropertyStatus::Approved,
        creation_time: OffsetDateTime::now_utc(),
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub auctions:   HashMap<AuctionId, repository::Auction>,
    pub bids:       Vec<repository::Bid>,
    pub properties: HashMap<PropertyId, repository::Property>,
}

/// In-memory stand-in for Postgres with the same atomicity semantics as the
/// real implementation: every mutation happens under one state lock, and the
/// highest-bid write in `add_bid` is conditional.
#[derive(Debug, Default)]
pub struct FakeDatabase {
    pub state:         Mutex<FakeState>,
    /// Artificial latency injected into `add_bid`, used to widen race
    /// windows in concurrency tests.
    pub add_bid_delay: Option<Duration>,
}

impl FakeDatabase {
    pub fn with_auction(auction: &entities::Auction) -> Self {
        let db = Self::default();
        db.state
            .lock()
            .unwrap()
            .auctions
            .insert(auction.id, repository::Auction::new(auction));
        db
    }

    pub fn add_auction_sync(&self, auction: &entities::Auction) {
        self.state
            .lock()
            .unwrap()
            .auctions
            .insert(auction.id, repository::Auction::new(auction));
    }

    pub fn highest_amount(&self, auction_id: AuctionId) -> BidAmount {
        self.state.lock().unwrap().auctions[&auction_id].highest_amount
    }

    pub fn ledger(&self, auction_id: AuctionId) -> Vec<repository::Bid> {
        let mut bids: Vec<repository::Bid> = self
            .state
            .lock()
            .unwrap()
            .bids
            .iter()
            .filter(|bid| bid.auction_id == auction_id)
            .cloned()
            .collect();
        bids.sort_by_key(|bid| bid.placed_at);
        bids
    }

    fn recompute_highest(state: &mut FakeState, auction_id: AuctionId) {
        let top = state
            .bids
            .iter()
            .filter(|bid| bid.auction_id == auction_id)
            .max_by(|a, b| {
                a.amount
                    .cmp(&b.amount)
                    .then(b.placed_at.cmp(&a.placed_at))
            })
            .cloned();
        let auction = state.auctions.get_mut(&auction_id).expect("auction exists");
        match top {
            Some(bid) => {
                auction.highest_amount = auction.base_price.max(bid.amount);
                auction.highest_bidder = Some(bid.bidder_id);
                auction.highest_time = Some(bid.placed_at);
            }
            None => {
                auction.highest_amount = auction.base_price;
                auction.highest_bidder = None;
                auction.highest_time = None;
            }
        }
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError> {
        let mut state = self.state.lock().unwrap();
        state
            .auctions
            .insert(auction.id, repository::Auction::new(auction));
        if let Some(property) = state.properties.get_mut(&auction.property_id) {
            property.status = repository::PropertyStatus::InAuction;
        }
        Ok(())
    }

    async fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<repository::Auction, RestError> {
        self.state
            .lock()
            .unwrap()
            .auctions
            .get(&auction_id)
            .cloned()
            .ok_or(RestError::AuctionNotFound)
    }

    async fn get_auction_bids(
        &self,
        auction_id: AuctionId,
    ) -> Result<Vec<repository::Bid>, RestError> {
        Ok(self.ledger(auction_id))
    }

    async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<repository::Auction>, RestError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .auctions
            .values()
            .filter(|auction| {
                filter
                    .seller_id
                    .as_ref()
                    .map_or(true, |seller_id| auction.seller_id == *seller_id)
                    && filter.status.map_or(true, |status| {
                        auction.status == repository::AuctionStatus::from(status)
                    })
            })
            .cloned()
            .collect())
    }

    async fn set_auction_status(
        &self,
        auction_id: AuctionId,
        status: repository::AuctionStatus,
    ) -> Result<repository::Auction, RestError> {
        let mut state = self.state.lock().unwrap();
        let auction = state
            .auctions
            .get_mut(&auction_id)
            .ok_or(RestError::AuctionNotFound)?;
        auction.status = status;
        Ok(auction.clone())
    }

    async fn delete_auction(&self, auction_id: AuctionId) -> Result<(), RestError> {
        let mut state = self.state.lock().unwrap();
        state
            .auctions
            .remove(&auction_id)
            .ok_or(RestError::AuctionNotFound)?;
        state.bids.retain(|bid| bid.auction_id != auction_id);
        Ok(())
    }

    async fn add_bid(&self, bid: &entities::Bid) -> Result<(), RestError> {
        if let Some(delay) = self.add_bid_delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        let auction = state
            .auctions
            .get_mut(&bid.auction_id)
            .ok_or(RestError::AuctionNotFound)?;
        if auction.status != repository::AuctionStatus::Active
            || auction.highest_amount >= bid.amount
        {
            // Mirrors the conditional update: nothing is written.
            return Err(RestError::BidTooLow);
        }
        auction.highest_amount = bid.amount;
        auction.highest_bidder = Some(bid.bidder.clone());
        auction.highest_time = Some(bid.timestamp);
        state.bids.push(repository::Bid::new(bid));
        Ok(())
    }

    async fn get_bid(&self, bid_id: BidId) -> Result<repository::Bid, RestError> {
        self.state
            .lock()
            .unwrap()
            .bids
            .iter()
            .find(|bid| bid.id == bid_id)
            .cloned()
            .ok_or(RestError::BidNotFound)
    }

    async fn get_bids_by_bidder(
        &self,
        bidder_id: UserId,
    ) -> Result<Vec<repository::Bid>, RestError> {
        let mut bids: Vec<repository::Bid> = self
            .state
            .lock()
            .unwrap()
            .bids
            .iter()
            .filter(|bid| bid.bidder_id == bidder_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(bids)
    }

    async fn update_bid_amount(
        &self,
        bid_id: BidId,
        amount: BidAmount,
    ) -> Result<repository::Bid, RestError> {
        let mut state = self.state.lock().unwrap();
        let bid = state
            .bids
            .iter_mut()
            .find(|bid| bid.id == bid_id)
            .ok_or(RestError::BidNotFound)?;
        bid.amount = amount;
        let (bid, auction_id) = (bid.clone(), bid.auction_id);
        Self::recompute_highest(&mut state, auction_id);
        Ok(bid)
    }

    async fn remove_bid(&self, bid_id: BidId) -> Result<(), RestError> {
        let mut state = self.state.lock().unwrap();
        let auction_id = state
            .bids
            .iter()
            .find(|bid| bid.id == bid_id)
            .map(|bid| bid.auction_id)
            .ok_or(RestError::BidNotFound)?;
        state.bids.retain(|bid| bid.id != bid_id);
        Self::recompute_highest(&mut state, auction_id);
        Ok(())
    }

    async fn get_property(
        &self,
        property_id: PropertyId,
    ) -> Result<repository::Property, RestError> {
        self.state
            .lock()
            .unwrap()
            .properties
            .get(&property_id)
            .cloned()
            .ok_or(RestError::PropertyNotFound)
    }
}
