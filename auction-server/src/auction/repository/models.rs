#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::{
            db::DB,
            entities::{
                AuctionId,
                BidAmount,
                BidId,
                PropertyId,
                UserId,
            },
        },
    },
    axum::async_trait,
    sqlx::{
        types::Json,
        FromRow,
        Postgres,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::OffsetDateTime,
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Upcoming,
    Active,
    Extended,
    Completed,
    Cancelled,
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Upcoming => entities::AuctionStatus::Upcoming,
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Extended => entities::AuctionStatus::Extended,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
            AuctionStatus::Cancelled => entities::AuctionStatus::Cancelled,
        }
    }
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Upcoming => AuctionStatus::Upcoming,
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Extended => AuctionStatus::Extended,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
            entities::AuctionStatus::Cancelled => AuctionStatus::Cancelled,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "settlement_status", rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl From<SettlementStatus> for entities::SettlementStatus {
    fn from(status: SettlementStatus) -> Self {
        match status {
            SettlementStatus::Pending => entities::SettlementStatus::Pending,
            SettlementStatus::Completed => entities::SettlementStatus::Completed,
            SettlementStatus::Failed => entities::SettlementStatus::Failed,
            SettlementStatus::Refunded => entities::SettlementStatus::Refunded,
        }
    }
}

impl From<entities::SettlementStatus> for SettlementStatus {
    fn from(status: entities::SettlementStatus) -> Self {
        match status {
            entities::SettlementStatus::Pending => SettlementStatus::Pending,
            entities::SettlementStatus::Completed => SettlementStatus::Completed,
            entities::SettlementStatus::Failed => SettlementStatus::Failed,
            entities::SettlementStatus::Refunded => SettlementStatus::Refunded,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "property_status", rename_all = "snake_case")]
pub enum PropertyStatus {
    PendingApproval,
    Approved,
    InAuction,
    Sold,
    Delisted,
}

impl From<PropertyStatus> for entities::PropertyStatus {
    fn from(status: PropertyStatus) -> Self {
        match status {
            PropertyStatus::PendingApproval => entities::PropertyStatus::PendingApproval,
            PropertyStatus::Approved => entities::PropertyStatus::Approved,
            PropertyStatus::InAuction => entities::PropertyStatus::InAuction,
            PropertyStatus::Sold => entities::PropertyStatus::Sold,
            PropertyStatus::Delisted => entities::PropertyStatus::Delisted,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:                AuctionId,
    pub property_id:       PropertyId,
    pub seller_id:         String,
    pub base_price:        i64,
    pub start_time:        OffsetDateTime,
    pub end_time:          OffsetDateTime,
    pub status:            AuctionStatus,
    pub highest_amount:    i64,
    pub highest_bidder:    Option<String>,
    pub highest_time:      Option<OffsetDateTime>,
    pub settlement_status: SettlementStatus,
    pub property_details:  Json<entities::PropertySnapshot>,
    pub creation_time:     OffsetDateTime,
}

impl Auction {
    pub fn new(auction: &entities::Auction) -> Self {
        Self {
            id:                auction.id,
            property_id:       auction.property_id,
            seller_id:         auction.seller_id.clone(),
            base_price:        auction.base_price,
            start_time:        auction.start_time,
            end_time:          auction.end_time,
            status:            auction.status.into(),
            highest_amount:    auction.highest_bid.amount,
            highest_bidder:    auction.highest_bid.bidder.clone(),
            highest_time:      auction.highest_bid.timestamp,
            settlement_status: auction.settlement_status.into(),
            property_details:  Json(auction.property_details.clone()),
            creation_time:     auction.creation_time,
        }
    }

    pub fn get_entity(&self, bids: Vec<entities::Bid>) -> entities::Auction {
        entities::Auction {
            id:                self.id,
            property_id:       self.property_id,
            seller_id:         self.seller_id.clone(),
            base_price:        self.base_price,
            start_time:        self.start_time,
            end_time:          self.end_time,
            status:            self.status.into(),
            highest_bid:       entities::HighestBid {
                amount:    self.highest_amount,
                bidder:    self.highest_bidder.clone(),
                timestamp: self.highest_time,
            },
            settlement_status: self.settlement_status.into(),
            property_details:  self.property_details.0.clone(),
            bids,
            creation_time:     self.creation_time,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Bid {
    pub id:          BidId,
    pub auction_id:  AuctionId,
    pub bidder_id:   String,
    pub amount:      i64,
    pub is_auto_bid: bool,
    pub placed_at:   OffsetDateTime,
}

impl Bid {
    pub fn new(bid: &entities::Bid) -> Self {
        Self {
            id:          bid.id,
            auction_id:  bid.auction_id,
            bidder_id:   bid.bidder.clone(),
            amount:      bid.amount,
            is_auto_bid: bid.is_auto_bid,
            placed_at:   bid.timestamp,
        }
    }

    pub fn get_entity(&self) -> entities::Bid {
        entities::Bid {
            id:          self.id,
            auction_id:  self.auction_id,
            bidder:      self.bidder_id.clone(),
            amount:      self.amount,
            is_auto_bid: self.is_auto_bid,
            timestamp:   self.placed_at,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Property {
    pub id:            PropertyId,
    pub seller_id:     String,
    pub title:         String,
    pub description:   String,
    pub property_type: String,
    pub size:          Json<entities::PropertySize>,
    pub address:       Json<entities::PropertyAddress>,
    pub images:        Json<Vec<entities::PropertyImage>>,
    pub status:        PropertyStatus,
    pub creation_time: OffsetDateTime,
}

impl Property {
    pub fn get_entity(&self) -> entities::Property {
        entities::Property {
            id:            self.id,
            seller_id:     self.seller_id.clone(),
            title:         self.title.clone(),
            description:   self.description.clone(),
            property_type: self.property_type.clone(),
            size:          self.size.0.clone(),
            address:       self.address.0.clone(),
            images:        self.images.0.clone(),
            status:        self.status.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionFilter {
    pub seller_id: Option<UserId>,
    pub status:    Option<entities::AuctionStatus>,
}

/// Restores the highest-bid cache from the ledger inside the caller's
/// transaction. The cache never drops below the base price; ties go to the
/// earliest bid.
const RECOMPUTE_HIGHEST_BID_QUERY: &str = "UPDATE auction SET \
    highest_amount = GREATEST(base_price, COALESCE((SELECT MAX(amount) FROM bid WHERE auction_id = auction.id), base_price)), \
    highest_bidder = (SELECT bidder_id FROM bid WHERE auction_id = auction.id ORDER BY amount DESC, placed_at ASC LIMIT 1), \
    highest_time = (SELECT placed_at FROM bid WHERE auction_id = auction.id ORDER BY amount DESC, placed_at ASC LIMIT 1) \
    WHERE id = $1";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError>;
    async fn get_auction(&self, auction_id: AuctionId) -> Result<Auction, RestError>;
    async fn get_auction_bids(&self, auction_id: AuctionId) -> Result<Vec<Bid>, RestError>;
    async fn get_auctions(&self, filter: AuctionFilter) -> Result<Vec<Auction>, RestError>;
    async fn set_auction_status(
        &self,
        auction_id: AuctionId,
        status: AuctionStatus,
    ) -> Result<Auction, RestError>;
    async fn delete_auction(&self, auction_id: AuctionId) -> Result<(), RestError>;
    async fn add_bid(&self, bid: &entities::Bid) -> Result<(), RestError>;
    async fn get_bid(&self, bid_id: BidId) -> Result<Bid, RestError>;
    async fn get_bids_by_bidder(&self, bidder_id: UserId) -> Result<Vec<Bid>, RestError>;
    async fn update_bid_amount(&self, bid_id: BidId, amount: BidAmount) -> Result<Bid, RestError>;
    async fn remove_bid(&self, bid_id: BidId) -> Result<(), RestError>;
    async fn get_property(&self, property_id: PropertyId) -> Result<Property, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), RestError> {
        let model = Auction::new(auction);
        let mut tx = self.begin().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to begin add auction transaction");
            RestError::TemporarilyUnavailable
        })?;
        sqlx::query(
            "INSERT INTO auction (id, property_id, seller_id, base_price, start_time, end_time, status, highest_amount, highest_bidder, highest_time, settlement_status, property_details, creation_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(model.id)
        .bind(model.property_id)
        .bind(&model.seller_id)
        .bind(model.base_price)
        .bind(model.start_time)
        .bind(model.end_time)
        .bind(model.status)
        .bind(model.highest_amount)
        .bind(&model.highest_bidder)
        .bind(model.highest_time)
        .bind(model.settlement_status)
        .bind(&model.property_details)
        .bind(model.creation_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), auction_id = ?auction.id, "DB: Failed to insert auction");
            RestError::TemporarilyUnavailable
        })?;

        // The property carries its own status flag so at most one live
        // auction can reference it.
        sqlx::query("UPDATE property SET status = 'in_auction' WHERE id = $1")
            .bind(model.property_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), property_id = ?model.property_id, "DB: Failed to flag property as in auction");
                RestError::TemporarilyUnavailable
            })?;

        tx.commit().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to commit add auction transaction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auction(&self, auction_id: AuctionId) -> Result<Auction, RestError> {
        sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_one(self)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => RestError::AuctionNotFound,
                _ => {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        auction_id = auction_id.to_string(),
                        "DB: Failed to get auction"
                    );
                    RestError::TemporarilyUnavailable
                }
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction_bids",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction_bids",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auction_bids(&self, auction_id: AuctionId) -> Result<Vec<Bid>, RestError> {
        sqlx::query_as("SELECT * FROM bid WHERE auction_id = $1 ORDER BY placed_at ASC")
            .bind(auction_id)
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    auction_id = auction_id.to_string(),
                    "DB: Failed to get auction bids"
                );
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auctions(&self, filter: AuctionFilter) -> Result<Vec<Auction>, RestError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM auction WHERE true");
        if let Some(seller_id) = &filter.seller_id {
            query.push(" AND seller_id = ");
            query.push_bind(seller_id.clone());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(AuctionStatus::from(status));
        }
        query.push(" ORDER BY creation_time DESC");
        query
            .build_query_as()
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), filter = ?filter, "DB: Failed to get auctions");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_set_auction_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "set_auction_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn set_auction_status(
        &self,
        auction_id: AuctionId,
        status: AuctionStatus,
    ) -> Result<Auction, RestError> {
        sqlx::query_as("UPDATE auction SET status = $2 WHERE id = $1 RETURNING *")
            .bind(auction_id)
            .bind(status)
            .fetch_optional(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    auction_id = auction_id.to_string(),
                    "DB: Failed to set auction status"
                );
                RestError::TemporarilyUnavailable
            })?
            .ok_or(RestError::AuctionNotFound)
    }

    #[instrument(
        target = "metrics",
        name = "db_delete_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "delete_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn delete_auction(&self, auction_id: AuctionId) -> Result<(), RestError> {
        // Ledger rows go with the auction (ON DELETE CASCADE). Hard delete,
        // no archival.
        let result = sqlx::query("DELETE FROM auction WHERE id = $1")
            .bind(auction_id)
            .execute(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    auction_id = auction_id.to_string(),
                    "DB: Failed to delete auction"
                );
                RestError::TemporarilyUnavailable
            })?;
        if result.rows_affected() == 0 {
            return Err(RestError::AuctionNotFound);
        }
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_add_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_bid(&self, bid: &entities::Bid) -> Result<(), RestError> {
        let model = Bid::new(bid);
        let mut tx = self.begin().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to begin add bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        sqlx::query(
            "INSERT INTO bid (id, auction_id, bidder_id, amount, is_auto_bid, placed_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(model.id)
        .bind(model.auction_id)
        .bind(&model.bidder_id)
        .bind(model.amount)
        .bind(model.is_auto_bid)
        .bind(model.placed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), bid = ?bid, "DB: Failed to insert bid");
            RestError::TemporarilyUnavailable
        })?;

        // Conditional write: the cache only ever moves up, so a racing lower
        // bid can never clobber a higher accepted one.
        let result = sqlx::query(
            "UPDATE auction SET highest_amount = $2, highest_bidder = $3, highest_time = $4 \
             WHERE id = $1 AND status = 'active' AND highest_amount < $2",
        )
        .bind(model.auction_id)
        .bind(model.amount)
        .bind(&model.bidder_id)
        .bind(model.placed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), bid = ?bid, "DB: Failed to update highest bid");
            RestError::TemporarilyUnavailable
        })?;

        if result.rows_affected() == 0 {
            // Lost the race despite validation; dropping the transaction
            // rolls the ledger insert back.
            return Err(RestError::BidTooLow);
        }

        tx.commit().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to commit add bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_bid(&self, bid_id: BidId) -> Result<Bid, RestError> {
        sqlx::query_as("SELECT * FROM bid WHERE id = $1")
            .bind(bid_id)
            .fetch_one(self)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => RestError::BidNotFound,
                _ => {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        bid_id = bid_id.to_string(),
                        "DB: Failed to get bid"
                    );
                    RestError::TemporarilyUnavailable
                }
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_get_bids_by_bidder",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_bids_by_bidder",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_bids_by_bidder(&self, bidder_id: UserId) -> Result<Vec<Bid>, RestError> {
        sqlx::query_as("SELECT * FROM bid WHERE bidder_id = $1 ORDER BY placed_at DESC")
            .bind(bidder_id.clone())
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    bidder_id = bidder_id,
                    "DB: Failed to get bids by bidder"
                );
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_update_bid_amount",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_bid_amount",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_bid_amount(&self, bid_id: BidId, amount: BidAmount) -> Result<Bid, RestError> {
        let mut tx = self.begin().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to begin update bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        let bid: Bid = sqlx::query_as("UPDATE bid SET amount = $2 WHERE id = $1 RETURNING *")
            .bind(bid_id)
            .bind(amount)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    bid_id = bid_id.to_string(),
                    "DB: Failed to update bid amount"
                );
                RestError::TemporarilyUnavailable
            })?
            .ok_or(RestError::BidNotFound)?;

        sqlx::query(RECOMPUTE_HIGHEST_BID_QUERY)
            .bind(bid.auction_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), bid_id = bid_id.to_string(), "DB: Failed to recompute highest bid");
                RestError::TemporarilyUnavailable
            })?;

        tx.commit().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to commit update bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(bid)
    }

    #[instrument(
        target = "metrics",
        name = "db_remove_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "remove_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn remove_bid(&self, bid_id: BidId) -> Result<(), RestError> {
        let mut tx = self.begin().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to begin remove bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        let auction_id: Option<(AuctionId,)> =
            sqlx::query_as("DELETE FROM bid WHERE id = $1 RETURNING auction_id")
                .bind(bid_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        bid_id = bid_id.to_string(),
                        "DB: Failed to remove bid"
                    );
                    RestError::TemporarilyUnavailable
                })?;
        let (auction_id,) = auction_id.ok_or(RestError::BidNotFound)?;

        sqlx::query(RECOMPUTE_HIGHEST_BID_QUERY)
            .bind(auction_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), bid_id = bid_id.to_string(), "DB: Failed to recompute highest bid");
                RestError::TemporarilyUnavailable
            })?;

        tx.commit().await.map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(error = e.to_string(), "DB: Failed to commit remove bid transaction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_property",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_property",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_property(&self, property_id: PropertyId) -> Result<Property, RestError> {
        sqlx::query_as("SELECT * FROM property WHERE id = $1")
            .bind(property_id)
            .fetch_one(self)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => RestError::PropertyNotFound,
                _ => {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        property_id = property_id.to_string(),
                        "DB: Failed to get property"
                    );
                    RestError::TemporarilyUnavailable
                }
            })
    }
}
