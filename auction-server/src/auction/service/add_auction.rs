use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::entities::{
            BidAmount,
            PropertyId,
            UserId,
        },
    },
    time::OffsetDateTime,
};

pub struct AddAuctionInput {
    pub seller_id:   UserId,
    pub property_id: PropertyId,
    pub base_price:  BidAmount,
    pub start_time:  OffsetDateTime,
    pub end_time:    OffsetDateTime,
}

impl<D: Database> Service<D> {
    /// Opens an auction for a property. The property's details are copied
    /// into the auction at this moment, so later edits to the listing do not
    /// rewrite auction history.
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        if input.base_price <= 0 {
            return Err(RestError::BadParameters(
                "Base price must be positive".to_string(),
            ));
        }
        if input.end_time <= input.start_time {
            return Err(RestError::BadParameters(
                "End time must be after start time".to_string(),
            ));
        }
        let property = self.repo.get_property(input.property_id).await?;
        let auction = entities::Auction::new(
            input.seller_id,
            input.property_id,
            input.base_price,
            input.start_time,
            input.end_time,
            property.snapshot(),
        );
        self.repo.add_auction(auction).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{
            super::{
                testing::{
                    property_fixture,
                    FakeDatabase,
                },
                Service,
            },
            AddAuctionInput,
        },
        crate::{
            api::RestError,
            auction::{
                entities,
                repository,
            },
        },
        time::{
            Duration,
            OffsetDateTime,
        },
        uuid::Uuid,
    };

    fn input(property_id: Uuid) -> AddAuctionInput {
        AddAuctionInput {
            seller_id: "seller-1".to_string(),
            property_id,
            base_price: 1000,
            start_time: OffsetDateTime::now_utc(),
            end_time: OffsetDateTime::now_utc() + Duration::days(7),
        }
    }

    #[tokio::test]
    async fn test_add_auction_snapshots_property_and_seeds_highest_bid() {
        let property_id = Uuid::new_v4();
        let db = FakeDatabase::default();
        db.state
            .lock()
            .unwrap()
            .properties
            .insert(property_id, property_fixture(property_id, "seller-1"));
        let service = Service::new(db);

        let auction = service.add_auction(input(property_id)).await.unwrap();
        assert_eq!(auction.status, entities::AuctionStatus::Active);
        assert_eq!(auction.highest_bid, entities::HighestBid::seed(1000));
        assert_eq!(auction.property_details.title, "Seaside villa");
        assert_eq!(
            service
                .repo
                .db
                .state
                .lock()
                .unwrap()
                .properties[&property_id]
                .status,
            repository::PropertyStatus::InAuction
        );
    }

    #[tokio::test]
    async fn test_add_auction_rejects_non_positive_base_price() {
        let service = Service::new(FakeDatabase::default());
        let result = service
            .add_auction(AddAuctionInput {
                base_price: 0,
                ..input(Uuid::new_v4())
            })
            .await;
        assert!(matches!(result, Err(RestError::BadParameters(_))));
    }

    #[tokio::test]
    async fn test_add_auction_rejects_inverted_time_window() {
        let service = Service::new(FakeDatabase::default());
        let now = OffsetDateTime::now_utc();
        let result = service
            .add_auction(AddAuctionInput {
                start_time: now,
                end_time: now - Duration::hours(1),
                ..input(Uuid::new_v4())
            })
            .await;
        assert!(matches!(result, Err(RestError::BadParameters(_))));
    }

    #[tokio::test]
    async fn test_add_auction_requires_existing_property() {
        let service = Service::new(FakeDatabase::default());
        let result = service.add_auction(input(Uuid::new_v4())).await;
        assert_eq!(result.unwrap_err(), RestError::PropertyNotFound);
    }
}
