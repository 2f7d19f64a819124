use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::{
                AuctionFilter,
                Database,
            },
        },
    },
};

impl<D: Database> Service<D> {
    pub async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError> {
        self.repo.get_auctions(filter).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::super::{
            testing::{
                active_auction,
                FakeDatabase,
            },
            Service,
        },
        crate::auction::{
            entities::AuctionStatus,
            repository::AuctionFilter,
        },
    };

    #[tokio::test]
    async fn test_get_auctions_filters_by_seller_and_status() {
        let mine = active_auction(1000);
        let mut concluded = active_auction(2000);
        concluded.status = AuctionStatus::Completed;
        let mut theirs = active_auction(3000);
        theirs.seller_id = "seller-2".to_string();

        let db = FakeDatabase::default();
        for auction in [&mine, &concluded, &theirs] {
            db.add_auction_sync(auction);
        }
        let service = Service::new(db);

        let all = service.get_auctions(AuctionFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let active_of_seller_1 = service
            .get_auctions(AuctionFilter {
                seller_id: Some("seller-1".to_string()),
                status:    Some(AuctionStatus::Active),
            })
            .await
            .unwrap();
        assert_eq!(active_of_seller_1.len(), 1);
        assert_eq!(active_of_seller_1[0].id, mine.id);
    }

    #[tokio::test]
    async fn test_listings_do_not_carry_bid_views() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));
        let listed = service.get_auctions(AuctionFilter::default()).await.unwrap();
        assert!(listed[0].bids.is_empty());
    }
}
