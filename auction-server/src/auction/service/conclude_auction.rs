use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::{
            auth::Claims,
            entities::AuctionId,
        },
    },
};

pub struct ConcludeAuctionInput {
    pub auction_id: AuctionId,
    pub claims:     Claims,
}

impl<D: Database> Service<D> {
    /// Closes an auction, fixing the winner as the highest accepted bid at
    /// that moment. Allowed for the selling user and for admins. Closing an
    /// already completed auction is a no-op that returns the stored state.
    pub async fn conclude_auction(
        &self,
        input: ConcludeAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction_lock = self.repo.get_or_create_auction_lock(input.auction_id).await;
        let result = self.conclude_auction_for_lock(&input, auction_lock).await;
        self.repo.remove_auction_lock(&input.auction_id).await;
        result
    }

    async fn conclude_auction_for_lock(
        &self,
        input: &ConcludeAuctionInput,
        auction_lock: entities::AuctionLock,
    ) -> Result<entities::Auction, RestError> {
        let _lock = auction_lock.lock().await;
        let auction = self.repo.get_auction(input.auction_id).await?;
        if !input.claims.is_admin() && input.claims.uid != auction.seller_id {
            return Err(RestError::Forbidden);
        }
        if auction.status == entities::AuctionStatus::Completed {
            return Ok(auction);
        }
        if !auction
            .status
            .can_transition_to(entities::AuctionStatus::Completed)
        {
            return Err(RestError::InvalidStatus(format!(
                "Cannot close an auction in status {}",
                auction.status
            )));
        }
        self.repo.conclude_auction(input.auction_id).await
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
            ConcludeAuctionInput,
        },
        crate::{
            api::RestError,
            auction::entities::AuctionStatus,
            kernel::auth::{
                Claims,
                Role,
            },
        },
    };

    fn claims(uid: &str, role: Role) -> Claims {
        Claims {
            uid: uid.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_seller_can_conclude_own_auction() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let concluded = service
            .conclude_auction(ConcludeAuctionInput {
                auction_id: auction.id,
                claims:     claims("seller-1", Role::Seller),
            })
            .await
            .unwrap();
        assert_eq!(concluded.status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_admin_can_conclude_any_auction() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let concluded = service
            .conclude_auction(ConcludeAuctionInput {
                auction_id: auction.id,
                claims:     claims("admin-1", Role::Admin),
            })
            .await
            .unwrap();
        assert_eq!(concluded.status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_other_users_cannot_conclude() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let result = service
            .conclude_auction(ConcludeAuctionInput {
                auction_id: auction.id,
                claims:     claims("buyer-1", Role::Buyer),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::Forbidden);
    }

    #[tokio::test]
    async fn test_concluding_twice_is_idempotent() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));
        let input = || ConcludeAuctionInput {
            auction_id: auction.id,
            claims:     claims("seller-1", Role::Seller),
        };

        service.conclude_auction(input()).await.unwrap();
        let again = service.conclude_auction(input()).await.unwrap();
        assert_eq!(again.status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_cancelled_auction_cannot_be_concluded() {
        let mut auction = active_auction(1000);
        auction.status = AuctionStatus::Cancelled;
        let service = Service::new(FakeDatabase::with_auction(&auction));

        let result = service
            .conclude_auction(ConcludeAuctionInput {
                auction_id: auction.id,
                claims:     claims("seller-1", Role::Seller),
            })
            .await;
        assert!(matches!(result, Err(RestError::InvalidStatus(_))));
    }
}
