use {
    super::Service,
    crate::{
        api::RestError,
        auction::repository::Database,
        kernel::{
            auth::Claims,
            entities::AuctionId,
        },
    },
};

pub struct DeleteAuctionInput {
    pub auction_id: AuctionId,
    pub claims:     Claims,
}

impl<D: Database> Service<D> {
    /// Permanently removes an auction and its ledger. Admin only; there is
    /// no soft delete.
    pub async fn delete_auction(&self, input: DeleteAuctionInput) -> Result<(), RestError> {
        if !input.claims.is_admin() {
            return Err(RestError::Forbidden);
        }
        let auction_lock = self.repo.get_or_create_auction_lock(input.auction_id).await;
        let result = {
            let _lock = auction_lock.lock().await;
            self.repo.delete_auction(input.auction_id).await
        };
        self.repo.remove_auction_lock(&input.auction_id).await;
        result
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
            DeleteAuctionInput,
        },
        crate::{
            api::RestError,
            kernel::auth::{
                Claims,
                Role,
            },
        },
    };

    #[tokio::test]
    async fn test_admin_can_delete_auction_with_its_ledger() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        service
            .delete_auction(DeleteAuctionInput {
                auction_id: auction.id,
                claims:     Claims {
                    uid:  "admin-1".to_string(),
                    role: Role::Admin,
                },
            })
            .await
            .unwrap();
        assert_eq!(
            service.get_auction_by_id(auction.id).await.unwrap_err(),
            RestError::AuctionNotFound
        );
    }

    #[tokio::test]
    async fn test_non_admin_cannot_delete() {
        let auction = active_auction(1000);
        let service = Service::new(FakeDatabase::with_auction(&auction));

        for role in [Role::Buyer, Role::Seller] {
            let result = service
                .delete_auction(DeleteAuctionInput {
                    auction_id: auction.id,
                    claims:     Claims {
                        uid: "seller-1".to_string(),
                        role,
                    },
                })
                .await;
            assert_eq!(result.unwrap_err(), RestError::Forbidden);
        }
    }
}
