use {
    super::repository::{
        Database,
        Repository,
    },
    std::{
        ops::Deref,
        sync::Arc,
    },
};

pub mod add_auction;
pub mod cancel_auction;
pub mod conclude_auction;
pub mod delete_auction;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod get_bid;
pub mod get_bids;
pub mod handle_bid;
pub mod update_bid;
pub mod verification;
pub mod withdraw_bid;

#[cfg(test)]
pub mod testing;

pub struct ServiceInner<D: Database> {
    repo: Arc<Repository<D>>,
}

pub struct Service<D: Database>(Arc<ServiceInner<D>>);

impl<D: Database> Clone for Service<D> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<D: Database> Deref for Service<D> {
    type Target = ServiceInner<D>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<D: Database> Service<D> {
    pub fn new(db: D) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(Repository::new(db)),
        }))
    }
}
