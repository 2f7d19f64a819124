use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl<D: Database> Repository<D> {
    /// Commits an accepted bid: ledger insert and highest-bid cache update
    /// happen in one database transaction, with the cache write conditional
    /// on the amount still exceeding the stored one.
    pub async fn add_bid(&self, bid: entities::Bid) -> Result<entities::Bid, RestError> {
        self.db.add_bid(&bid).await?;
        Ok(bid)
    }
}
