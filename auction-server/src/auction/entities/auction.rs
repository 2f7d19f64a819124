use {
    super::{
        bid::Bid,
        property::PropertySnapshot,
    },
    crate::kernel::entities::{
        AuctionId,
        BidAmount,
        PropertyId,
        UserId,
    },
    std::sync::Arc,
    time::OffsetDateTime,
    tokio::sync::Mutex,
    uuid::Uuid,
};

pub type AuctionLock = Arc<Mutex<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuctionStatus {
    Upcoming,
    Active,
    Extended,
    Completed,
    Cancelled,
}

impl AuctionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuctionStatus::Completed | AuctionStatus::Cancelled)
    }

    pub fn accepts_bids(&self) -> bool {
        matches!(self, AuctionStatus::Active)
    }

    /// Legal lifecycle transitions. Terminal states admit none; re-applying
    /// the current terminal status is treated as an idempotent no-op by the
    /// callers, not as a transition.
    pub fn can_transition_to(&self, next: AuctionStatus) -> bool {
        use AuctionStatus::*;
        matches!(
            (*self, next),
            (Upcoming, Active | Cancelled)
                | (Active, Extended | Completed | Cancelled)
                | (Extended, Completed | Cancelled)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// Denormalized pointer to the auction's maximum accepted bid, used for fast
/// validation without scanning history.
#[derive(Clone, Debug, PartialEq)]
pub struct HighestBid {
    pub amount:    BidAmount,
    pub bidder:    Option<UserId>,
    pub timestamp: Option<OffsetDateTime>,
}

impl HighestBid {
    /// Cache value of an auction without accepted bids. Seeding with the
    /// base price makes the validator's strict comparison enforce the first
    /// bid to exceed the base price.
    pub fn seed(base_price: BidAmount) -> Self {
        Self {
            amount:    base_price,
            bidder:    None,
            timestamp: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:                AuctionId,
    pub property_id:       PropertyId,
    pub seller_id:         UserId,
    pub base_price:        BidAmount,
    pub start_time:        OffsetDateTime,
    pub end_time:          OffsetDateTime,
    pub status:            AuctionStatus,
    pub highest_bid:       HighestBid,
    pub settlement_status: SettlementStatus,
    pub property_details:  PropertySnapshot,
    /// Derived view over the bid ledger, oldest first. Empty in listings.
    pub bids:              Vec<Bid>,
    pub creation_time:     OffsetDateTime,
}

impl Auction {
    pub fn new(
        seller_id: UserId,
        property_id: PropertyId,
        base_price: BidAmount,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
        property_details: PropertySnapshot,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            seller_id,
            base_price,
            start_time,
            end_time,
            status: AuctionStatus::Active,
            highest_bid: HighestBid::seed(base_price),
            settlement_status: SettlementStatus::Pending,
            property_details,
            bids: Vec::new(),
            creation_time: OffsetDateTime::now_utc(),
        }
    }

    /// Strictly after the end time; a bid placed exactly at `end_time` is
    /// still in time.
    pub fn has_ended(&self, now: OffsetDateTime) -> bool {
        now > self.end_time
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
    };

    #[test]
    fn test_terminal_states_admit_no_transition() {
        use AuctionStatus::*;
        for next in [Upcoming, Active, Extended, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_transition_table() {
        use AuctionStatus::*;
        assert!(Upcoming.can_transition_to(Active));
        assert!(Upcoming.can_transition_to(Cancelled));
        assert!(!Upcoming.can_transition_to(Completed));
        assert!(Active.can_transition_to(Extended));
        assert!(Active.can_transition_to(Completed));
        assert!(Active.can_transition_to(Cancelled));
        assert!(Extended.can_transition_to(Completed));
        assert!(Extended.can_transition_to(Cancelled));
        assert!(!Extended.can_transition_to(Active));
        assert!(!Active.can_transition_to(Upcoming));
    }

    #[test]
    fn test_only_active_accepts_bids() {
        use AuctionStatus::*;
        assert!(Active.accepts_bids());
        for status in [Upcoming, Extended, Completed, Cancelled] {
            assert!(!status.accepts_bids());
        }
    }

    #[test]
    fn test_end_time_is_inclusive() {
        let auction = Auction::new(
            "seller".to_string(),
            Uuid::new_v4(),
            1000,
            OffsetDateTime::now_utc(),
            OffsetDateTime::now_utc() + Duration::hours(1),
            PropertySnapshot::default(),
        );
        assert!(!auction.has_ended(auction.end_time));
        assert!(auction.has_ended(auction.end_time + Duration::seconds(1)));
    }

    #[test]
    fn test_new_auction_is_active_with_seeded_highest_bid() {
        let auction = Auction::new(
            "seller".to_string(),
            Uuid::new_v4(),
            1000,
            OffsetDateTime::now_utc(),
            OffsetDateTime::now_utc() + Duration::hours(1),
            PropertySnapshot::default(),
        );
        assert_eq!(auction.status, AuctionStatus::Active);
        assert_eq!(auction.highest_bid, HighestBid::seed(1000));
        assert!(auction.bids.is_empty());
        assert_eq!(auction.settlement_status, SettlementStatus::Pending);
    }
}
