use {
    crate::{
        api::{
            bid::to_api_bid,
            Auth,
            RestError,
        },
        auction::{
            entities,
            repository::AuctionFilter,
            service::{
                add_auction::AddAuctionInput,
                cancel_auction::CancelAuctionInput,
                conclude_auction::ConcludeAuctionInput,
                delete_auction::DeleteAuctionInput,
                handle_bid::HandleBidInput,
            },
        },
        kernel::auth::Role,
        state::Store,
    },
    axum::{
        extract::{
            Path,
            Query,
            State,
        },
        Json,
    },
    gavel_api_types::{
        auction::{
            Auction,
            AuctionStatus,
            CreateAuction,
            GetAuctionsQueryParams,
            HighestBid,
            PropertyAddress,
            PropertyImage,
            PropertySize,
            PropertySnapshot,
            SettlementStatus,
        },
        bid::{
            BidCreate,
            BidResult,
        },
        AuctionId,
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

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

impl From<entities::PropertySnapshot> for PropertySnapshot {
    fn from(snapshot: entities::PropertySnapshot) -> Self {
        Self {
            title:         snapshot.title,
            property_type: snapshot.property_type,
            size:          PropertySize {
                value: snapshot.size.value,
                unit:  snapshot.size.unit,
            },
            address:       PropertyAddress {
                address:  snapshot.address.address,
                city:     snapshot.address.city,
                state:    snapshot.address.state,
                country:  snapshot.address.country,
                zip_code: snapshot.address.zip_code,
            },
            images:        snapshot
                .images
                .into_iter()
                .map(|image| PropertyImage {
                    url:         image.url,
                    description: image.description,
                })
                .collect(),
        }
    }
}

pub fn to_api_auction(auction: entities::Auction) -> Auction {
    Auction {
        id:                  auction.id,
        property_id:         auction.property_id,
        seller_id:           auction.seller_id,
        base_price:          auction.base_price,
        start_time:          auction.start_time,
        end_time:            auction.end_time,
        status:              auction.status.into(),
        current_highest_bid: HighestBid {
            amount:    auction.highest_bid.amount,
            bidder:    auction.highest_bid.bidder,
            timestamp: auction.highest_bid.timestamp,
        },
        settlement_status:   auction.settlement_status.into(),
        property_details:    auction.property_details.into(),
        bids:                auction.bids.into_iter().map(to_api_bid).collect(),
        creation_time:       auction.creation_time,
    }
}

/// Open an auction for one of your properties.
///
/// The property's current details are copied into the auction, and the
/// highest bid starts at the base price with no bidder attached.
#[utoipa::path(post, path = "/v1/auctions", request_body = CreateAuction,
    security(("bearerAuth" = [])),
    responses(
    (status = 200, description = "Auction was created successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Property was not found", body = ErrorBodyResponse),
),)]
pub async fn post_auction(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Json(params): Json<CreateAuction>,
) -> Result<Json<Auction>, RestError> {
    let claims = auth.claims()?;
    if claims.role != Role::Seller && !claims.is_admin() {
        return Err(RestError::Forbidden);
    }
    let auction = store
        .auction_service
        .add_auction(AddAuctionInput {
            seller_id:   claims.uid.clone(),
            property_id: params.property_id,
            base_price:  params.base_price,
            start_time:  params.start_time,
            end_time:    params.end_time,
        })
        .await?;
    Ok(Json(to_api_auction(auction)))
}

/// List auctions, optionally narrowed by seller or lifecycle status.
///
/// Listing entries do not carry bid histories.
#[utoipa::path(get, path = "/v1/auctions",
    params(GetAuctionsQueryParams),
    responses(
    (status = 200, description = "Auctions matching the filter", body = Vec<Auction>),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_auctions(
    State(store): State<Arc<Store>>,
    Query(params): Query<GetAuctionsQueryParams>,
) -> Result<Json<Vec<Auction>>, RestError> {
    let auctions = store
        .auction_service
        .get_auctions(AuctionFilter {
            seller_id: params.seller_id,
            status:    params.status.map(Into::into),
        })
        .await?;
    Ok(Json(auctions.into_iter().map(to_api_auction).collect()))
}

/// Query one auction together with its full bid history, oldest bid first.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}",
    params(("auction_id" = String, description = "Auction id to query for")),
    responses(
    (status = 200, description = "The auction with its bid history", body = Auction),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_auction(
    State(store): State<Arc<Store>>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Auction>, RestError> {
    let auction = store.auction_service.get_auction_by_id(auction_id).await?;
    Ok(Json(to_api_auction(auction)))
}

/// Place a bid on an auction.
///
/// The bid is accepted only if the auction is open for bidding and the
/// amount strictly exceeds the current highest bid; the first bid must
/// exceed the base price. Concurrent bids on one auction are processed one
/// at a time.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/bids",
    request_body = BidCreate,
    security(("bearerAuth" = [])),
    params(("auction_id" = String, description = "Auction id to bid on")),
    responses(
    (status = 200, description = "Bid was placed successfully", body = BidResult,
    example = json!({"status": "OK", "id": "beedbeed-b346-4fa1-8fab-2541a9e1872d", "amount": 250000})),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_auction_bid(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(auction_id): Path<AuctionId>,
    Json(params): Json<BidCreate>,
) -> Result<Json<BidResult>, RestError> {
    let claims = auth.claims()?;
    let bid = store
        .auction_service
        .handle_bid(HandleBidInput {
            auction_id,
            bidder: claims.uid.clone(),
            amount: params.amount,
            is_auto_bid: params.is_auto_bid,
        })
        .await?;
    Ok(Json(BidResult {
        status: "OK".to_string(),
        id:     bid.id,
        amount: bid.amount,
    }))
}

/// Close an auction, fixing the current highest bid as the winner.
///
/// Allowed for the auction's seller and for admins. Closing an already
/// completed auction returns the stored result unchanged.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/close",
    security(("bearerAuth" = [])),
    params(("auction_id" = String, description = "Auction id to close")),
    responses(
    (status = 200, description = "The concluded auction", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn close_auction(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Auction>, RestError> {
    let claims = auth.claims()?;
    let auction = store
        .auction_service
        .conclude_auction(ConcludeAuctionInput {
            auction_id,
            claims: claims.clone(),
        })
        .await?;
    Ok(Json(to_api_auction(auction)))
}

/// Void an auction without a winner. Admin only.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/cancel",
    security(("bearerAuth" = [])),
    params(("auction_id" = String, description = "Auction id to cancel")),
    responses(
    (status = 200, description = "The cancelled auction", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn cancel_auction(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Auction>, RestError> {
    let claims = auth.claims()?;
    let auction = store
        .auction_service
        .cancel_auction(CancelAuctionInput {
            auction_id,
            claims: claims.clone(),
        })
        .await?;
    Ok(Json(to_api_auction(auction)))
}

/// Permanently remove an auction and its bid history. Admin only.
#[utoipa::path(delete, path = "/v1/auctions/{auction_id}",
    security(("bearerAuth" = [])),
    params(("auction_id" = String, description = "Auction id to delete")),
    responses(
    (status = 200, description = "Auction was deleted"),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn delete_auction(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(auction_id): Path<AuctionId>,
) -> Result<(), RestError> {
    let claims = auth.claims()?;
    store
        .auction_service
        .delete_auction(DeleteAuctionInput {
            auction_id,
            claims: claims.clone(),
        })
        .await
}
