use {
    crate::{
        api::{
            Auth,
            RestError,
        },
        auction::{
            entities,
            service::{
                update_bid::UpdateBidInput,
                withdraw_bid::WithdrawBidInput,
            },
        },
        state::Store,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
    },
    gavel_api_types::{
        bid::{
            Bid,
            BidHistoryEntry,
            UpdateBid,
        },
        BidId,
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

const MISSING_IMAGE_URL: &str = "https://placehold.co/600x400";

pub fn to_api_bid(bid: entities::Bid) -> Bid {
    Bid {
        id:          bid.id,
        auction_id:  bid.auction_id,
        bidder:      bid.bidder,
        amount:      bid.amount,
        is_auto_bid: bid.is_auto_bid,
        timestamp:   bid.timestamp,
    }
}

fn to_api_history_entry(entry: entities::BidHistoryEntry) -> BidHistoryEntry {
    BidHistoryEntry {
        bid_id:         entry.bid.id,
        auction_id:     entry.bid.auction_id,
        amount:         entry.bid.amount,
        is_auto_bid:    entry.bid.is_auto_bid,
        timestamp:      entry.bid.timestamp,
        auction_status: entry.auction_status.map(Into::into),
        property_title: entry.property_title,
        property_type:  entry.property_type,
        property_image: entry
            .property_image
            .unwrap_or_else(|| MISSING_IMAGE_URL.to_string()),
    }
}

/// Your bid history across all auctions, newest first.
///
/// Each entry carries the parent auction's current status and property
/// details where the auction still exists.
#[utoipa::path(get, path = "/v1/bids",
    security(("bearerAuth" = [])),
    responses(
    (status = 200, description = "The caller's bids", body = Vec<BidHistoryEntry>),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn get_bids(
    State(store): State<Arc<Store>>,
    auth: Auth,
) -> Result<Json<Vec<BidHistoryEntry>>, RestError> {
    let claims = auth.claims()?;
    let entries = store.auction_service.get_bids(claims.uid.clone()).await?;
    Ok(Json(
        entries.into_iter().map(to_api_history_entry).collect(),
    ))
}

/// Query one of your bids.
#[utoipa::path(get, path = "/v1/bids/{bid_id}",
    security(("bearerAuth" = [])),
    params(("bid_id" = String, description = "Bid id to query for")),
    responses(
    (status = 200, description = "The bid", body = Bid),
    (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
),)]
pub async fn get_bid(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(bid_id): Path<BidId>,
) -> Result<Json<Bid>, RestError> {
    let claims = auth.claims()?;
    let bid = store.auction_service.get_bid(bid_id, claims).await?;
    Ok(Json(to_api_bid(bid)))
}

/// Amend one of your bids to a new amount.
///
/// The new amount is validated like a fresh bid, so it must still beat the
/// auction's current highest bid.
#[utoipa::path(patch, path = "/v1/bids/{bid_id}", request_body = UpdateBid,
    security(("bearerAuth" = [])),
    params(("bid_id" = String, description = "Bid id to amend")),
    responses(
    (status = 200, description = "The amended bid", body = Bid),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
),)]
pub async fn patch_bid(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(bid_id): Path<BidId>,
    Json(params): Json<UpdateBid>,
) -> Result<Json<Bid>, RestError> {
    let claims = auth.claims()?;
    let bid = store
        .auction_service
        .update_bid(UpdateBidInput {
            bid_id,
            amount: params.amount,
            claims: claims.clone(),
        })
        .await?;
    Ok(Json(to_api_bid(bid)))
}

/// Withdraw one of your bids.
///
/// If the bid held the highest position, the auction's highest bid falls
/// back to the next best remaining one.
#[utoipa::path(delete, path = "/v1/bids/{bid_id}",
    security(("bearerAuth" = [])),
    params(("bid_id" = String, description = "Bid id to withdraw")),
    responses(
    (status = 200, description = "Bid was withdrawn"),
    (status = 404, description = "Bid was not found", body = ErrorBodyResponse),
),)]
pub async fn delete_bid(
    State(store): State<Arc<Store>>,
    auth: Auth,
    Path(bid_id): Path<BidId>,
) -> Result<(), RestError> {
    let claims = auth.claims()?;
    store
        .auction_service
        .withdraw_bid(WithdrawBidInput {
            bid_id,
            claims: claims.clone(),
        })
        .await
}
