use {
    crate::{
        kernel::auth::Claims,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    axum::{
        async_trait,
        extract::FromRequestParts,
        http::{
            request::Parts,
            StatusCode,
        },
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
        },
        Json,
        Router,
    },
    axum_extra::{
        headers::{
            authorization::Bearer,
            Authorization,
        },
        TypedHeader,
    },
    axum_prometheus::PrometheusMetricLayerBuilder,
    clap::crate_version,
    gavel_api_types::ErrorBodyResponse,
    std::sync::{
        atomic::Ordering,
        Arc,
    },
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

pub(crate) mod auction;
pub(crate) mod bid;

async fn root() -> String {
    format!("Gavel Auction Server API {}", crate_version!())
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[derive(Clone, Debug, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The auction was not found
    AuctionNotFound,
    /// The auction is not open for bidding
    AuctionNotActive,
    /// The auction's end time has passed
    AuctionExpired,
    /// The amount does not beat the current highest bid
    BidTooLow,
    /// The bid was not found
    BidNotFound,
    /// The property was not found
    PropertyNotFound,
    /// The requested lifecycle change is not allowed from the current status
    InvalidStatus(String),
    /// The bearer token was rejected by the identity provider
    InvalidToken,
    /// The request requires authentication
    Unauthorized,
    /// The authenticated user may not perform this action
    Forbidden,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::AuctionNotActive => (
                StatusCode::BAD_REQUEST,
                "Auction is not open for bidding".to_string(),
            ),
            RestError::AuctionExpired => {
                (StatusCode::BAD_REQUEST, "Auction has ended".to_string())
            }
            RestError::BidTooLow => (
                StatusCode::BAD_REQUEST,
                "Bid must be higher than the current highest bid".to_string(),
            ),
            RestError::BidNotFound => (
                StatusCode::NOT_FOUND,
                "Bid with the specified id was not found".to_string(),
            ),
            RestError::PropertyNotFound => (
                StatusCode::NOT_FOUND,
                "Property with the specified id was not found".to_string(),
            ),
            RestError::InvalidStatus(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid status: {}", msg))
            }
            RestError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            RestError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication is required".to_string(),
            ),
            RestError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not allowed to perform this action".to_string(),
            ),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

/// Outcome of bearer token extraction. Routes that allow anonymous access
/// take this as-is; the rest call `claims`.
pub enum Auth {
    Authorized(Claims),
    Unauthorized,
}

impl Auth {
    pub fn claims(&self) -> Result<&Claims, RestError> {
        match self {
            Auth::Authorized(claims) => Ok(claims),
            Auth::Unauthorized => Err(RestError::Unauthorized),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<Store>> for Auth {
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<Store>,
    ) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(token) => {
                let claims = state.token_verifier.verify_token(token.token()).await?;
                Ok(Auth::Authorized(claims))
            }
            Err(_) => Ok(Auth::Unauthorized),
        }
    }
}

pub async fn start_api(run_options: crate::config::RunOptions, store: Arc<Store>) -> Result<()> {
    // Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
    #[derive(OpenApi)]
    #[openapi(
    paths(
    auction::post_auction,
    auction::get_auctions,
    auction::get_auction,
    auction::post_auction_bid,
    auction::close_auction,
    auction::cancel_auction,
    auction::delete_auction,
    bid::get_bids,
    bid::get_bid,
    bid::patch_bid,
    bid::delete_bid,
    ),
    components(
    schemas(
    gavel_api_types::auction::Auction,
    gavel_api_types::auction::AuctionStatus,
    gavel_api_types::auction::SettlementStatus,
    gavel_api_types::auction::HighestBid,
    gavel_api_types::auction::PropertySnapshot,
    gavel_api_types::auction::PropertySize,
    gavel_api_types::auction::PropertyAddress,
    gavel_api_types::auction::PropertyImage,
    gavel_api_types::auction::CreateAuction,
    gavel_api_types::bid::Bid,
    gavel_api_types::bid::BidCreate,
    gavel_api_types::bid::BidResult,
    gavel_api_types::bid::UpdateBid,
    gavel_api_types::bid::BidHistoryEntry,
    ErrorBodyResponse,
    ),
    responses(
    ErrorBodyResponse,
    gavel_api_types::auction::Auction,
    gavel_api_types::bid::BidResult,
    ),
    ),
    tags(
    (name = "Gavel Auction Server", description = "The autonomous bidding engine of the marketplace. It runs \
    the auction lifecycle, validates incoming bids and serializes their acceptance per auction.")
    )
    )]
    struct ApiDoc;

    let auction_routes = Router::new()
        .route(
            "/",
            post(auction::post_auction).get(auction::get_auctions),
        )
        .route(
            "/:auction_id",
            get(auction::get_auction).delete(auction::delete_auction),
        )
        .route("/:auction_id/bids", post(auction::post_auction_bid))
        .route("/:auction_id/close", post(auction::close_auction))
        .route("/:auction_id/cancel", post(auction::cancel_auction));
    let bid_routes = Router::new().route("/", get(bid::get_bids)).route(
        "/:bid_id",
        get(bid::get_bid)
            .patch(bid::patch_bid)
            .delete(bid::delete_bid),
    );

    let v1_routes = Router::new().nest(
        "/v1",
        Router::new()
            .nest("/auctions", auction_routes)
            .nest("/bids", bid_routes),
    );

    let (prometheus_layer, _) = PrometheusMetricLayerBuilder::new()
        .with_metrics_from_fn(|| store.metrics_recorder.clone())
        .build_pair();

    let app: Router<()> = Router::new()
        .merge(Redoc::with_url("/docs", ApiDoc::openapi()))
        .merge(v1_routes)
        .route("/", get(root))
        .route("/live", get(live))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer)
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down RPC server...");
        })
        .await?;
    Ok(())
}
