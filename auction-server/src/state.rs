use {
    crate::{
        auction::service::Service,
        kernel::{
            auth::TokenVerifier,
            db::DB,
        },
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
    std::sync::Arc,
};

pub struct Store {
    pub auction_service:  Service<DB>,
    pub token_verifier:   Arc<dyn TokenVerifier>,
    pub metrics_recorder: PrometheusHandle,
}
