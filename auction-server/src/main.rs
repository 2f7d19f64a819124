use {
    crate::{
        per_metrics::{
            is_metrics,
            MetricsLayer,
        },
        server::start_server,
    },
    anyhow::Result,
    clap::Parser,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter,
        filter::LevelFilter,
        layer::SubscriberExt,
        util::SubscriberInitExt,
        Layer,
    },
};

mod api;
mod auction;
mod config;
mod kernel;
mod per_metrics;
mod server;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    let registry = tracing_subscriber::registry()
        .with(MetricsLayer.with_filter(filter::filter_fn(|metadata| is_metrics(metadata, true))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal());
    let log_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let not_metrics = filter::filter_fn(|metadata| !is_metrics(metadata, false));

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    if std::io::stderr().is_terminal() {
        registry
            .with(
                fmt_layer
                    .compact()
                    .with_filter(not_metrics)
                    .with_filter(log_filter),
            )
            .init();
    } else {
        registry
            .with(
                fmt_layer
                    .json()
                    .with_filter(not_metrics)
                    .with_filter(log_filter),
            )
            .init();
    }

    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
