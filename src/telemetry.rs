use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// # tracing-subscriber
/// `tracing-subscriber` introduces another key trait into the picture, `Layer`: it makes it possible
/// to build a *processing pipeline* for spans data instead of a single all encompassing subscriber.
///
/// The cornerstone of the layering approach is `Registry`. It does not record traces itself: it
/// collects and stores span data that is exposed to any layer wrapping it. Downstream layers
/// piggyback on it and focus on filtering (`EnvFilter`), storing span fields (`JsonStorageLayer`) and
/// formatting (`BunyanFormattingLayer`).
///
/// We are using `impl Subscriber` as return type to avoid having to spell out the actual type of the
/// returned subscriber, which is indeed quite complex. The sink is a parameter so that tests can
/// throw logs away.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // A higher-ranked trait bound: `Sink` implements `MakeWriter` for all choices of the lifetime
    // parameter `'a`.
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // We are falling back to printing all spans at info-level or above if the RUST_LOG environment
    // variable has not been set.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // Redirect all `log`'s events to our subscriber (sqlx and actix speak `log`).
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
