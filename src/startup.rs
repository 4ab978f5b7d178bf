use crate::configuration::{DatabaseSettings, Settings};
use crate::routes;
use crate::waitlist_service::WaitlistService;
use crate::waitlist_store::{EntryStore, PgEntryStore};
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// The pool connects lazily; acquiring a connection never waits longer than the store timeout.
pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(configuration.timeout())
        .connect_lazy_with(configuration.with_db())
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let store = PgEntryStore::new(connection_pool, configuration.database.timeout());
        // The waitlist starts out empty the very first time we run against a database.
        store.initialize().await?;

        let service = WaitlistService::new(store, configuration.application.admin_key);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        //Retrieve the port assigned to us by the OS
        let port = listener.local_addr()?.port();
        let server = run(listener, service)?;

        // We "save" the bound port in one of `Application`'s fields.
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that this function only returns when the application
    /// is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// actix-web spins up a worker per core, each running its own copy of the `App` built by the
/// closure. The service is wrapped in `web::Data` (an `Arc`) so that every worker shares the same
/// store and connection pool.
pub fn run<S>(listener: TcpListener, service: WaitlistService<S>) -> Result<Server, std::io::Error>
where
    S: EntryStore + Send + Sync + 'static,
{
    let service = web::Data::new(service);
    let server = HttpServer::new(move || {
        App::new()
            // Middlewares are added using the `wrap` method on `App`
            .wrap(TracingLogger::default())
            .app_data(routes::json_config())
            .route("/health_check", web::get().to(routes::health_check))
            .service(
                web::resource("/waitlist")
                    .route(web::post().to(routes::join_waitlist::<S>))
                    .route(web::get().to(routes::waitlist_stats::<S>))
                    .route(web::delete().to(routes::remove_from_waitlist::<S>)),
            )
            .app_data(service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
