use once_cell::sync::Lazy;
use secrecy::Secret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::time::Duration;
use uuid::Uuid;
use waitlist::configuration::{get_configuration, DatabaseSettings};
use waitlist::startup::{get_connection_pool, Application};
use waitlist::telemetry;
use waitlist::waitlist_store::PgEntryStore;

pub(crate) struct TestApp {
    pub(crate) address: String,
    pub(crate) db_pool: PgPool,
    pub(crate) admin_key: String,
    pub(crate) api_client: reqwest::Client,
}

impl TestApp {
    pub(crate) async fn post_waitlist(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/waitlist", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub(crate) async fn get_waitlist(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/waitlist", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub(crate) async fn get_stats(&self) -> serde_json::Value {
        let body: serde_json::Value = self
            .get_waitlist()
            .await
            .json()
            .await
            .expect("Failed to parse the stats body");
        body["stats"].clone()
    }

    pub(crate) async fn delete_waitlist(&self, query: &[(&str, &str)]) -> reqwest::Response {
        self.api_client
            .delete(&format!("{}/waitlist", &self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Direct access to what the application persisted, bypassing HTTP.
    pub(crate) fn store(&self) -> PgEntryStore {
        PgEntryStore::new(self.db_pool.clone(), Duration::from_secs(5))
    }
}

pub(crate) fn founder(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Jo Lin",
        "email": email,
        "company": "Acme",
        "role": "founder"
    })
}

pub(crate) fn lawyer(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Ann Li",
        "email": email,
        "firm": "Li & Co",
        "role": "lawyer"
    })
}

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // We cannot assign the output of `get_subscriber` to a variable based on the value TEST_LOG because
    // the sink is part of the type returned by `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    }
});

/// We are running tests, so it is not worth it to propagate errors: if we fail to perform the
/// required setup we can just panic and crash all the things.
pub(crate) async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed. All other invocations
    // will instead skip execution.
    Lazy::force(&TRACING);

    let admin_key = Uuid::new_v4().to_string();
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a different database for each test case, to preserve test isolation
        c.database.database_name = Uuid::new_v4().to_string();
        // Use a random OS port
        c.application.port = 0;
        c.application.admin_key = Secret::new(admin_key.clone());
        c
    };

    // Create the database; the application runs the migrations itself when it is built.
    configure_database(&configuration.database).await;

    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", application.port());

    // launch the server as a background task
    // tokio::spawn returns a handle to the spawned future, but we have no use for it here, hence the
    // non-binding let
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        db_pool: get_connection_pool(&configuration.database),
        admin_key,
        api_client: reqwest::Client::new(),
    }
}

/// The database is a gigantic global variable: all our tests are interacting with it and whatever
/// they leave behind will be available to other tests in the suite as well as to the following test
/// runs. We spin up a brand-new logical database for each integration test.
async fn configure_database(config: &DatabaseSettings) {
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database.");
}
