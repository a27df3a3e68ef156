/// Test utilities for running the adapter against an embedded PostgreSQL.
pub mod testing_postgres {
    use postgresql_embedded::{PostgreSQL, Settings};

    /// A running embedded PostgreSQL instance plus a pool config pointing
    /// at it.
    pub struct EmbeddedPostgres {
        pub postgres: PostgreSQL,
        pub config: deadpool_postgres::Config,
    }

    /// Set up an embedded PostgreSQL instance for testing.
    ///
    /// The instance is temporary; its data directory is removed when the
    /// handle is dropped. The returned config has dbname, host, port,
    /// user, and password filled in.
    pub async fn setup_postgres_embedded(
        dbname: &str,
    ) -> Result<EmbeddedPostgres, Box<dyn std::error::Error>> {
        let settings = Settings {
            temporary: true,
            ..Settings::default()
        };
        let mut postgres = PostgreSQL::new(settings);
        postgres.setup().await?;
        postgres.start().await?;
        postgres.create_database(dbname).await?;

        let settings = postgres.settings();
        let mut config = deadpool_postgres::Config::new();
        config.dbname = Some(dbname.to_string());
        config.host = Some(settings.host.clone());
        config.port = Some(settings.port);
        config.user = Some(settings.username.clone());
        config.password = Some(settings.password.clone());

        Ok(EmbeddedPostgres { postgres, config })
    }

    /// Stop a previously started embedded PostgreSQL instance.
    pub async fn stop_postgres_embedded(mut instance: EmbeddedPostgres) {
        let _ = instance.postgres.stop().await;
    }
}
