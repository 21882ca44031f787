use clap::Parser;

mod cli {
    use clap::{Parser, Subcommand};

    #[derive(Parser)]
    #[command(
        name = "dealership app manager",
        about = "Cli tool for managing state of the dealership app: postgres schema and the OEM catalog"
    )]
    pub(crate) struct Args {
        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Subcommand)]
    pub(crate) enum Command {
        Postgres {
            #[clap(subcommand)]
            cmd: PostgresCommand,
        },
        /// Clears and reseeds the OEM catalog
        SeedOem,
    }

    #[derive(Subcommand)]
    pub(crate) enum PostgresCommand {
        Migrate,
        RevertAll,
        Redo,
    }
}

mod postgres {
    use common::persistence::PG_POOL;
    use diesel_async::AsyncMigrationHarness;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/persistence/migrations");

    pub async fn migrate() {
        let conn = PG_POOL.get().await.expect("failed to get pg connection");
        let mut harness = AsyncMigrationHarness::new(conn);
        harness
            .run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");
    }

    pub async fn revert_all() {
        let conn = PG_POOL.get().await.expect("failed to get pg connection");
        let mut harness = AsyncMigrationHarness::new(conn);
        harness
            .revert_all_migrations(MIGRATIONS)
            .expect("failed to revert migrations");
    }

    pub async fn redo() {
        let conn = PG_POOL.get().await.expect("failed to get pg connection");
        let mut harness = AsyncMigrationHarness::new(conn);
        harness
            .revert_last_migration(MIGRATIONS)
            .expect("failed to revert last migration");
        harness
            .run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");
    }
}

mod seed {
    use common::persistence::PG_POOL;
    use common::persistence::models::NewOemSpec;
    use common::persistence::schema::oem_spec;
    use diesel_async::RunQueryDsl;
    use tracing::info;

    fn catalog() -> Vec<NewOemSpec> {
        vec![
            NewOemSpec {
                manufacturer: "Honda".to_string(),
                model_name: "City".to_string(),
                year: 2015,
                list_price: Some(800000.0),
                colors: vec!["White".to_string(), "Silver".to_string(), "Black".to_string()],
                mileage: Some("18 kmpl".to_string()),
                power_bhp: Some(118.0),
                max_speed: Some(180.0),
            },
            NewOemSpec {
                manufacturer: "Maruti".to_string(),
                model_name: "Swift".to_string(),
                year: 2017,
                list_price: Some(600000.0),
                colors: vec!["Red".to_string(), "White".to_string()],
                mileage: Some("22 kmpl".to_string()),
                power_bhp: Some(85.0),
                max_speed: Some(170.0),
            },
            NewOemSpec {
                manufacturer: "Maruti".to_string(),
                model_name: "Baleno".to_string(),
                year: 2018,
                list_price: Some(720000.0),
                colors: vec!["Blue".to_string(), "Silver".to_string()],
                mileage: Some("21.4 kmpl".to_string()),
                power_bhp: Some(82.0),
                max_speed: Some(180.0),
            },
            NewOemSpec {
                manufacturer: "Hyundai".to_string(),
                model_name: "i20".to_string(),
                year: 2016,
                list_price: Some(650000.0),
                colors: vec!["White".to_string(), "Grey".to_string()],
                mileage: Some("20.35 kmpl".to_string()),
                power_bhp: Some(81.0),
                max_speed: Some(175.0),
            },
            NewOemSpec {
                manufacturer: "Honda".to_string(),
                model_name: "Amaze".to_string(),
                year: 2019,
                list_price: Some(700000.0),
                colors: vec!["Red".to_string(), "Black".to_string()],
                mileage: Some("18.6 kmpl".to_string()),
                power_bhp: Some(89.0),
                max_speed: Some(172.0),
            },
            NewOemSpec {
                manufacturer: "Toyota".to_string(),
                model_name: "Innova".to_string(),
                year: 2014,
                list_price: Some(1100000.0),
                colors: vec!["Silver".to_string(), "White".to_string()],
                mileage: None,
                power_bhp: Some(139.0),
                max_speed: Some(165.0),
            },
        ]
    }

    pub async fn seed_oem() {
        let mut conn = PG_POOL.get().await.expect("failed to get pg connection");
        diesel::delete(oem_spec::table)
            .execute(&mut conn)
            .await
            .expect("failed to clear oem catalog");
        let k = diesel::insert_into(oem_spec::table)
            .values(&catalog())
            .execute(&mut conn)
            .await
            .expect("failed to insert oem catalog");
        info!("seeded `{k}` oem specs");
    }
}

#[tokio::main]
async fn main() {
    common::logging::setup_logging("manager");
    let args = cli::Args::parse();

    match args.command {
        cli::Command::Postgres { cmd } => match cmd {
            cli::PostgresCommand::Migrate => postgres::migrate().await,
            cli::PostgresCommand::RevertAll => postgres::revert_all().await,
            cli::PostgresCommand::Redo => postgres::redo().await,
        },
        cli::Command::SeedOem => seed::seed_oem().await,
    }
}
