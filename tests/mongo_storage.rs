use std::time::Duration;

use oauth2_mongo_storage::storage::{create_storage, CollectionConfig, MongoStorage, Storage};
use testcontainers::{core::IntoContainerPort, runners::AsyncRunner};
use testcontainers_modules::mongo::Mongo as TcMongo;

mod common;

async fn connect_with_retries(uri: &str) -> Result<MongoStorage, Box<dyn std::error::Error>> {
    let mut last_err: Option<String> = None;

    for _ in 0..30 {
        match MongoStorage::new(uri).await {
            Ok(s) => {
                if let Err(e) = s.healthcheck().await {
                    last_err = Some(e.to_string());
                } else {
                    return Ok(s);
                }
            }
            Err(e) => last_err = Some(e.to_string()),
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    Err(Box::new(std::io::Error::other(format!(
        "failed to connect to mongo testcontainer after retries: {}",
        last_err.unwrap_or_else(|| "unknown".to_string())
    ))))
}

// Contract tests for the MongoDB backend.
// Skips automatically unless RUN_TESTCONTAINERS=1 is set to avoid requiring Docker everywhere.
#[tokio::test]
async fn mongo_storage_contract() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("RUN_TESTCONTAINERS").as_deref() != Ok("1") {
        eprintln!("skipping mongo_storage test (set RUN_TESTCONTAINERS=1 to run)");
        return Ok(());
    }

    // NOTE: MongoDB starts quickly, but we still do a retry loop before asserting readiness.
    let node = TcMongo::default().start().await?;
    let host = node.get_host().await?;
    let port = node.get_host_port_ipv4(27017.tcp()).await?;

    let uri = format!("mongodb://{host}:{port}/oauth2_test");

    let storage = connect_with_retries(&uri).await?;
    storage.init().await.expect("mongo init should succeed");

    common::run_storage_contract(&storage).await
}

// Same contract through the factory, against renamed collections, to prove
// the configuration is honored end to end.
#[tokio::test]
async fn mongo_storage_contract_with_custom_collections(
) -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("RUN_TESTCONTAINERS").as_deref() != Ok("1") {
        eprintln!("skipping mongo_storage test (set RUN_TESTCONTAINERS=1 to run)");
        return Ok(());
    }

    let node = TcMongo::default().start().await?;
    let host = node.get_host().await?;
    let port = node.get_host_port_ipv4(27017.tcp()).await?;

    let uri = format!("mongodb://{host}:{port}/oauth2_test_custom");

    // Wait for readiness with a default-config handle first.
    connect_with_retries(&uri).await?;

    let config = CollectionConfig {
        authorization_codes: "grants_codes".to_string(),
        access_tokens: "grants_access".to_string(),
        refresh_tokens: "grants_refresh".to_string(),
        ..CollectionConfig::default()
    };

    let storage = create_storage(&uri, config).await?;
    storage.init().await.expect("mongo init should succeed");

    common::run_storage_contract(storage.as_ref()).await
}
