//! Command-line front end for the BigDataCorp client.
//!
//! ```text
//! bigdatacorp datasets people|companies
//! bigdatacorp person <cpf> <dataset>...
//! bigdatacorp company <cnpj> <dataset>...
//! bigdatacorp usage <yyyy-mm-dd> <yyyy-mm-dd>
//! ```

use anyhow::Context;
use bigdatacorp_api::{BigDataError, Config, DatasetClient, EntityType};
use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage:
  bigdatacorp datasets people|companies
  bigdatacorp person <cpf> <dataset>...
  bigdatacorp company <cnpj> <dataset>...
  bigdatacorp usage <yyyy-mm-dd> <yyyy-mm-dd>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bigdatacorp_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str);

    if command == Some("datasets") {
        let entity = match args.get(1).map(String::as_str) {
            Some("people") => EntityType::People,
            Some("companies") => EntityType::Companies,
            _ => anyhow::bail!("{}", USAGE),
        };
        for dataset in entity.datasets() {
            println!("{}", dataset);
        }
        return Ok(());
    }

    let config = Config::from_env()?;
    let client = DatasetClient::new(config)?;

    match (command, &args[1.min(args.len())..]) {
        (Some("person"), [cpf, datasets @ ..]) if !datasets.is_empty() => {
            let result = client.get_person_datasets(cpf, datasets, true).await;
            print_lookup(result)
        }
        (Some("company"), [cnpj, datasets @ ..]) if !datasets.is_empty() => {
            let result = client.get_company_datasets(cnpj, datasets, true).await;
            print_lookup(result)
        }
        (Some("usage"), [initial, last]) => {
            let initial_date = parse_date(initial)?;
            let final_date = parse_date(last)?;
            let records = client.get_usage(initial_date, final_date).await;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        _ => anyhow::bail!("{}", USAGE),
    }
}

fn print_lookup<T: serde::Serialize>(result: Result<T, BigDataError>) -> anyhow::Result<()> {
    match result {
        Ok(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json())?);
            Err(e.into())
        }
    }
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected yyyy-mm-dd", value))
}
