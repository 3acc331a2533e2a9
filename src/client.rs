use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::classification::{inspect_response, AttemptOutcome};
use crate::config::Config;
use crate::datasets::{normalize_company_id, EntityType};
use crate::errors::BigDataError;
use crate::models::{LookupRequest, UsageRecord, UsageRequest, UsageResponse};

/// Client for the BigDataCorp people, companies and usage endpoints.
///
/// Requests are always issued one at a time; batch operations await every
/// lookup before starting the next.
#[derive(Clone)]
pub struct DatasetClient {
    client: Client,
    config: Config,
}

impl DatasetClient {
    /// Creates a new `DatasetClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints, token and retry policy. `max_attempts` must be
    ///   at least 1.
    pub fn new(config: Config) -> Result<Self, BigDataError> {
        if config.max_attempts == 0 {
            return Err(BigDataError::Configuration(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                BigDataError::Configuration(format!("Failed to create BigData client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn list_person_datasets(&self) -> &'static [&'static str] {
        EntityType::People.datasets()
    }

    pub fn list_company_datasets(&self) -> &'static [&'static str] {
        EntityType::Companies.datasets()
    }

    /// Fetches one dataset for a CPF.
    pub async fn get_person_dataset(
        &self,
        cpf: &str,
        dataset: &str,
    ) -> Result<Value, BigDataError> {
        self.get_dataset(EntityType::People, cpf, dataset).await
    }

    /// Fetches one dataset for a CNPJ. The document is sent as given.
    pub async fn get_company_dataset(
        &self,
        cnpj: &str,
        dataset: &str,
    ) -> Result<Value, BigDataError> {
        self.get_dataset(EntityType::Companies, cnpj, dataset).await
    }

    /// Fetches one dataset, retrying transport and parse failures.
    ///
    /// # Arguments
    ///
    /// * `entity` - Selects the endpoint and the dataset registry.
    /// * `document` - CPF or CNPJ, embedded in the `doc{...}` query.
    /// * `dataset` - Must belong to the entity's registry.
    ///
    /// # Returns
    ///
    /// * `Result<Value, BigDataError>` - The full response body when the
    ///   dataset status code is 0. Classified errors are returned on the
    ///   attempt that produced them; `MaxRetries` once every attempt failed.
    pub async fn get_dataset(
        &self,
        entity: EntityType,
        document: &str,
        dataset: &str,
    ) -> Result<Value, BigDataError> {
        if !entity.is_valid_dataset(dataset) {
            return Err(BigDataError::Configuration(format!(
                "dataset [{}] not available on bigboost for {}, available datasets:\n{}",
                dataset,
                entity.document_label().to_uppercase(),
                entity.datasets().join(", ")
            )));
        }

        let url = self.lookup_url(entity);
        let request = LookupRequest::new(document, dataset);
        tracing::debug!("BigData lookup URL: {}", url);

        let mut errors = Vec::new();
        for attempt in 1..=self.config.max_attempts {
            tracing::info!(
                "Fetching {} dataset '{}' (attempt {}/{})",
                entity,
                dataset,
                attempt,
                self.config.max_attempts
            );

            let outcome = match self.post_lookup(url, &request).await {
                Ok(body) => inspect_response(
                    body,
                    entity,
                    dataset,
                    document,
                    self.config.classification,
                ),
                Err(e) => AttemptOutcome::Retry(e),
            };

            match outcome {
                AttemptOutcome::Matched(body) => {
                    tracing::info!("✓ {} dataset '{}' fetched", entity, dataset);
                    return Ok(body);
                }
                AttemptOutcome::Rejected(err) => {
                    tracing::warn!("{} dataset '{}' rejected: {}", entity, dataset, err);
                    return Err(err);
                }
                AttemptOutcome::Retry(reason) => {
                    tracing::warn!("Error fetching BigData API: {}", reason);
                    errors.push(reason);
                }
            }

            if attempt < self.config.max_attempts && !self.config.retry_delay.is_zero() {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        tracing::error!(
            "{} dataset '{}' failed after {} attempts",
            entity,
            dataset,
            errors.len()
        );
        Err(BigDataError::MaxRetries(errors))
    }

    /// Fetches several datasets for a CPF, keyed by dataset name.
    ///
    /// Requests follow the order of `datasets`, but the returned map is sorted
    /// by dataset name, not by that order.
    /// Stops at the first error; no partial result is returned.
    pub async fn get_person_datasets<S: AsRef<str>>(
        &self,
        cpf: &str,
        datasets: &[S],
        verbose: bool,
    ) -> Result<BTreeMap<String, Value>, BigDataError> {
        self.get_datasets(EntityType::People, cpf, datasets, verbose)
            .await
    }

    /// Fetches several datasets for a CNPJ, keyed by dataset name.
    ///
    /// Requests follow the order of `datasets`, but the returned map is sorted
    /// by dataset name, not by that order.
    /// The CNPJ is normalized with [`normalize_company_id`] first.
    pub async fn get_company_datasets<S: AsRef<str>>(
        &self,
        cnpj: &str,
        datasets: &[S],
        verbose: bool,
    ) -> Result<BTreeMap<String, Value>, BigDataError> {
        let cnpj = normalize_company_id(cnpj);
        self.get_datasets(EntityType::Companies, &cnpj, datasets, verbose)
            .await
    }

    async fn get_datasets<S: AsRef<str>>(
        &self,
        entity: EntityType,
        document: &str,
        datasets: &[S],
        verbose: bool,
    ) -> Result<BTreeMap<String, Value>, BigDataError> {
        let mut results = BTreeMap::new();
        for dataset in datasets {
            let dataset = dataset.as_ref();
            if verbose {
                tracing::info!("Fetching dataset: {}", dataset);
            } else {
                tracing::debug!("Fetching dataset: {}", dataset);
            }
            let body = self.get_dataset(entity, document, dataset).await?;
            results.insert(dataset.to_string(), body);
        }
        Ok(results)
    }

    /// Usage figures for every known dataset between two dates.
    ///
    /// People datasets come first, then companies. A dataset whose query
    /// fails is logged and left out of the report.
    pub async fn get_usage(
        &self,
        initial_date: NaiveDate,
        final_date: NaiveDate,
    ) -> Vec<UsageRecord> {
        let mut records = Vec::new();

        for entity in [EntityType::People, EntityType::Companies] {
            for dataset in entity.datasets() {
                match self
                    .fetch_usage(initial_date, final_date, entity, dataset)
                    .await
                {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::error!(
                            "Failed to fetch usage for {} dataset '{}': {}",
                            entity,
                            dataset,
                            e
                        );
                    }
                }
            }
        }

        tracing::info!("Usage report built with {} records", records.len());
        records
    }

    async fn fetch_usage(
        &self,
        initial_date: NaiveDate,
        final_date: NaiveDate,
        entity: EntityType,
        dataset: &str,
    ) -> Result<UsageRecord, BigDataError> {
        let request = UsageRequest::new(initial_date, final_date, entity, dataset);

        let response = self
            .client
            .post(&self.config.usage_url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("AccessToken", &self.config.auth_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return Err(BigDataError::Http(format!(
                "Usage endpoint returned {}",
                status
            )));
        }

        if status != StatusCode::OK {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("Status")
                .and_then(|s| s.get("Message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Usage endpoint returned {}", status));
            return Err(BigDataError::Configuration(message));
        }

        let parsed: UsageResponse = response.json().await?;
        Ok(UsageRecord::from_usage(entity, dataset, parsed.usage_data))
    }

    async fn post_lookup(&self, url: &str, request: &LookupRequest) -> Result<Value, String> {
        let response = self
            .client
            .post(url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("AccessToken", &self.config.auth_token)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("BigData request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("BigData returned {}: {}", status, error_text));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse BigData response: {}", e))
    }

    fn lookup_url(&self, entity: EntityType) -> &str {
        match entity {
            EntityType::People => &self.config.people_url,
            EntityType::Companies => &self.config.companies_url,
        }
    }
}
