//! Dataset registries for person (CPF) and company (CNPJ) lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    People,
    Companies,
}

impl EntityType {
    /// Name used by the usage endpoint's `Api` field.
    pub fn api_name(self) -> &'static str {
        match self {
            EntityType::People => "people",
            EntityType::Companies => "companies",
        }
    }

    /// Label of the document type, used as the key in error payloads.
    pub fn document_label(self) -> &'static str {
        match self {
            EntityType::People => "cpf",
            EntityType::Companies => "cnpj",
        }
    }

    /// Valid dataset names for this entity type.
    pub fn datasets(self) -> &'static [&'static str] {
        match self {
            EntityType::People => PERSON_DATASETS,
            EntityType::Companies => COMPANY_DATASETS,
        }
    }

    pub fn is_valid_dataset(self, dataset: &str) -> bool {
        self.datasets().contains(&dataset)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Datasets available for CPF lookups.
pub static PERSON_DATASETS: &[&str] = &[
    "government_debtors",
    "election_candidate_data",
    "circles_college_class",
    "circles_coworkers",
    "circles_household",
    "circles_relatives",
    "circles_lawsuit_parties",
    "circles_partners",
    "circles_neighbors",
    "circles_building",
    "basic_data",
    "occupation_data",
    "electoral_donors",
    "related_people_emails",
    "addresses_extended",
    "related_people_addresses",
    "media_profile_and_exposure",
    "company_group_employed",
    "company_group_family_ownership",
    "company_group_sued",
    "company_group_ownership",
    "historical_basic_data",
    "financial_data",
    "demographic_data",
    "licenses_and_authorizations",
    "life_stages",
    "collections",
    "electoral_providers",
    "indebtedness_question",
    "processes",
    "first_level_relatives_lawsuit_data",
    "business_relationships",
    "related_people",
    "phones_extended",
    "related_people_phones",
    "vehicles",
];

/// Datasets available for CNPJ lookups.
pub static COMPANY_DATASETS: &[&str] = &[
    "partner_murabei_credit_score_company",
    "government_debtors",
    "syndicate_agreements",
    "investment_fund_data",
    "electoral_donors",
    "owners_electoral_donors",
    "company_evolution",
    "activity_indicators",
    "interests_and_behaviors",
    "licenses_and_authorizations",
    "financial_market",
    "electoral_providers",
    "industrial_property",
    "employees_industrial_property",
    "owners_industrial_property",
    "domains",
    "domains_extended",
    "emails_extended",
    "related_people_emails",
    "addresses_extended",
    "related_people_addresses",
    "phones_extended",
    "related_people_phones",
    "basic_data",
    "history_basic_data",
    "media_profile_and_exposure",
    "kyc_dtec_flex_news",
    "kyc",
    "economic_group_kyc",
    "employees_kyc",
    "owners_kyc",
    "online_ads",
    "marketplace_data",
    "apps_networks_and_platforms",
    "collections",
    "owners_lawsuits",
    "processes",
    "reputations_and_reviews",
    "social_conscience",
    "awards_and_certifications",
    "circles_employees",
    "circles_legal_representatives",
    "circles_first_level_owners",
    "economic_group_full_extended",
    "economic_group_first_level_extended",
    "economic_group_second_level_extended",
    "economic_group_third_level_extended",
    "company_group_household_activity",
    "company_group_rfcontact",
    "company_group_household",
    "company_group_tradename",
    "company_group_tradename_city",
    "company_group_building",
    "company_group_documentroot",
    "company_group_officialname",
    "company_group_legal_representative",
    "company_group_owners",
    "company_group_household_owners_surname",
    "relationships",
    "economic_group_relationships",
];

/// Strips the punctuation of a formatted CNPJ (`.`, `/`, `-`).
pub fn normalize_company_id(cnpj: &str) -> String {
    cnpj.chars()
        .filter(|c| !matches!(c, '.' | '/' | '-'))
        .collect()
}
