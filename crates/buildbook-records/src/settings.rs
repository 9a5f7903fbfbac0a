//! Company-wide settings, stored as a singleton.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cis_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_vat_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cis_rate: Option<f64>,
    pub currency: String,
    pub date_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year_start: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            company_name: "My Construction Company".to_string(),
            company_address: None,
            company_phone: None,
            company_email: None,
            vat_number: None,
            cis_number: None,
            default_vat_rate: Some(20.0),
            default_cis_rate: Some(20.0),
            currency: "GBP".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
            fiscal_year_start: None,
        }
    }
}
