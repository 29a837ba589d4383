use serde::{Deserialize, Serialize};

pub const MERCHANT_NAME_MAX_LEN: usize = 25;
pub const MERCHANT_CITY_MAX_LEN: usize = 15;

pub const DEFAULT_MERCHANT_NAME: &str = "ROTI PAOLA";
pub const DEFAULT_MERCHANT_CITY: &str = "SAO PAULO";
pub const DEFAULT_TXID: &str = "***";

/// Branding defaults injected into the builder.
///
/// These are owned by configuration, not by the encoder: the builder reads
/// whatever it is handed, and `Default` carries the shop's branding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MerchantConfig {
    pub merchant_name: String,
    pub merchant_city: String,
    pub txid: String,
}

impl MerchantConfig {
    #[must_use]
    pub fn new(merchant_name: &str, merchant_city: &str, txid: &str) -> Self {
        Self {
            merchant_name: merchant_name.to_string(),
            merchant_city: merchant_city.to_string(),
            txid: txid.to_string(),
        }
    }
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MERCHANT_NAME, DEFAULT_MERCHANT_CITY, DEFAULT_TXID)
    }
}
