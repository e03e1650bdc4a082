use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::notification::Channel;

/// Settings written for every freshly registered store.
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("notifications_email_enabled", "true"),
    ("notifications_sms_enabled", "false"),
    ("notifications_whatsapp_enabled", "false"),
    ("currency", "INR"),
];

/// One row of the per-store key/value configuration bag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSetting {
    pub id: String,
    pub store_id: String,
    /// Key, unique within the store.
    pub key: String,
    /// String-encoded value; booleans are stored as "true"/"false".
    pub value: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Typed view over a store's settings bag.
///
/// Earlier deployments wrote camelCase keys (`emailNotificationsEnabled`,
/// `upiId`); those are honoured as fallbacks when the canonical snake_case
/// key is absent, so existing tenants keep working without a data migration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoreSettings {
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub whatsapp_enabled: bool,
    /// ISO 4217 currency code used on bills and payment links.
    pub currency: String,
    /// Virtual payment address embedded in UPI payment links.
    pub upi_id: Option<String>,
    /// Payee display name for UPI payment links; falls back to the store name.
    pub payee_name: Option<String>,
    /// Tenant override for the email From header.
    pub smtp_from: Option<String>,
    /// Tenant override for the SMS gateway endpoint.
    pub sms_gateway_url: Option<String>,
    /// Tenant override for the WhatsApp gateway endpoint.
    pub whatsapp_gateway_url: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::from_map(&HashMap::new())
    }
}

impl StoreSettings {
    /// Parse the raw key/value bag. A missing toggle counts as enabled; only
    /// the literal string "false" disables a channel.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            email_enabled: toggle(map, "notifications_email_enabled", "emailNotificationsEnabled"),
            sms_enabled: toggle(map, "notifications_sms_enabled", "smsNotificationsEnabled"),
            whatsapp_enabled: toggle(
                map,
                "notifications_whatsapp_enabled",
                "whatsappNotificationsEnabled",
            ),
            currency: lookup(map, "currency", "currencyCode")
                .unwrap_or("INR")
                .to_string(),
            upi_id: lookup(map, "upi_id", "upiId").map(str::to_string),
            payee_name: lookup(map, "payee_name", "payeeName").map(str::to_string),
            smtp_from: lookup(map, "smtp_from", "smtpFrom").map(str::to_string),
            sms_gateway_url: lookup(map, "sms_gateway_url", "smsGatewayUrl").map(str::to_string),
            whatsapp_gateway_url: lookup(map, "whatsapp_gateway_url", "whatsappGatewayUrl")
                .map(str::to_string),
        }
    }

    pub fn channel_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Sms => self.sms_enabled,
            Channel::Email => self.email_enabled,
            Channel::Whatsapp => self.whatsapp_enabled,
        }
    }
}

fn lookup<'a>(map: &'a HashMap<String, String>, key: &str, legacy: &str) -> Option<&'a str> {
    map.get(key)
        .or_else(|| map.get(legacy))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn toggle(map: &HashMap<String, String>, key: &str, legacy: &str) -> bool {
    lookup(map, key, legacy) != Some("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_toggles_count_as_enabled() {
        let settings = StoreSettings::from_map(&HashMap::new());
        assert!(settings.email_enabled);
        assert!(settings.sms_enabled);
        assert!(settings.whatsapp_enabled);
        assert_eq!(settings.currency, "INR");
        assert!(settings.upi_id.is_none());
    }

    #[test]
    fn only_the_literal_false_disables_a_channel() {
        let settings = StoreSettings::from_map(&map(&[
            ("notifications_sms_enabled", "false"),
            ("notifications_email_enabled", "yes"),
        ]));
        assert!(!settings.sms_enabled);
        assert!(settings.email_enabled);
        assert!(!settings.channel_enabled(Channel::Sms));
    }

    #[test]
    fn legacy_camel_case_keys_are_remapped() {
        let settings = StoreSettings::from_map(&map(&[
            ("emailNotificationsEnabled", "false"),
            ("upiId", "shop@upi"),
            ("payeeName", "Iron Press"),
        ]));
        assert!(!settings.email_enabled);
        assert_eq!(settings.upi_id.as_deref(), Some("shop@upi"));
        assert_eq!(settings.payee_name.as_deref(), Some("Iron Press"));
    }

    #[test]
    fn canonical_keys_win_over_legacy_ones() {
        let settings = StoreSettings::from_map(&map(&[
            ("notifications_email_enabled", "true"),
            ("emailNotificationsEnabled", "false"),
            ("upi_id", "new@upi"),
            ("upiId", "old@upi"),
        ]));
        assert!(settings.email_enabled);
        assert_eq!(settings.upi_id.as_deref(), Some("new@upi"));
    }
}
