
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Empty build-time variables count as unset.
fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Conversion tracking ids. Any id left unset turns its tracking call into a
/// no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsConfig {
    pub google_ads_id: Option<&'static str>,
    pub google_ads_lead_label: Option<&'static str>,
    pub meta_pixel_id: Option<&'static str>,
}

impl AnalyticsConfig {
    pub fn new(
        google_ads_id: Option<&'static str>,
        google_ads_lead_label: Option<&'static str>,
        meta_pixel_id: Option<&'static str>,
    ) -> Self {
        Self {
            google_ads_id: non_empty(google_ads_id),
            google_ads_lead_label: non_empty(google_ads_lead_label),
            meta_pixel_id: non_empty(meta_pixel_id),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            option_env!("GOOGLE_ADS_ID"),
            option_env!("GOOGLE_ADS_LEAD_LABEL"),
            option_env!("META_PIXEL_ID"),
        )
    }

    /// `send_to` value for the Google Ads lead conversion, when both halves
    /// are configured.
    pub fn google_send_to(&self) -> Option<String> {
        match (self.google_ads_id, self.google_ads_lead_label) {
            (Some(id), Some(label)) => Some(format!("{}/{}", id, label)),
            _ => None,
        }
    }
}

const DEFAULT_SALES_PHONE: &str = "+918049001234";

/// Contact details shown by the floating button and the footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub sales_phone: &'static str,
    pub whatsapp_number: &'static str,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let sales_phone = non_empty(option_env!("SALES_PHONE")).unwrap_or(DEFAULT_SALES_PHONE);
        Self {
            sales_phone,
            whatsapp_number: non_empty(option_env!("WHATSAPP_NUMBER")).unwrap_or(sales_phone),
        }
    }

    pub fn tel_link(&self) -> String {
        format!("tel:{}", self.sales_phone.replace(' ', ""))
    }

    pub fn whatsapp_link(&self, text: &str) -> String {
        let digits: String = self.whatsapp_number.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("https://wa.me/{}?text={}", digits, urlencoding::encode(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_disable_tracking() {
        let config = AnalyticsConfig::new(Some("  "), Some("abc"), None);
        assert_eq!(config.google_ads_id, None);
        assert_eq!(config.google_send_to(), None);
    }

    #[test]
    fn send_to_needs_id_and_label() {
        let config = AnalyticsConfig::new(Some("AW-123"), Some("lead_form"), Some("987"));
        assert_eq!(config.google_send_to().as_deref(), Some("AW-123/lead_form"));
        assert_eq!(config.meta_pixel_id, Some("987"));
    }

    #[test]
    fn whatsapp_link_strips_formatting() {
        let site = SiteConfig { sales_phone: "+91 80 4900 1234", whatsapp_number: "+91 80-4900-1234" };
        assert_eq!(
            site.whatsapp_link("Hi there"),
            "https://wa.me/918049001234?text=Hi%20there"
        );
        assert_eq!(site.tel_link(), "tel:+918049001234");
    }
}
