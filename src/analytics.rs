use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::AnalyticsConfig;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window, js_name = gtag, catch)]
    fn gtag(command: &str, action: &str, params: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = window, js_name = fbq, catch)]
    fn fbq(command: &str, event: &str, params: JsValue) -> Result<(), JsValue>;
}

#[derive(Serialize, Clone, Debug, PartialEq)]
struct GoogleConversionParams {
    send_to: String,
    event_category: &'static str,
    event_label: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
struct MetaLeadParams {
    content_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrackingCall {
    GoogleAdsConversion { send_to: String, source_tag: String },
    MetaLead { source_tag: String },
}

/// The tracking calls a lead submission should make under `config`.
pub fn lead_conversion_calls(config: &AnalyticsConfig, source_tag: &str) -> Vec<TrackingCall> {
    let mut calls = Vec::new();
    if let Some(send_to) = config.google_send_to() {
        calls.push(TrackingCall::GoogleAdsConversion { send_to, source_tag: source_tag.to_string() });
    }
    if config.meta_pixel_id.is_some() {
        calls.push(TrackingCall::MetaLead { source_tag: source_tag.to_string() });
    }
    calls
}

fn dispatch(call: TrackingCall) -> Result<(), JsValue> {
    match call {
        TrackingCall::GoogleAdsConversion { send_to, source_tag } => {
            let params = GoogleConversionParams { send_to, event_category: "lead", event_label: source_tag };
            gtag("event", "conversion", serde_wasm_bindgen::to_value(&params)?)
        }
        TrackingCall::MetaLead { source_tag } => {
            let params = MetaLeadParams { content_name: source_tag };
            fbq("track", "Lead", serde_wasm_bindgen::to_value(&params)?)
        }
    }
}

/// Fire-and-forget; a missing tag script only gets logged.
pub fn track_lead_conversion(source_tag: &str) {
    let calls = lead_conversion_calls(&AnalyticsConfig::from_env(), source_tag);
    if calls.is_empty() {
        log::debug!("conversion tracking not configured, skipping {}", source_tag);
        return;
    }
    for call in calls {
        if let Err(e) = dispatch(call) {
            log::warn!("conversion tracking call failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_configured_means_no_calls() {
        assert!(lead_conversion_calls(&AnalyticsConfig::default(), "hero_form").is_empty());
    }

    #[test]
    fn google_needs_label_meta_needs_pixel() {
        let only_id = AnalyticsConfig::new(Some("AW-1"), None, None);
        assert!(lead_conversion_calls(&only_id, "x").is_empty());

        let both = AnalyticsConfig::new(Some("AW-1"), Some("lbl"), Some("42"));
        assert_eq!(
            lead_conversion_calls(&both, "price_popup"),
            vec![
                TrackingCall::GoogleAdsConversion { send_to: "AW-1/lbl".into(), source_tag: "price_popup".into() },
                TrackingCall::MetaLead { source_tag: "price_popup".into() },
            ]
        );
    }
}
