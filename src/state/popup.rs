//! Lead capture popup arbitration.
//!
//! Several independent triggers compete for one modal slot: the 30 second
//! timer and desktop exit intent (passive), and the brochure / price / site
//! visit buttons (explicit). Passive triggers give way to anything already
//! open and stop for the rest of the session once the visitor dismisses a
//! popup. Explicit triggers always open, replacing whatever is showing.

use crate::api::models::LeadSource;
use crate::state::session::SessionFlags;

/// Delay before the timer popup fires.
pub const TIMER_POPUP_DELAY_MS: u32 = 30_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerType {
    Timer,
    ExitIntent,
    Brochure,
    Price,
    SiteVisit,
    Generic,
}

impl TriggerType {
    pub fn is_passive(self) -> bool {
        matches!(self, TriggerType::Timer | TriggerType::ExitIntent)
    }

    pub fn tag(self) -> &'static str {
        match self {
            TriggerType::Timer => "timer",
            TriggerType::ExitIntent => "exit_intent",
            TriggerType::Brochure => "brochure",
            TriggerType::Price => "price",
            TriggerType::SiteVisit => "site_visit",
            TriggerType::Generic => "generic",
        }
    }

    /// Unknown tags fall back to the generic popup instead of failing.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "timer" => TriggerType::Timer,
            "exit_intent" | "exit" => TriggerType::ExitIntent,
            "brochure" => TriggerType::Brochure,
            "price" | "pricing" => TriggerType::Price,
            "site_visit" | "visit" => TriggerType::SiteVisit,
            other => {
                log::warn!("unknown popup trigger {:?}, using generic content", other);
                TriggerType::Generic
            }
        }
    }

    pub fn content(self) -> PopupContent {
        match self {
            TriggerType::Timer => PopupContent {
                title: "Get Exclusive Launch Offers",
                subtitle: "Leave your details and our team will share the latest availability and offers.",
                cta: "Get Offers",
                source: LeadSource::TimerPopup,
                asks_site_visit: false,
            },
            TriggerType::ExitIntent => PopupContent {
                title: "Before You Go...",
                subtitle: "Get the complete price sheet and payment plans straight to your inbox.",
                cta: "Send Me Details",
                source: LeadSource::ExitIntentPopup,
                asks_site_visit: false,
            },
            TriggerType::Brochure => PopupContent {
                title: "Download Brochure",
                subtitle: "Floor plans, specifications and amenities in one PDF.",
                cta: "Download Now",
                source: LeadSource::BrochurePopup,
                asks_site_visit: false,
            },
            TriggerType::Price => PopupContent {
                title: "Get Price Details",
                subtitle: "Unit-wise pricing, current offers and payment plans.",
                cta: "Get Price",
                source: LeadSource::PricePopup,
                asks_site_visit: false,
            },
            TriggerType::SiteVisit => PopupContent {
                title: "Schedule a Site Visit",
                subtitle: "Pick a date and time and we will arrange pickup and a guided tour.",
                cta: "Book Visit",
                source: LeadSource::SiteVisitPopup,
                asks_site_visit: true,
            },
            TriggerType::Generic => PopupContent {
                title: "Enquire Now",
                subtitle: "Our sales team will get back to you within a few hours.",
                cta: "Submit",
                source: LeadSource::Other,
                asks_site_visit: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupContent {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta: &'static str,
    pub source: LeadSource,
    pub asks_site_visit: bool,
}

/// Per-request overrides, e.g. a CTA with its own heading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupOptions {
    pub title: Option<String>,
    pub source_tag: Option<String>,
}

impl PopupOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), source_tag: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivePopup {
    pub trigger: TriggerType,
    pub content: PopupContent,
    pub title: String,
    /// Attribution tag sent with the lead and the conversion event.
    pub source_tag: String,
}

impl ActivePopup {
    fn new(trigger: TriggerType, options: PopupOptions) -> Self {
        let content = trigger.content();
        Self {
            trigger,
            content,
            title: options.title.unwrap_or_else(|| content.title.to_string()),
            source_tag: options
                .source_tag
                .unwrap_or_else(|| content.source.as_str().to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// An explicit trigger took the slot from the given popup.
    Replaced(TriggerType),
    /// Passive trigger after the visitor dismissed a popup this session.
    Suppressed,
    /// Passive trigger while another popup is showing.
    Busy,
    /// Exit intent already fired this session.
    AlreadyFired,
}

impl OpenOutcome {
    pub fn opened(self) -> bool {
        matches!(self, OpenOutcome::Opened | OpenOutcome::Replaced(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupSequencer {
    active: Option<ActivePopup>,
    passive_suppressed: bool,
    exit_intent_fired: bool,
}

impl PopupSequencer {
    pub fn from_flags(flags: SessionFlags) -> Self {
        Self {
            active: None,
            passive_suppressed: flags.popup_dismissed,
            exit_intent_fired: flags.exit_intent_fired,
        }
    }

    pub fn flags(&self) -> SessionFlags {
        SessionFlags {
            popup_dismissed: self.passive_suppressed,
            exit_intent_fired: self.exit_intent_fired,
        }
    }

    pub fn active(&self) -> Option<&ActivePopup> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn passive_suppressed(&self) -> bool {
        self.passive_suppressed
    }

    pub fn request_open(&mut self, trigger: TriggerType, options: PopupOptions) -> OpenOutcome {
        // Exit intent gets one attempt per session however it is requested.
        if trigger == TriggerType::ExitIntent {
            if self.exit_intent_fired {
                return OpenOutcome::AlreadyFired;
            }
            self.exit_intent_fired = true;
        }
        if trigger.is_passive() {
            if self.passive_suppressed {
                return OpenOutcome::Suppressed;
            }
            if self.active.is_some() {
                return OpenOutcome::Busy;
            }
        }

        let previous = self.active.replace(ActivePopup::new(trigger, options));
        match previous {
            Some(prev) => OpenOutcome::Replaced(prev.trigger),
            None => OpenOutcome::Opened,
        }
    }

    /// The exit intent listener reports here; only the first report counts.
    pub fn exit_intent(&mut self) -> OpenOutcome {
        self.request_open(TriggerType::ExitIntent, PopupOptions::default())
    }

    /// Closes the popup. Passive triggers stay quiet for the rest of the
    /// session; explicit ones still open on demand.
    pub fn dismiss(&mut self) -> Option<TriggerType> {
        let closed = self.active.take().map(|p| p.trigger);
        if closed.is_some() {
            self.passive_suppressed = true;
        }
        closed
    }

    /// A lead was submitted from the popup.
    pub fn converted(&mut self) {
        self.active = None;
        self.passive_suppressed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn timer_opens_on_fresh_session() {
        let mut seq = PopupSequencer::default();
        assert_eq!(seq.request_open(TriggerType::Timer, PopupOptions::default()), OpenOutcome::Opened);
        assert_eq!(seq.active().map(|p| p.trigger), Some(TriggerType::Timer));
        assert_eq!(seq.active().map(|p| p.source_tag.as_str()), Some("timer_popup"));
    }

    #[test]
    fn passive_waits_for_open_popup() {
        let mut seq = PopupSequencer::default();
        seq.request_open(TriggerType::Brochure, PopupOptions::default());
        assert_eq!(seq.request_open(TriggerType::Timer, PopupOptions::default()), OpenOutcome::Busy);
        assert_eq!(seq.active().map(|p| p.trigger), Some(TriggerType::Brochure));
    }

    #[test]
    fn explicit_overrides_passive() {
        let mut seq = PopupSequencer::default();
        seq.request_open(TriggerType::Timer, PopupOptions::default());
        assert_eq!(
            seq.request_open(TriggerType::Price, PopupOptions::default()),
            OpenOutcome::Replaced(TriggerType::Timer)
        );
        assert_eq!(seq.active().map(|p| p.trigger), Some(TriggerType::Price));
    }

    #[test]
    fn dismiss_suppresses_passive_only() {
        let mut seq = PopupSequencer::default();
        seq.request_open(TriggerType::Timer, PopupOptions::default());
        assert_eq!(seq.dismiss(), Some(TriggerType::Timer));
        assert_eq!(seq.request_open(TriggerType::Timer, PopupOptions::default()), OpenOutcome::Suppressed);
        assert_eq!(seq.exit_intent(), OpenOutcome::Suppressed);
        assert_eq!(seq.request_open(TriggerType::SiteVisit, PopupOptions::default()), OpenOutcome::Opened);
    }

    #[test]
    fn dismiss_with_nothing_open_records_nothing() {
        let mut seq = PopupSequencer::default();
        assert_eq!(seq.dismiss(), None);
        assert!(!seq.passive_suppressed());
    }

    #[test]
    fn exit_intent_fires_once() {
        let mut seq = PopupSequencer::default();
        assert_eq!(seq.exit_intent(), OpenOutcome::Opened);
        for _ in 0..5 {
            assert_eq!(seq.exit_intent(), OpenOutcome::AlreadyFired);
        }
    }

    #[test]
    fn exit_intent_while_busy_still_uses_up_its_shot() {
        let mut seq = PopupSequencer::default();
        seq.request_open(TriggerType::Brochure, PopupOptions::default());
        assert_eq!(seq.exit_intent(), OpenOutcome::Busy);
        seq.dismiss();
        assert_eq!(seq.exit_intent(), OpenOutcome::AlreadyFired);
    }

    #[test]
    fn exit_popup_from_a_link_uses_up_the_listener_shot() {
        let mut seq = PopupSequencer::default();
        let options = PopupOptions { title: None, source_tag: Some("link_exit".into()) };
        assert_eq!(seq.request_open(TriggerType::from_tag("exit"), options), OpenOutcome::Opened);
        assert!(seq.flags().exit_intent_fired);
        seq.converted();
        assert_eq!(seq.exit_intent(), OpenOutcome::AlreadyFired);
        assert_eq!(
            seq.request_open(TriggerType::ExitIntent, PopupOptions::default()),
            OpenOutcome::AlreadyFired
        );
    }

    #[test]
    fn unknown_tag_uses_generic_content() {
        assert_eq!(TriggerType::from_tag("floor-plan-zoom"), TriggerType::Generic);
        assert_eq!(TriggerType::from_tag("Site-Visit"), TriggerType::SiteVisit);
        let mut seq = PopupSequencer::default();
        assert!(seq.request_open(TriggerType::from_tag("???"), PopupOptions::default()).opened());
        assert_eq!(seq.active().map(|p| p.title.as_str()), Some("Enquire Now"));
    }

    #[test]
    fn options_override_title_and_tag() {
        let mut seq = PopupSequencer::default();
        let options = PopupOptions { title: Some("3 BHK Prices".into()), source_tag: Some("pricing_card_3bhk".into()) };
        seq.request_open(TriggerType::Price, options);
        let active = seq.active().cloned();
        assert_eq!(active.as_ref().map(|p| p.title.as_str()), Some("3 BHK Prices"));
        assert_eq!(active.as_ref().map(|p| p.source_tag.as_str()), Some("pricing_card_3bhk"));
    }

    #[test]
    fn flags_restore_session() {
        let mut seq = PopupSequencer::default();
        seq.exit_intent();
        seq.dismiss();
        let mut restored = PopupSequencer::from_flags(seq.flags());
        assert_eq!(restored.exit_intent(), OpenOutcome::AlreadyFired);
        assert_eq!(restored.request_open(TriggerType::Timer, PopupOptions::default()), OpenOutcome::Suppressed);
    }

    #[test]
    fn conversion_suppresses_passive() {
        let mut seq = PopupSequencer::default();
        seq.request_open(TriggerType::Brochure, PopupOptions::default());
        seq.converted();
        assert!(!seq.is_open());
        assert_eq!(seq.request_open(TriggerType::Timer, PopupOptions::default()), OpenOutcome::Suppressed);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Open(TriggerType),
        ExitIntent,
        Dismiss,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            prop::sample::select(vec![
                TriggerType::Timer,
                TriggerType::ExitIntent,
                TriggerType::Brochure,
                TriggerType::Price,
                TriggerType::SiteVisit,
                TriggerType::Generic,
            ])
            .prop_map(Step::Open),
            Just(Step::ExitIntent),
            Just(Step::Dismiss),
        ]
    }

    proptest! {
        #[test]
        fn after_passive_dismissal_only_explicit_opens(steps in prop::collection::vec(step(), 0..30)) {
            let mut seq = PopupSequencer::default();
            let mut passive_dismissed = false;
            let mut exit_reports = 0usize;
            let mut exit_opens = 0usize;
            for s in steps {
                match s {
                    Step::Open(trigger) => {
                        let outcome = seq.request_open(trigger, PopupOptions::default());
                        if trigger == TriggerType::ExitIntent {
                            exit_reports += 1;
                            if outcome.opened() {
                                exit_opens += 1;
                            }
                        }
                        if passive_dismissed && trigger.is_passive() {
                            prop_assert!(!outcome.opened());
                        }
                        if !trigger.is_passive() {
                            prop_assert!(outcome.opened());
                        }
                    }
                    Step::ExitIntent => {
                        exit_reports += 1;
                        let outcome = seq.exit_intent();
                        if outcome.opened() {
                            exit_opens += 1;
                        }
                        if passive_dismissed {
                            prop_assert!(!outcome.opened());
                        }
                    }
                    Step::Dismiss => {
                        if let Some(trigger) = seq.dismiss() {
                            if trigger.is_passive() {
                                passive_dismissed = true;
                            }
                        }
                    }
                }
            }
            prop_assert!(exit_opens <= 1);
            prop_assert!(exit_opens <= exit_reports);
        }
    }
}
