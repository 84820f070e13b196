use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    SiteVisitScheduled,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::SiteVisitScheduled,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::SiteVisitScheduled => "site_visit_scheduled",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::SiteVisitScheduled => "Site Visit Scheduled",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        LeadStatus::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl LeadPriority {
    pub const ALL: [LeadPriority; 3] = [LeadPriority::Low, LeadPriority::Medium, LeadPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadPriority::Low => "low",
            LeadPriority::Medium => "medium",
            LeadPriority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadPriority::Low => "Low",
            LeadPriority::Medium => "Medium",
            LeadPriority::High => "High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        LeadPriority::ALL.into_iter().find(|p| p.as_str() == raw)
    }
}

/// Which form captured the lead.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    HeroForm,
    BrochurePopup,
    PricePopup,
    SiteVisitPopup,
    ExitIntentPopup,
    TimerPopup,
    ContactForm,
    #[default]
    #[serde(other)]
    Other,
}

impl LeadSource {
    pub const ALL: [LeadSource; 8] = [
        LeadSource::HeroForm,
        LeadSource::BrochurePopup,
        LeadSource::PricePopup,
        LeadSource::SiteVisitPopup,
        LeadSource::ExitIntentPopup,
        LeadSource::TimerPopup,
        LeadSource::ContactForm,
        LeadSource::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::HeroForm => "hero_form",
            LeadSource::BrochurePopup => "brochure_popup",
            LeadSource::PricePopup => "price_popup",
            LeadSource::SiteVisitPopup => "site_visit_popup",
            LeadSource::ExitIntentPopup => "exit_intent_popup",
            LeadSource::TimerPopup => "timer_popup",
            LeadSource::ContactForm => "contact_form",
            LeadSource::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadSource::HeroForm => "Hero form",
            LeadSource::BrochurePopup => "Brochure",
            LeadSource::PricePopup => "Price",
            LeadSource::SiteVisitPopup => "Site visit",
            LeadSource::ExitIntentPopup => "Exit intent",
            LeadSource::TimerPopup => "Timer",
            LeadSource::ContactForm => "Contact form",
            LeadSource::Other => "Other",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning (10am - 1pm)",
            TimeSlot::Afternoon => "Afternoon (1pm - 4pm)",
            TimeSlot::Evening => "Evening (4pm - 7pm)",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        TimeSlot::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SiteVisitPreference {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    #[serde(default)]
    pub needs_pickup: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UtmAttribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
}

impl UtmAttribution {
    /// Reads `utm_*` parameters from a `location.search` string.
    pub fn from_query(search: &str) -> Self {
        let mut utm = UtmAttribution::default();
        for pair in search.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else { continue };
            let value = urlencoding::decode(&value.replace('+', " "))
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            if value.is_empty() {
                continue;
            }
            let slot = match key {
                "utm_source" => &mut utm.utm_source,
                "utm_medium" => &mut utm.utm_medium,
                "utm_campaign" => &mut utm.utm_campaign,
                "utm_term" => &mut utm.utm_term,
                "utm_content" => &mut utm.utm_content,
                _ => continue,
            };
            *slot = Some(value);
        }
        utm
    }

    pub fn is_empty(&self) -> bool {
        *self == UtmAttribution::default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LeadNote {
    pub id: String,
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub priority: LeadPriority,
    #[serde(default)]
    pub site_visit: Option<SiteVisitPreference>,
    #[serde(default)]
    pub utm: UtmAttribution,
    #[serde(default)]
    pub notes: Vec<LeadNote>,
    #[serde(default)]
    pub follow_up: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// What the public forms post.
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub source: LeadSource,
    /// Free-form attribution, e.g. which pricing card was clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_visit: Option<SiteVisitPreference>,
    #[serde(flatten)]
    pub utm: UtmAttribution,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    SiteVisitDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

impl LeadSubmission {
    /// Client-side checks; the backend validates again.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError { field: FormField::Name, message: "Please enter your name" });
        }
        if !is_plausible_email(&self.email) {
            errors.push(FieldError { field: FormField::Email, message: "Please enter a valid email" });
        }
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        let allowed = self
            .phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
        if !allowed || !(7..=15).contains(&digits) {
            errors.push(FieldError { field: FormField::Phone, message: "Please enter a valid phone number" });
        }
        if let Some(visit) = &self.site_visit {
            if visit.date < today {
                errors.push(FieldError {
                    field: FormField::SiteVisitDate,
                    message: "Pick a date from today onwards",
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LeadSort {
    #[default]
    Newest,
    Oldest,
    Priority,
    Name,
}

impl LeadSort {
    pub const ALL: [LeadSort; 4] = [LeadSort::Newest, LeadSort::Oldest, LeadSort::Priority, LeadSort::Name];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSort::Newest => "newest",
            LeadSort::Oldest => "oldest",
            LeadSort::Priority => "priority",
            LeadSort::Name => "name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadSort::Newest => "Newest first",
            LeadSort::Oldest => "Oldest first",
            LeadSort::Priority => "Priority",
            LeadSort::Name => "Name",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        LeadSort::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Filters and paging for the admin list; the backend does the work.
#[derive(Clone, Debug, PartialEq)]
pub struct LeadQuery {
    pub status: Option<LeadStatus>,
    pub search: String,
    pub sort: LeadSort,
    pub page: u32,
    pub per_page: u32,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: String::new(),
            sort: LeadSort::default(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl LeadQuery {
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(format!("status={}", status.as_str()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(format!("q={}", urlencoding::encode(search)));
        }
        params.push(format!("sort={}", self.sort.as_str()));
        params.push(format!("page={}", self.page.max(1)));
        params.push(format!("per_page={}", self.per_page.max(1)));
        params.join("&")
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

impl LeadPage {
    pub fn page_count(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }
}

/// Partial update; absent fields are left alone. `follow_up` distinguishes
/// "leave" (`None`) from "clear" (`Some(None)`).
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<LeadPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<Option<NaiveDate>>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewNote {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn submission() -> LeadSubmission {
        LeadSubmission {
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: "+91 98450 12345".into(),
            source: LeadSource::HeroForm,
            ..Default::default()
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert_eq!(submission().validate(today()), Ok(()));
    }

    #[test]
    fn collects_every_field_error() {
        let bad = LeadSubmission {
            name: "  ".into(),
            email: "asha@".into(),
            phone: "12ab".into(),
            site_visit: Some(SiteVisitPreference {
                date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
                time_slot: TimeSlot::Morning,
                needs_pickup: false,
            }),
            ..submission()
        };
        let fields: Vec<FormField> = bad.validate(today()).unwrap_err().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![FormField::Name, FormField::Email, FormField::Phone, FormField::SiteVisitDate]
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("a@@b.co"));
        assert!(!is_plausible_email("a b@c.co"));
        assert!(!is_plausible_email("@c.co"));
        assert!(!is_plausible_email("a@c..co"));
    }

    #[test]
    fn utm_from_query() {
        let utm = UtmAttribution::from_query("?utm_source=google&utm_campaign=launch%20week&x=1&utm_term=");
        assert_eq!(utm.utm_source.as_deref(), Some("google"));
        assert_eq!(utm.utm_campaign.as_deref(), Some("launch week"));
        assert_eq!(utm.utm_term, None);
        assert!(UtmAttribution::from_query("").is_empty());
    }

    #[test]
    fn submission_flattens_utm() {
        let mut s = submission();
        s.utm.utm_source = Some("meta".into());
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["utm_source"], json!("meta"));
        assert_eq!(value["source"], json!("hero_form"));
        assert!(value.get("site_visit").is_none());
    }

    #[test]
    fn lead_decodes_with_defaults() {
        let lead: Lead = serde_json::from_value(json!({
            "id": "ld_1",
            "name": "Vikram",
            "email": "v@example.com",
            "phone": "9845012345",
            "source": "some_new_form",
            "status": "site_visit_scheduled",
            "created_at": "2026-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(lead.source, LeadSource::Other);
        assert_eq!(lead.status, LeadStatus::SiteVisitScheduled);
        assert_eq!(lead.priority, LeadPriority::Medium);
        assert!(lead.notes.is_empty());
    }

    #[test]
    fn query_string_encodes_filters() {
        let q = LeadQuery {
            status: Some(LeadStatus::Contacted),
            search: " rao & sons ".into(),
            sort: LeadSort::Priority,
            page: 0,
            per_page: 50,
        };
        assert_eq!(
            q.to_query_string(),
            "status=contacted&q=rao%20%26%20sons&sort=priority&page=1&per_page=50"
        );
        assert_eq!(LeadQuery::default().to_query_string(), "sort=newest&page=1&per_page=20");
    }

    #[test]
    fn patch_distinguishes_clear_from_leave() {
        let leave = LeadPatch { status: Some(LeadStatus::Lost), ..Default::default() };
        assert_eq!(serde_json::to_value(&leave).unwrap(), json!({"status": "lost"}));
        let clear = LeadPatch { follow_up: Some(None), ..Default::default() };
        assert_eq!(serde_json::to_value(&clear).unwrap(), json!({"follow_up": null}));
    }

    #[test]
    fn page_count_rounds_up() {
        let page = LeadPage { leads: vec![], total: 41, page: 1, per_page: 20 };
        assert_eq!(page.page_count(), 3);
        let empty = LeadPage { leads: vec![], total: 0, page: 1, per_page: 20 };
        assert_eq!(empty.page_count(), 1);
    }
}
