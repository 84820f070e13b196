use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::analytics::track_lead_conversion;
use crate::api::leads::submit_lead;
use crate::api::models::{
    FieldError, FormField, LeadSource, LeadSubmission, SiteVisitPreference, TimeSlot, UtmAttribution,
};
use crate::components::notification::use_toaster;

/// Raw input values as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub visit_date: String,
    pub time_slot: String,
    pub needs_pickup: bool,
}

/// Turns the typed values into a validated submission.
pub fn build_submission(
    fields: &FormFields,
    source: LeadSource,
    source_tag: Option<String>,
    asks_site_visit: bool,
    utm: UtmAttribution,
    today: NaiveDate,
) -> Result<LeadSubmission, Vec<FieldError>> {
    let mut errors = Vec::new();

    let site_visit = if asks_site_visit {
        match NaiveDate::parse_from_str(fields.visit_date.trim(), "%Y-%m-%d") {
            Ok(date) => Some(SiteVisitPreference {
                date,
                time_slot: TimeSlot::parse(&fields.time_slot).unwrap_or(TimeSlot::Morning),
                needs_pickup: fields.needs_pickup,
            }),
            Err(_) => {
                errors.push(FieldError { field: FormField::SiteVisitDate, message: "Pick a visit date" });
                None
            }
        }
    } else {
        None
    };

    let message = fields.message.trim();
    let submission = LeadSubmission {
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        phone: fields.phone.trim().to_string(),
        message: (!message.is_empty()).then(|| message.to_string()),
        source,
        source_tag,
        site_visit,
        utm,
    };

    if let Err(mut more) = submission.validate(today) {
        errors.append(&mut more);
    }
    if errors.is_empty() {
        Ok(submission)
    } else {
        Err(errors)
    }
}

fn page_utm() -> UtmAttribution {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|search| UtmAttribution::from_query(&search))
        .unwrap_or_default()
}

fn error_for(errors: &[FieldError], field: FormField) -> Html {
    match errors.iter().find(|e| e.field == field) {
        Some(error) => html! { <span class="field-error">{ error.message }</span> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct LeadFormProps {
    pub source: LeadSource,
    #[prop_or_default]
    pub source_tag: Option<String>,
    #[prop_or_default]
    pub asks_site_visit: bool,
    #[prop_or(AttrValue::from("Submit"))]
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub on_success: Callback<()>,
}

#[function_component(LeadForm)]
pub fn lead_form(props: &LeadFormProps) -> Html {
    let fields = use_state(FormFields::default);
    let errors = use_state(Vec::<FieldError>::new);
    let submitting = use_state(|| false);
    let submitted = use_state(|| false);
    let toaster = use_toaster();

    let text_input = |update: fn(&mut FormFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            update(&mut next, input.value());
            fields.set(next);
        })
    };

    let on_message = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            next.message = input.value();
            fields.set(next);
        })
    };

    let on_slot = {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            next.time_slot = select.value();
            fields.set(next);
        })
    };

    let on_pickup = {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            next.needs_pickup = input.checked();
            fields.set(next);
        })
    };

    let onsubmit = {
        let fields = fields.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let submitted = submitted.clone();
        let toaster = toaster.clone();
        let source = props.source;
        let source_tag = props.source_tag.clone();
        let asks_site_visit = props.asks_site_visit;
        let on_success = props.on_success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let today = chrono::Local::now().date_naive();
            let submission = match build_submission(
                &fields,
                source,
                source_tag.clone(),
                asks_site_visit,
                page_utm(),
                today,
            ) {
                Ok(submission) => submission,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };
            errors.set(Vec::new());
            submitting.set(true);

            let submitting = submitting.clone();
            let submitted = submitted.clone();
            let toaster = toaster.clone();
            let on_success = on_success.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let tag = submission
                    .source_tag
                    .clone()
                    .unwrap_or_else(|| submission.source.as_str().to_string());
                match submit_lead(&submission).await {
                    Ok(()) => {
                        log::info!("lead captured from {}", tag);
                        track_lead_conversion(&tag);
                        toaster.success("Thank you! Our team will contact you shortly.");
                        submitted.set(true);
                        on_success.emit(());
                    }
                    Err(e) => {
                        log::error!("lead submission failed: {}", e);
                        toaster.error(e.user_message());
                    }
                }
                submitting.set(false);
            });
        })
    };

    if *submitted {
        return html! {
            <div class="lead-form-success">
                <h3>{"Thank you!"}</h3>
                <p>{"We have received your details. A relationship manager will call you shortly."}</p>
            </div>
        };
    }

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    html! {
        <form class="lead-form" {onsubmit} novalidate={true}>
            <label>
                <input type="text" placeholder="Full name" autocomplete="name"
                    value={fields.name.clone()}
                    oninput={text_input(|f: &mut FormFields, v: String| f.name = v)} />
                { error_for(&errors, FormField::Name) }
            </label>
            <label>
                <input type="email" placeholder="Email" autocomplete="email"
                    value={fields.email.clone()}
                    oninput={text_input(|f: &mut FormFields, v: String| f.email = v)} />
                { error_for(&errors, FormField::Email) }
            </label>
            <label>
                <input type="tel" placeholder="Phone number" autocomplete="tel"
                    value={fields.phone.clone()}
                    oninput={text_input(|f: &mut FormFields, v: String| f.phone = v)} />
                { error_for(&errors, FormField::Phone) }
            </label>
            {
                if props.asks_site_visit {
                    html! {
                        <div class="site-visit-fields">
                            <label>
                                <span>{"Preferred date"}</span>
                                <input type="date" min={today}
                                    value={fields.visit_date.clone()}
                                    oninput={text_input(|f: &mut FormFields, v: String| f.visit_date = v)} />
                                { error_for(&errors, FormField::SiteVisitDate) }
                            </label>
                            <label>
                                <span>{"Preferred time"}</span>
                                <select onchange={on_slot}>
                                    {
                                        TimeSlot::ALL.iter().map(|slot| html! {
                                            <option value={slot.as_str()}
                                                selected={fields.time_slot == slot.as_str()}>
                                                { slot.label() }
                                            </option>
                                        }).collect::<Html>()
                                    }
                                </select>
                            </label>
                            <label class="checkbox">
                                <input type="checkbox" checked={fields.needs_pickup} onchange={on_pickup} />
                                <span>{"I need pickup and drop"}</span>
                            </label>
                        </div>
                    }
                } else {
                    html! {
                        <textarea placeholder="Message (optional)" rows="3"
                            value={fields.message.clone()}
                            oninput={on_message} />
                    }
                }
            }
            <button type="submit" class="lead-form-submit" disabled={*submitting}>
                { if *submitting { "Sending...".to_string() } else { props.submit_label.to_string() } }
            </button>
            <p class="lead-form-consent">
                {"By submitting you agree to be contacted about Aurelia Heights by call, SMS, email or WhatsApp."}
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    fn filled() -> FormFields {
        FormFields {
            name: " Meera Iyer ".into(),
            email: "meera@example.in".into(),
            phone: "98860 12345".into(),
            ..Default::default()
        }
    }

    #[test]
    fn trims_and_drops_empty_message() {
        let s = build_submission(&filled(), LeadSource::HeroForm, None, false, UtmAttribution::default(), today())
            .unwrap();
        assert_eq!(s.name, "Meera Iyer");
        assert_eq!(s.message, None);
        assert_eq!(s.site_visit, None);
    }

    #[test]
    fn site_visit_form_requires_a_date() {
        let errs = build_submission(&filled(), LeadSource::SiteVisitPopup, None, true, UtmAttribution::default(), today())
            .unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, FormField::SiteVisitDate);
    }

    #[test]
    fn site_visit_fields_are_parsed() {
        let fields = FormFields {
            visit_date: "2026-05-03".into(),
            time_slot: "evening".into(),
            needs_pickup: true,
            ..filled()
        };
        let s = build_submission(
            &fields,
            LeadSource::SiteVisitPopup,
            Some("hero_visit_button".into()),
            true,
            UtmAttribution::default(),
            today(),
        )
        .unwrap();
        let visit = s.site_visit.unwrap();
        assert_eq!(visit.time_slot, TimeSlot::Evening);
        assert!(visit.needs_pickup);
        assert_eq!(s.source_tag.as_deref(), Some("hero_visit_button"));
    }

    #[test]
    fn unknown_slot_defaults_to_morning() {
        let fields = FormFields { visit_date: "2026-05-03".into(), time_slot: String::new(), ..filled() };
        let s = build_submission(&fields, LeadSource::SiteVisitPopup, None, true, UtmAttribution::default(), today())
            .unwrap();
        assert_eq!(s.site_visit.map(|v| v.time_slot), Some(TimeSlot::Morning));
    }

    #[test]
    fn past_visit_date_is_rejected() {
        let fields = FormFields { visit_date: "2026-04-30".into(), ..filled() };
        let errs = build_submission(&fields, LeadSource::SiteVisitPopup, None, true, UtmAttribution::default(), today())
            .unwrap_err();
        assert_eq!(errs[0].field, FormField::SiteVisitDate);
    }
}
