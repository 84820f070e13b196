use yew::prelude::*;
use yew_hooks::{use_window_scroll, use_window_size};
use yew_router::prelude::*;

use crate::api::models::LeadSource;
use crate::components::floating_contact::FloatingContact;
use crate::components::lead_form::LeadForm;
use crate::components::lead_popup::PopupHost;
use crate::components::nav::{scroll_to_section, ResponsiveNav};
use crate::components::reveal::Reveal;
use crate::config::SiteConfig;
use crate::state::app_state::{use_app_state, AppAction, AppContext};
use crate::state::popup::{PopupOptions, TriggerType};
use crate::state::sections::{SectionId, SectionRegion, VisibilityObserver};
use crate::Route;

struct FloorPlan {
    name: &'static str,
    carpet_sqft: u32,
    starting_lakh: u32,
}

const FLOOR_PLANS: [FloorPlan; 3] = [
    FloorPlan { name: "2 BHK", carpet_sqft: 1_085, starting_lakh: 89 },
    FloorPlan { name: "3 BHK", carpet_sqft: 1_540, starting_lakh: 124 },
    FloorPlan { name: "4 BHK Sky Villa", carpet_sqft: 2_310, starting_lakh: 198 },
];

const AMENITIES: [(&str, &str); 6] = [
    ("🏊", "Infinity pool"),
    ("🏋️", "Clubhouse gym"),
    ("🌳", "2 acre central park"),
    ("🎾", "Tennis & squash"),
    ("🧒", "Kids play zone"),
    ("🔒", "3-tier security"),
];

const LANDMARKS: [(&str, &str); 4] = [
    ("International airport", "25 min"),
    ("Metro station", "4 min"),
    ("Tech park", "10 min"),
    ("International school", "6 min"),
];

/// Reads every section's bounding box in document order.
fn measure_regions() -> (Vec<SectionRegion>, f64) {
    let Some(window) = web_sys::window() else {
        return (Vec::new(), 0.0);
    };
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let Some(document) = window.document() else {
        return (Vec::new(), viewport_height);
    };
    let regions = SectionId::ALL
        .into_iter()
        .filter_map(|id| {
            let rect = document.get_element_by_id(id.anchor())?.get_bounding_client_rect();
            Some(SectionRegion { id, top: rect.top(), bottom: rect.bottom() })
        })
        .collect();
    (regions, viewport_height)
}

/// Feeds section geometry into the observer on every scroll or resize and
/// forwards the resulting events to the tracker.
#[hook]
fn use_section_tracking(app: &AppContext) {
    let observer = use_mut_ref(VisibilityObserver::default);
    let (_, scroll_y) = use_window_scroll();
    let (width, height) = use_window_size();
    let key = (scroll_y.round() as i64, width.round() as i64, height.round() as i64);

    let app = app.clone();
    use_effect_with_deps(
        move |_| {
            let (regions, viewport_height) = measure_regions();
            let events = observer.borrow_mut().observe(&regions, viewport_height);
            if !events.is_empty() {
                app.dispatch(AppAction::Visibility(events));
            }
            || ()
        },
        key,
    );
}

/// Value of `popup=` in a `location.search` string, so ad links can open a
/// specific popup.
pub fn popup_param(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "popup")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn open_popup(app: &AppContext, trigger: TriggerType, options: PopupOptions) -> Callback<MouseEvent> {
    let app = app.clone();
    Callback::from(move |_: MouseEvent| app.dispatch(AppAction::OpenPopup(trigger, options.clone())))
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let app = use_app_state();
    use_section_tracking(&app);

    // Honour #section and ?popup= deep links once the sections exist.
    {
        let app = app.clone();
        use_effect_with_deps(
            move |_| {
                let location = web_sys::window().map(|w| w.location());
                let hash = location
                    .as_ref()
                    .and_then(|l| l.hash().ok())
                    .unwrap_or_default();
                if let Some(id) = SectionId::from_anchor(hash.trim_start_matches('#')) {
                    app.dispatch(AppAction::NavigateTo(id));
                    scroll_to_section(id);
                }

                let search = location
                    .as_ref()
                    .and_then(|l| l.search().ok())
                    .unwrap_or_default();
                if let Some(tag) = popup_param(&search) {
                    let options = PopupOptions { title: None, source_tag: Some(format!("link_{}", tag)) };
                    app.dispatch(AppAction::OpenPopup(TriggerType::from_tag(&tag), options));
                }
                || ()
            },
            (),
        );
    }

    let site = SiteConfig::from_env();
    // A lead from any form quiets the passive popups.
    let lead_captured = {
        let app = app.clone();
        Callback::from(move |_: ()| app.dispatch(AppAction::LeadCaptured))
    };

    html! {
        <div class="landing">
            <ResponsiveNav />

            <section id={SectionId::Home.anchor()} class="hero">
                <div class="hero-copy">
                    <span class="eyebrow">{"New launch · RERA registered"}</span>
                    <h1>{"Aurelia Heights"}</h1>
                    <p class="hero-lede">
                        {"Sky residences above the city, with 70% open space and a private clubhouse."}
                    </p>
                    <div class="hero-actions">
                        <button class="btn-gold"
                            onclick={open_popup(&app, TriggerType::SiteVisit, PopupOptions {
                                title: None,
                                source_tag: Some("hero_visit_button".into()),
                            })}>
                            {"Book Site Visit"}
                        </button>
                        <button class="btn-outline"
                            onclick={open_popup(&app, TriggerType::Brochure, PopupOptions::default())}>
                            {"Download Brochure"}
                        </button>
                    </div>
                </div>
                <div class="hero-form">
                    <h2>{"Register your interest"}</h2>
                    <LeadForm source={LeadSource::HeroForm} submit_label="Get Call Back" on_success={lead_captured.clone()} />
                </div>
            </section>

            <section id={SectionId::Overview.anchor()} class="section overview">
                <Reveal>
                    <h2>{"An address that rises above"}</h2>
                    <p>
                        {"Three towers of 32 floors on 9 acres, designed around light, air and a \
                          central park. Possession from December 2028."}
                    </p>
                    <div class="stats">
                        <div><strong>{"9"}</strong><span>{"Acres"}</span></div>
                        <div><strong>{"3"}</strong><span>{"Towers"}</span></div>
                        <div><strong>{"640"}</strong><span>{"Residences"}</span></div>
                        <div><strong>{"70%"}</strong><span>{"Open space"}</span></div>
                    </div>
                </Reveal>
            </section>

            <section id={SectionId::Amenities.anchor()} class="section amenities">
                <Reveal>
                    <h2>{"Amenities"}</h2>
                    <div class="amenity-grid">
                        {
                            AMENITIES.iter().map(|(icon, name)| html! {
                                <div class="amenity">
                                    <span class="amenity-icon">{ *icon }</span>
                                    <span>{ *name }</span>
                                </div>
                            }).collect::<Html>()
                        }
                    </div>
                </Reveal>
            </section>

            <section id={SectionId::FloorPlans.anchor()} class="section floor-plans">
                <Reveal>
                    <h2>{"Floor Plans"}</h2>
                    <div class="plan-grid">
                        {
                            FLOOR_PLANS.iter().map(|plan| html! {
                                <div class="plan-card">
                                    <h3>{ plan.name }</h3>
                                    <p>{ format!("{} sq.ft carpet", plan.carpet_sqft) }</p>
                                    <button class="btn-outline"
                                        onclick={open_popup(&app, TriggerType::Brochure, PopupOptions {
                                            title: Some(format!("{} Floor Plan", plan.name)),
                                            source_tag: Some(format!("floor_plan_{}", plan.name.to_lowercase().replace(' ', "_"))),
                                        })}>
                                        {"View Plan"}
                                    </button>
                                </div>
                            }).collect::<Html>()
                        }
                    </div>
                </Reveal>
            </section>

            <section id={SectionId::Gallery.anchor()} class="section gallery">
                <Reveal>
                    <h2>{"Gallery"}</h2>
                    <div class="gallery-grid">
                        <img src="/assets/aurelia-facade.webp" alt="Tower facade at dusk" loading="lazy" />
                        <img src="/assets/aurelia-pool.webp" alt="Infinity pool deck" loading="lazy" />
                        <img src="/assets/aurelia-living.webp" alt="3 BHK living room" loading="lazy" />
                        <img src="/assets/aurelia-park.webp" alt="Central park" loading="lazy" />
                    </div>
                </Reveal>
            </section>

            <section id={SectionId::Location.anchor()} class="section location">
                <Reveal>
                    <h2>{"Location Advantage"}</h2>
                    <ul class="landmarks">
                        {
                            LANDMARKS.iter().map(|(place, time)| html! {
                                <li><span>{ *place }</span><strong>{ *time }</strong></li>
                            }).collect::<Html>()
                        }
                    </ul>
                </Reveal>
            </section>

            <section id={SectionId::Pricing.anchor()} class="section pricing">
                <Reveal>
                    <h2>{"Pricing"}</h2>
                    <table class="price-table">
                        <thead>
                            <tr><th>{"Type"}</th><th>{"Carpet area"}</th><th>{"Starting at"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            {
                                FLOOR_PLANS.iter().map(|plan| html! {
                                    <tr>
                                        <td>{ plan.name }</td>
                                        <td>{ format!("{} sq.ft", plan.carpet_sqft) }</td>
                                        <td>{ format!("₹{} L*", plan.starting_lakh) }</td>
                                        <td>
                                            <button class="btn-gold"
                                                onclick={open_popup(&app, TriggerType::Price, PopupOptions {
                                                    title: Some(format!("{} Price Sheet", plan.name)),
                                                    source_tag: Some("pricing_table".into()),
                                                })}>
                                                {"Get Price"}
                                            </button>
                                        </td>
                                    </tr>
                                }).collect::<Html>()
                            }
                        </tbody>
                    </table>
                    <p class="fine-print">{"*Prices exclude registration and GST."}</p>
                </Reveal>
            </section>

            <section id={SectionId::Contact.anchor()} class="section contact">
                <Reveal>
                    <h2>{"Talk to us"}</h2>
                    <div class="contact-grid">
                        <div class="contact-details">
                            <p>{"Sales lounge open 10am to 7pm, all days."}</p>
                            <a href={site.tel_link()}>{ site.sales_phone.clone() }</a>
                        </div>
                        <LeadForm source={LeadSource::ContactForm} submit_label="Send Enquiry" on_success={lead_captured} />
                    </div>
                </Reveal>
            </section>

            <footer class="landing-footer">
                <span>{"© 2026 Aurelia Developers"}</span>
                <Link<Route> to={Route::Privacy}>{"Privacy Policy"}</Link<Route>>
            </footer>

            <FloatingContact />
            <PopupHost />

            <style>
                {r#"
                    .landing { background: var(--navy); color: #f4f1ea; }
                    .section {
                        padding: 6rem 1.5rem;
                        max-width: 1100px;
                        margin: 0 auto;
                    }
                    .section h2 {
                        font-family: var(--font-display);
                        color: var(--gold);
                        font-size: 2.2rem;
                        margin-bottom: 1.5rem;
                    }
                    .hero {
                        min-height: 100vh;
                        display: grid;
                        grid-template-columns: 1.3fr 1fr;
                        gap: 3rem;
                        align-items: center;
                        padding: 8rem 6vw 4rem;
                        background: linear-gradient(160deg, rgba(10, 18, 38, 0.6), rgba(10, 18, 38, 0.95)),
                            url('/assets/aurelia-hero.webp') center / cover;
                    }
                    .hero h1 {
                        font-family: var(--font-display);
                        font-size: clamp(2.5rem, 6vw, 4.5rem);
                        margin: 0.5rem 0 1rem;
                    }
                    .eyebrow { color: var(--gold); letter-spacing: 0.15em; text-transform: uppercase; font-size: 0.8rem; }
                    .hero-lede { font-size: 1.2rem; max-width: 34rem; opacity: 0.85; }
                    .hero-actions { display: flex; gap: 1rem; margin-top: 2rem; flex-wrap: wrap; }
                    .hero-form {
                        background: rgba(255, 255, 255, 0.96);
                        color: var(--navy);
                        border-radius: 16px;
                        padding: 2rem;
                    }
                    .btn-gold, .btn-outline {
                        border-radius: 999px;
                        padding: 0.8rem 1.6rem;
                        font-weight: 600;
                        cursor: pointer;
                    }
                    .btn-gold { background: var(--gold); color: var(--navy); border: none; }
                    .btn-outline { background: transparent; color: var(--gold); border: 1px solid var(--gold); }
                    .stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin-top: 2rem; }
                    .stats strong { display: block; font-size: 2rem; color: var(--gold); }
                    .amenity-grid, .plan-grid, .gallery-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                        gap: 1.25rem;
                    }
                    .amenity, .plan-card {
                        background: rgba(255, 255, 255, 0.05);
                        border: 1px solid rgba(201, 169, 97, 0.25);
                        border-radius: 12px;
                        padding: 1.5rem;
                    }
                    .amenity { display: flex; gap: 0.75rem; align-items: center; }
                    .amenity-icon { font-size: 1.6rem; }
                    .gallery-grid img { width: 100%; border-radius: 12px; aspect-ratio: 4 / 3; object-fit: cover; }
                    .landmarks { list-style: none; padding: 0; }
                    .landmarks li {
                        display: flex;
                        justify-content: space-between;
                        padding: 1rem 0;
                        border-bottom: 1px solid rgba(255, 255, 255, 0.1);
                    }
                    .price-table { width: 100%; border-collapse: collapse; }
                    .price-table th, .price-table td { padding: 1rem; text-align: left; border-bottom: 1px solid rgba(255, 255, 255, 0.1); }
                    .fine-print { font-size: 0.8rem; opacity: 0.6; }
                    .contact-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
                    .contact-details a { color: var(--gold); font-size: 1.5rem; text-decoration: none; }
                    .contact .lead-form { background: #fff; color: var(--navy); padding: 1.5rem; border-radius: 12px; }
                    .lead-form { display: flex; flex-direction: column; gap: 0.85rem; }
                    .lead-form label { display: flex; flex-direction: column; gap: 0.3rem; }
                    .lead-form input, .lead-form select, .lead-form textarea {
                        padding: 0.75rem;
                        border: 1px solid #d4d8e0;
                        border-radius: 8px;
                        font-size: 1rem;
                    }
                    .lead-form label.checkbox { flex-direction: row; align-items: center; }
                    .field-error { color: #c0392b; font-size: 0.8rem; }
                    .lead-form-submit {
                        background: var(--navy);
                        color: var(--gold);
                        border: none;
                        border-radius: 8px;
                        padding: 0.9rem;
                        font-weight: 600;
                        cursor: pointer;
                    }
                    .lead-form-submit:disabled { opacity: 0.6; cursor: wait; }
                    .lead-form-consent { font-size: 0.7rem; color: #7a8194; }
                    .landing-footer {
                        display: flex;
                        justify-content: space-between;
                        padding: 2rem 6vw 7rem;
                        border-top: 1px solid rgba(255, 255, 255, 0.1);
                    }
                    .landing-footer a { color: var(--gold); }
                    @media (max-width: 899px) {
                        .hero { grid-template-columns: 1fr; padding-top: 4rem; }
                        .contact-grid { grid-template-columns: 1fr; }
                        .stats { grid-template-columns: repeat(2, 1fr); }
                    }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_param_is_read_from_search() {
        assert_eq!(popup_param("?utm_source=google&popup=brochure"), Some("brochure".into()));
        assert_eq!(popup_param("?popup=site%20visit"), Some("site visit".into()));
        assert_eq!(popup_param("?popup="), None);
        assert_eq!(popup_param(""), None);
    }

    #[test]
    fn unknown_link_tag_still_opens_something() {
        let tag = popup_param("?popup=spring-offer").unwrap();
        assert_eq!(TriggerType::from_tag(&tag), TriggerType::Generic);
    }
}
