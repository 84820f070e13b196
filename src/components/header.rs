use yew::prelude::*;
use yew_hooks::use_window_scroll;

use crate::components::nav::{navigate_callback, NAV_SECTIONS};
use crate::state::app_state::{use_app_state, AppAction};
use crate::state::popup::{PopupOptions, TriggerType};
use crate::state::sections::SectionId;

const SCROLLED_AT: f64 = 60.0;

/// Fixed desktop header.
#[function_component(Header)]
pub fn header() -> Html {
    let app = use_app_state();
    let (_, scroll_y) = use_window_scroll();

    let book_visit = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| {
            app.dispatch(AppAction::OpenPopup(TriggerType::SiteVisit, PopupOptions::default()))
        })
    };

    html! {
        <header class={classes!("site-header", (scroll_y > SCROLLED_AT).then_some("scrolled"))}>
            <div class="header-content">
                <a href={format!("#{}", SectionId::Home.anchor())}
                    class="header-logo"
                    onclick={navigate_callback(&app, SectionId::Home)}>
                    {"Aurelia Heights"}
                </a>
                <nav class="header-links">
                    {
                        NAV_SECTIONS.iter().map(|id| {
                            let active = app.sections.is_active(*id);
                            html! {
                                <a href={format!("#{}", id.anchor())}
                                    class={classes!("header-link", active.then_some("active"))}
                                    aria-current={active.then_some("true")}
                                    onclick={navigate_callback(&app, *id)}>
                                    { id.label() }
                                </a>
                            }
                        }).collect::<Html>()
                    }
                </nav>
                <button class="header-cta" onclick={book_visit}>{"Book Site Visit"}</button>
            </div>
            <style>
                {r#"
                    .site-header {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 1000;
                        padding: 1.25rem 2.5rem;
                        transition: background 0.3s ease, padding 0.3s ease, box-shadow 0.3s ease;
                        background: transparent;
                    }
                    .site-header.scrolled {
                        background: rgba(14, 22, 38, 0.95);
                        padding: 0.75rem 2.5rem;
                        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.25);
                        backdrop-filter: blur(8px);
                    }
                    .header-content {
                        max-width: 1280px;
                        margin: 0 auto;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        gap: 2rem;
                    }
                    .header-logo {
                        font-family: var(--font-display);
                        font-size: 1.5rem;
                        color: var(--gold);
                        text-decoration: none;
                        letter-spacing: 0.04em;
                    }
                    .header-links {
                        display: flex;
                        gap: 1.75rem;
                    }
                    .header-link {
                        color: rgba(255, 255, 255, 0.8);
                        text-decoration: none;
                        font-size: 0.95rem;
                        padding-bottom: 4px;
                        border-bottom: 2px solid transparent;
                        transition: color 0.2s ease, border-color 0.2s ease;
                    }
                    .header-link:hover,
                    .header-link.active {
                        color: #fff;
                        border-bottom-color: var(--gold);
                    }
                    .header-cta {
                        background: var(--gold);
                        color: var(--navy);
                        border: none;
                        border-radius: 999px;
                        padding: 0.7rem 1.5rem;
                        font-weight: 600;
                        cursor: pointer;
                    }
                "#}
            </style>
        </header>
    }
}
