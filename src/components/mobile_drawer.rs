use yew::prelude::*;

use crate::components::nav::{navigate_callback, NAV_SECTIONS};
use crate::state::app_state::{use_app_state, AppAction};
use crate::state::popup::{PopupOptions, TriggerType};
use crate::state::sections::SectionId;

/// Full-screen section menu. Opened from the bottom bar, but its state does
/// not depend on width.
#[function_component(MobileDrawer)]
pub fn mobile_drawer() -> Html {
    let app = use_app_state();
    let open = app.drawer_open;

    let close = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| app.dispatch(AppAction::CloseDrawer))
    };
    let brochure = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| {
            app.dispatch(AppAction::CloseDrawer);
            app.dispatch(AppAction::OpenPopup(TriggerType::Brochure, PopupOptions::default()));
        })
    };

    let items = std::iter::once(SectionId::Home)
        .chain(NAV_SECTIONS)
        .chain(std::iter::once(SectionId::Contact));

    html! {
        <div class={classes!("mobile-drawer", open.then_some("open"))} aria-hidden={(!open).to_string()}>
            <div class="drawer-header">
                <span class="drawer-title">{"Aurelia Heights"}</span>
                <button class="drawer-close" onclick={close} aria-label="Close menu">{"×"}</button>
            </div>
            <nav class="drawer-links">
                {
                    items.map(|id| {
                        let active = app.sections.is_active(id);
                        html! {
                            <a href={format!("#{}", id.anchor())}
                                class={classes!("drawer-link", active.then_some("active"))}
                                tabindex={if open { "0" } else { "-1" }}
                                onclick={navigate_callback(&app, id)}>
                                { id.label() }
                            </a>
                        }
                    }).collect::<Html>()
                }
            </nav>
            <button class="drawer-cta" onclick={brochure} tabindex={if open { "0" } else { "-1" }}>
                {"Download Brochure"}
            </button>
            <style>
                {r#"
                    .mobile-drawer {
                        position: fixed;
                        inset: 0;
                        z-index: 1100;
                        background: var(--navy);
                        display: flex;
                        flex-direction: column;
                        padding: 1.5rem;
                        transform: translateX(100%);
                        transition: transform 0.3s cubic-bezier(0.4, 0, 0.2, 1);
                        visibility: hidden;
                    }
                    .mobile-drawer.open {
                        transform: translateX(0);
                        visibility: visible;
                    }
                    .drawer-header {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        margin-bottom: 2rem;
                    }
                    .drawer-title {
                        font-family: var(--font-display);
                        color: var(--gold);
                        font-size: 1.4rem;
                    }
                    .drawer-close {
                        background: none;
                        border: none;
                        color: #fff;
                        font-size: 2rem;
                        cursor: pointer;
                    }
                    .drawer-links {
                        display: flex;
                        flex-direction: column;
                        gap: 0.25rem;
                        flex: 1;
                    }
                    .drawer-link {
                        color: rgba(255, 255, 255, 0.85);
                        text-decoration: none;
                        font-size: 1.25rem;
                        padding: 0.85rem 0;
                        border-bottom: 1px solid rgba(255, 255, 255, 0.08);
                    }
                    .drawer-link.active { color: var(--gold); }
                    .drawer-cta {
                        background: var(--gold);
                        color: var(--navy);
                        border: none;
                        border-radius: 999px;
                        padding: 1rem;
                        font-weight: 600;
                        font-size: 1rem;
                        margin-bottom: 4rem;
                    }
                "#}
            </style>
        </div>
    }
}
