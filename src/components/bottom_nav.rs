//! Bottom navigation bar for phones and tablets (< 900px). Replaces the
//! header; the menu button opens the drawer.

use yew::prelude::*;

use crate::components::nav::navigate_callback;
use crate::config::SiteConfig;
use crate::state::app_state::{use_app_state, AppAction};
use crate::state::popup::{PopupOptions, TriggerType};
use crate::state::sections::SectionId;

#[function_component(BottomNavigation)]
pub fn bottom_navigation() -> Html {
    let app = use_app_state();
    let site = SiteConfig::from_env();

    let enquire = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| {
            app.dispatch(AppAction::OpenPopup(TriggerType::Price, PopupOptions::default()))
        })
    };
    let toggle_menu = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| app.dispatch(AppAction::ToggleDrawer))
    };

    let section_item = |id: SectionId, icon: &'static str| {
        let active = app.sections.is_active(id);
        html! {
            <a href={format!("#{}", id.anchor())}
                class={classes!("bottom-nav-item", active.then_some("active"))}
                onclick={navigate_callback(&app, id)}>
                <span class="bottom-nav-icon">{ icon }</span>
                <span class="bottom-nav-label">{ id.label() }</span>
            </a>
        }
    };

    html! {
        <nav class="bottom-nav">
            { section_item(SectionId::Home, "🏠") }
            { section_item(SectionId::Pricing, "₹") }
            <a href={site.tel_link()} class="bottom-nav-item call">
                <span class="bottom-nav-icon">{"📞"}</span>
                <span class="bottom-nav-label">{"Call"}</span>
            </a>
            <button class="bottom-nav-item enquire" onclick={enquire}>
                <span class="bottom-nav-icon">{"✉"}</span>
                <span class="bottom-nav-label">{"Enquire"}</span>
            </button>
            <button class={classes!("bottom-nav-item", app.drawer_open.then_some("active"))}
                onclick={toggle_menu}
                aria-label="Menu"
                aria-expanded={app.drawer_open.to_string()}>
                <span class="bottom-nav-icon">{"☰"}</span>
                <span class="bottom-nav-label">{"Menu"}</span>
            </button>
            <style>
                {r#"
                    .bottom-nav {
                        position: fixed;
                        bottom: 0;
                        left: 0;
                        right: 0;
                        z-index: 1000;
                        display: flex;
                        justify-content: space-around;
                        background: var(--navy);
                        border-top: 1px solid rgba(201, 162, 77, 0.3);
                        padding: 0.4rem 0 calc(0.4rem + env(safe-area-inset-bottom));
                    }
                    .bottom-nav-item {
                        flex: 1;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        gap: 2px;
                        color: rgba(255, 255, 255, 0.7);
                        text-decoration: none;
                        background: none;
                        border: none;
                        font: inherit;
                        font-size: 0.7rem;
                        cursor: pointer;
                    }
                    .bottom-nav-item.active { color: var(--gold); }
                    .bottom-nav-item.enquire .bottom-nav-icon {
                        background: var(--gold);
                        color: var(--navy);
                        border-radius: 50%;
                        width: 2.2rem;
                        height: 2.2rem;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        margin-top: -1rem;
                    }
                    .bottom-nav-icon { font-size: 1.2rem; }
                "#}
            </style>
        </nav>
    }
}
