use yew::prelude::*;
use yew_hooks::use_window_scroll;

use crate::config::SiteConfig;
use crate::state::app_state::use_app_state;
use crate::state::viewport::floating_contact_visible;

/// Call / WhatsApp shortcuts that appear once the hero is scrolled away.
#[function_component(FloatingContact)]
pub fn floating_contact() -> Html {
    let app = use_app_state();
    let (_, scroll_y) = use_window_scroll();
    let site = SiteConfig::from_env();
    let visible = floating_contact_visible(scroll_y);

    html! {
        <div class={classes!(
                "floating-contact",
                visible.then_some("visible"),
                (!app.viewport.is_desktop()).then_some("above-bottom-nav")
            )}
            aria-hidden={(!visible).to_string()}>
            <a class="floating-button whatsapp"
                href={site.whatsapp_link("Hi, I'm interested in Aurelia Heights. Please share details.")}
                target="_blank"
                rel="noopener noreferrer"
                aria-label="Chat on WhatsApp">
                {"💬"}
            </a>
            <a class="floating-button call" href={site.tel_link()} aria-label="Call sales">
                {"📞"}
            </a>
            <style>
                {r#"
                    .floating-contact {
                        position: fixed;
                        right: 1.25rem;
                        bottom: 1.5rem;
                        z-index: 900;
                        display: flex;
                        flex-direction: column;
                        gap: 0.75rem;
                        opacity: 0;
                        transform: translateY(20px);
                        pointer-events: none;
                        transition: opacity 0.3s ease, transform 0.3s ease;
                    }
                    .floating-contact.visible {
                        opacity: 1;
                        transform: translateY(0);
                        pointer-events: auto;
                    }
                    .floating-contact.above-bottom-nav { bottom: 5.5rem; }
                    .floating-button {
                        width: 3.25rem;
                        height: 3.25rem;
                        border-radius: 50%;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        font-size: 1.4rem;
                        text-decoration: none;
                        box-shadow: 0 6px 18px rgba(0, 0, 0, 0.3);
                    }
                    .floating-button.whatsapp { background: #25d366; }
                    .floating-button.call { background: var(--gold); }
                "#}
            </style>
        </div>
    }
}
