use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent as DomMouseEvent};
use yew::prelude::*;

use crate::components::lead_form::LeadForm;
use crate::state::app_state::{use_app_state, AppAction};
use crate::state::popup::{PopupOptions, TriggerType};
use crate::state::triggers::{arm_timer_popup, ExitIntentDetector, GlooTimers, WindowListener};

/// Owns the passive popup triggers and renders whichever popup is active.
///
/// The timer is armed once per mount. The exit intent listener only exists
/// on desktop and only until it has fired or passive popups are suppressed,
/// so resizing to mobile or dismissing a popup removes it.
#[function_component(PopupHost)]
pub fn popup_host() -> Html {
    let app = use_app_state();

    {
        let app = app.clone();
        use_effect_with_deps(
            move |_| {
                let timer = arm_timer_popup(&GlooTimers, move || {
                    app.dispatch(AppAction::OpenPopup(TriggerType::Timer, PopupOptions::default()))
                });
                move || drop(timer)
            },
            (),
        );
    }

    let exit_armed = app.viewport.is_desktop()
        && !app.popup.flags().exit_intent_fired
        && !app.popup.passive_suppressed();
    {
        let app = app.clone();
        use_effect_with_deps(
            move |armed| {
                let listener = if *armed {
                    let mut detector = ExitIntentDetector::default();
                    WindowListener::new("mouseout", move |event: web_sys::Event| {
                        let Some(mouse) = event.dyn_ref::<DomMouseEvent>() else {
                            return;
                        };
                        let leaving = mouse.related_target().is_none();
                        if detector.on_mouse_out(mouse.client_y(), leaving) {
                            app.dispatch(AppAction::ExitIntent);
                        }
                    })
                } else {
                    None
                };
                move || drop(listener)
            },
            exit_armed,
        );
    }

    let open = app.popup.is_open();
    {
        let app = app.clone();
        use_effect_with_deps(
            move |open| {
                let listener = if *open {
                    WindowListener::new("keydown", move |event: web_sys::Event| {
                        let escape = event
                            .dyn_ref::<KeyboardEvent>()
                            .map(|k| k.key() == "Escape")
                            .unwrap_or(false);
                        if escape {
                            app.dispatch(AppAction::DismissPopup);
                        }
                    })
                } else {
                    None
                };
                move || drop(listener)
            },
            open,
        );
    }

    let Some(popup) = app.popup.active().cloned() else {
        return html! {};
    };

    let dismiss = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| app.dispatch(AppAction::DismissPopup))
    };
    let on_success = {
        let app = app.clone();
        Callback::from(move |_: ()| app.dispatch(AppAction::LeadCaptured))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="popup-backdrop" onclick={dismiss.clone()}>
            <div class="popup-card" role="dialog" aria-modal="true" aria-labelledby="popup-title" onclick={keep_open}>
                <button class="popup-close" onclick={dismiss} aria-label="Close">{"×"}</button>
                <h2 id="popup-title">{ popup.title.clone() }</h2>
                <p class="popup-subtitle">{ popup.content.subtitle }</p>
                <LeadForm
                    key={format!("{}:{}", popup.trigger.tag(), popup.source_tag)}
                    source={popup.content.source}
                    source_tag={Some(popup.source_tag.clone())}
                    asks_site_visit={popup.content.asks_site_visit}
                    submit_label={popup.content.cta}
                    {on_success}
                />
            </div>
            <style>
                {r#"
                    .popup-backdrop {
                        position: fixed;
                        inset: 0;
                        z-index: 1500;
                        background: rgba(6, 10, 20, 0.7);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        padding: 1rem;
                        animation: popupFade 0.25s ease-out;
                    }
                    .popup-card {
                        position: relative;
                        width: 100%;
                        max-width: 440px;
                        max-height: 90vh;
                        overflow-y: auto;
                        background: #fff;
                        color: var(--navy);
                        border-radius: 16px;
                        padding: 2rem;
                        box-shadow: 0 20px 60px rgba(0, 0, 0, 0.4);
                        border-top: 4px solid var(--gold);
                    }
                    .popup-card h2 {
                        font-family: var(--font-display);
                        margin: 0 0 0.5rem;
                    }
                    .popup-subtitle {
                        color: #5b6475;
                        margin-bottom: 1.5rem;
                    }
                    .popup-close {
                        position: absolute;
                        top: 0.75rem;
                        right: 1rem;
                        background: none;
                        border: none;
                        font-size: 1.75rem;
                        cursor: pointer;
                        color: #8a93a5;
                    }
                    @keyframes popupFade {
                        from { opacity: 0; }
                        to { opacity: 1; }
                    }
                "#}
            </style>
        </div>
    }
}
