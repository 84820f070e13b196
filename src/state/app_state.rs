//! Shared UI state for the landing page.
//!
//! Components read it through [`use_app_state`] and change it only by
//! dispatching [`AppAction`]s, so every transition goes through
//! [`AppState::reduce`] and can be exercised without a browser.

use std::rc::Rc;

use yew::prelude::*;
use yew_hooks::use_window_size;

use crate::state::popup::{OpenOutcome, PopupOptions, PopupSequencer, TriggerType};
use crate::state::sections::{SectionId, SectionTracker, VisibilityEvent};
use crate::state::session::SessionFlags;
use crate::state::viewport::{ViewportClass, DESKTOP_MIN_WIDTH};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub viewport: ViewportClass,
    pub sections: SectionTracker,
    pub popup: PopupSequencer,
    pub drawer_open: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    Resize(f64),
    Visibility(Vec<VisibilityEvent>),
    /// Nav click: optimistic highlight, drawer closes.
    NavigateTo(SectionId),
    OpenPopup(TriggerType, PopupOptions),
    ExitIntent,
    DismissPopup,
    LeadCaptured,
    ToggleDrawer,
    CloseDrawer,
}

impl AppState {
    pub fn new(width: f64, flags: SessionFlags) -> Self {
        Self {
            viewport: ViewportClass::from_width(width),
            popup: PopupSequencer::from_flags(flags),
            ..Default::default()
        }
    }
}

fn log_outcome(trigger: TriggerType, outcome: OpenOutcome) {
    if outcome.opened() {
        log::info!("popup {} opened ({:?})", trigger.tag(), outcome);
    } else {
        log::debug!("popup {} not opened: {:?}", trigger.tag(), outcome);
    }
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AppAction::Resize(width) => {
                next.viewport = ViewportClass::from_width(width);
            }
            AppAction::Visibility(events) => {
                for event in events {
                    next.sections.apply(event);
                }
            }
            AppAction::NavigateTo(id) => {
                next.sections.activate(id);
                next.drawer_open = false;
            }
            AppAction::OpenPopup(trigger, options) => {
                let outcome = next.popup.request_open(trigger, options);
                log_outcome(trigger, outcome);
            }
            AppAction::ExitIntent => {
                let outcome = next.popup.exit_intent();
                log_outcome(TriggerType::ExitIntent, outcome);
            }
            AppAction::DismissPopup => {
                if let Some(trigger) = next.popup.dismiss() {
                    log::info!("popup {} dismissed", trigger.tag());
                }
            }
            AppAction::LeadCaptured => {
                next.popup.converted();
            }
            AppAction::ToggleDrawer => {
                next.drawer_open = !next.drawer_open;
            }
            AppAction::CloseDrawer => {
                next.drawer_open = false;
            }
        }

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

pub type AppContext = UseReducerHandle<AppState>;

fn window_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(DESKTOP_MIN_WIDTH)
}

#[derive(Properties, PartialEq)]
pub struct AppStateProviderProps {
    pub children: Children,
}

#[function_component(AppStateProvider)]
pub fn app_state_provider(props: &AppStateProviderProps) -> Html {
    let state = use_reducer(|| AppState::new(window_width(), SessionFlags::load()));
    let (width, _) = use_window_size();

    {
        let state = state.clone();
        use_effect_with_deps(
            move |width| {
                state.dispatch(AppAction::Resize(*width));
                || ()
            },
            width,
        );
    }

    // Mirror popup suppression into sessionStorage.
    {
        let flags = state.popup.flags();
        use_effect_with_deps(
            move |flags| {
                flags.save();
                || ()
            },
            flags,
        );
    }

    html! {
        <ContextProvider<AppContext> context={state}>
            { props.children.clone() }
        </ContextProvider<AppContext>>
    }
}

#[hook]
pub fn use_app_state() -> AppContext {
    use_context::<AppContext>().expect("use_app_state called outside AppStateProvider")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::triggers::arm_timer_popup;
    use crate::state::triggers::fake::ManualClock;
    use crate::state::viewport::NavVariant;
    use std::cell::RefCell;

    fn reduce(state: Rc<AppState>, action: AppAction) -> Rc<AppState> {
        state.reduce(action)
    }

    /// Stand-in for the reducer handle: a shared cell the timer can dispatch into.
    #[derive(Clone)]
    struct Store(Rc<RefCell<Rc<AppState>>>);

    impl Store {
        fn new(state: AppState) -> Self {
            Store(Rc::new(RefCell::new(Rc::new(state))))
        }

        fn dispatch(&self, action: AppAction) {
            let current = self.0.borrow().clone();
            *self.0.borrow_mut() = current.reduce(action);
        }

        fn get(&self) -> Rc<AppState> {
            self.0.borrow().clone()
        }
    }

    #[test]
    fn resize_swaps_nav_variant() {
        let state = Rc::new(AppState::new(1280.0, SessionFlags::default()));
        assert_eq!(state.viewport.nav_variant(), NavVariant::Header);
        let state = reduce(state, AppAction::Resize(480.0));
        assert_eq!(state.viewport.nav_variant(), NavVariant::BottomBar);
    }

    #[test]
    fn unchanged_state_keeps_the_same_rc() {
        let state = Rc::new(AppState::new(1280.0, SessionFlags::default()));
        let next = reduce(state.clone(), AppAction::Resize(1300.0));
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn drawer_is_independent_of_width() {
        let state = Rc::new(AppState::new(400.0, SessionFlags::default()));
        let state = reduce(state, AppAction::ToggleDrawer);
        assert!(state.drawer_open);
        assert_eq!(state.viewport.nav_variant(), NavVariant::BottomBar);
        let state = reduce(state, AppAction::Resize(1200.0));
        assert!(state.drawer_open);
    }

    #[test]
    fn nav_click_highlights_and_closes_drawer() {
        let state = Rc::new(AppState::new(400.0, SessionFlags::default()));
        let state = reduce(state, AppAction::ToggleDrawer);
        let state = reduce(state, AppAction::NavigateTo(SectionId::Amenities));
        assert!(!state.drawer_open);
        assert_eq!(state.sections.active(), Some(SectionId::Amenities));
    }

    #[test]
    fn visibility_events_fold_into_active_section() {
        let state = Rc::new(AppState::default());
        let state = reduce(
            state,
            AppAction::Visibility(vec![
                VisibilityEvent::Entered(SectionId::Home),
                VisibilityEvent::Exited(SectionId::Home),
                VisibilityEvent::Entered(SectionId::Overview),
            ]),
        );
        assert_eq!(state.sections.active(), Some(SectionId::Overview));
    }

    #[test]
    fn timer_popup_opens_once_then_stays_suppressed() {
        let clock = ManualClock::default();
        let store = Store::new(AppState::new(1280.0, SessionFlags::default()));

        let s = store.clone();
        let _mounted = arm_timer_popup(&clock, move || {
            s.dispatch(AppAction::OpenPopup(TriggerType::Timer, PopupOptions::default()))
        });
        clock.advance(30_000);
        assert_eq!(store.get().popup.active().map(|p| p.trigger), Some(TriggerType::Timer));

        store.dispatch(AppAction::DismissPopup);
        assert!(!store.get().popup.is_open());

        // next page view in the same session remounts the host
        let restored = Store::new(AppState::new(1280.0, store.get().popup.flags()));
        let s = restored.clone();
        let _remounted = arm_timer_popup(&clock, move || {
            s.dispatch(AppAction::OpenPopup(TriggerType::Timer, PopupOptions::default()))
        });
        clock.advance(30_000);
        assert!(!restored.get().popup.is_open());

        restored.dispatch(AppAction::OpenPopup(TriggerType::Brochure, PopupOptions::default()));
        assert_eq!(restored.get().popup.active().map(|p| p.trigger), Some(TriggerType::Brochure));
    }

    #[test]
    fn unmounted_host_never_opens_timer_popup() {
        let clock = ManualClock::default();
        let store = Store::new(AppState::default());
        let s = store.clone();
        let mounted = arm_timer_popup(&clock, move || {
            s.dispatch(AppAction::OpenPopup(TriggerType::Timer, PopupOptions::default()))
        });
        clock.advance(5_000);
        drop(mounted);
        clock.advance(60_000);
        assert!(!store.get().popup.is_open());
    }

    #[test]
    fn exit_intent_after_explicit_popup_is_busy() {
        let state = Rc::new(AppState::default());
        let state = reduce(state, AppAction::OpenPopup(TriggerType::SiteVisit, PopupOptions::default()));
        let state = reduce(state, AppAction::ExitIntent);
        assert_eq!(state.popup.active().map(|p| p.trigger), Some(TriggerType::SiteVisit));
    }

    #[test]
    fn lead_capture_closes_popup() {
        let state = Rc::new(AppState::default());
        let state = reduce(state, AppAction::OpenPopup(TriggerType::Price, PopupOptions::default()));
        let state = reduce(state, AppAction::LeadCaptured);
        assert!(!state.popup.is_open());
        assert!(state.popup.flags().popup_dismissed);
    }
}
