use yew::prelude::*;

use crate::components::bottom_nav::BottomNavigation;
use crate::components::header::Header;
use crate::components::mobile_drawer::MobileDrawer;
use crate::state::app_state::{use_app_state, AppAction, AppContext};
use crate::state::sections::SectionId;
use crate::state::viewport::NavVariant;

/// Sections linked from the header and drawer.
pub const NAV_SECTIONS: [SectionId; 6] = [
    SectionId::Overview,
    SectionId::Amenities,
    SectionId::FloorPlans,
    SectionId::Gallery,
    SectionId::Location,
    SectionId::Pricing,
];

pub fn scroll_to_section(id: SectionId) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id.anchor()));
    match element {
        Some(element) => element.scroll_into_view(),
        None => log::warn!("no section element #{}", id.anchor()),
    }
}

/// Click handler shared by every nav surface: highlight first, then scroll.
pub fn navigate_callback(app: &AppContext, id: SectionId) -> Callback<MouseEvent> {
    let app = app.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        app.dispatch(AppAction::NavigateTo(id));
        scroll_to_section(id);
    })
}

/// Mounts exactly one persistent nav for the current width, plus the drawer
/// overlay.
#[function_component(ResponsiveNav)]
pub fn responsive_nav() -> Html {
    let app = use_app_state();

    let persistent = match app.viewport.nav_variant() {
        NavVariant::Header => html! { <Header /> },
        NavVariant::BottomBar => html! { <BottomNavigation /> },
    };

    html! {
        <>
            { persistent }
            <MobileDrawer />
        </>
    }
}
