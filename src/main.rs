use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod analytics;
mod config;
mod theme;
mod api {
    pub mod leads;
    pub mod models;
}
mod state {
    pub mod app_state;
    pub mod popup;
    pub mod sections;
    pub mod session;
    pub mod triggers;
    pub mod viewport;
}
mod components {
    pub mod bottom_nav;
    pub mod floating_contact;
    pub mod header;
    pub mod lead_form;
    pub mod lead_popup;
    pub mod mobile_drawer;
    pub mod nav;
    pub mod notification;
    pub mod reveal;
}
mod pages {
    pub mod landing;
    pub mod privacy;
}
mod admin {
    pub mod dashboard;
    pub mod lead_detail;
    pub mod lead_graph;
    pub mod lead_store;
}

use admin::dashboard::AdminDashboard;
use admin::lead_detail::LeadDetail;
use components::notification::ToastProvider;
use pages::landing::Landing;
use pages::privacy::PrivacyPolicy;
use state::app_state::AppStateProvider;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/privacy")]
    Privacy,
    #[at("/admin")]
    Admin,
    #[at("/admin/leads/:id")]
    AdminLead { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        }
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        }
        Route::Admin => {
            info!("Rendering Admin dashboard");
            html! { <AdminDashboard /> }
        }
        Route::AdminLead { id } => {
            info!("Rendering lead {}", id);
            html! { <LeadDetail {id} /> }
        }
        Route::NotFound => {
            info!("Rendering 404 page");
            html! {
                <div class="legal-content not-found">
                    <div>
                        <h1>{"Page not found"}</h1>
                        <Link<Route> to={Route::Home}>{"Back to Aurelia Heights"}</Link<Route>>
                    </div>
                </div>
            }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <ToastProvider>
            <AppStateProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </AppStateProvider>
        </ToastProvider>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    theme::install();

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
