use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::SiteConfig;
use crate::Route;

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    let site = SiteConfig::from_env();

    html! {
        <div class="legal-content">
            <div>
                <h1>{"Privacy Policy"}</h1>
                <p class="legal-updated">{"Last updated: 1 October 2026"}</p>

                <section>
                    <h2>{"What we collect"}</h2>
                    <p>
                        {"When you fill in a form on this site we receive your name, email address, phone \
                          number, any message you write and, if you book a visit, your preferred date and time. \
                          We also record which form you used and the campaign parameters in the page address \
                          (utm_source, utm_medium, utm_campaign, utm_term, utm_content)."}
                    </p>
                </section>

                <section>
                    <h2>{"How we use it"}</h2>
                    <p>
                        {"Your details are used only to contact you about Aurelia Heights: to send the \
                          brochure or price sheet you asked for, arrange site visits, and follow up on your \
                          enquiry. We do not sell your information."}
                    </p>
                </section>

                <section>
                    <h2>{"Advertising measurement"}</h2>
                    <p>
                        {"This site uses Google Ads and Meta Pixel to measure whether our advertising leads \
                          to enquiries. A conversion event is sent when a form is submitted. It does not \
                          contain your contact details."}
                    </p>
                </section>

                <section>
                    <h2>{"Browser storage"}</h2>
                    <p>
                        {"We remember for the length of your browser session whether you closed one of our \
                          offer popups, so we do not show it again. This is cleared when you close the tab."}
                    </p>
                </section>

                <section>
                    <h2>{"Your choices"}</h2>
                    <p>
                        {"To have your details corrected or removed, call us on "}
                        <a href={site.tel_link()}>{ site.sales_phone }</a>
                        {" and we will act on it within 30 days."}
                    </p>
                </section>

                <Link<Route> to={Route::Home} classes="back-link">{"← Back to Aurelia Heights"}</Link<Route>>
            </div>
            <style>
                {r#"
                    .legal-content {
                        min-height: 100vh;
                        background: var(--navy);
                        padding: 4rem 2rem;
                        color: #f4f1ea;
                        display: flex;
                        justify-content: center;
                    }
                    .legal-content > div {
                        max-width: 760px;
                        background: rgba(255, 255, 255, 0.04);
                        border: 1px solid rgba(201, 169, 97, 0.2);
                        border-radius: 16px;
                        padding: 3rem;
                    }
                    .legal-content h1 {
                        font-family: var(--font-display);
                        color: var(--gold);
                        margin-bottom: 0.5rem;
                    }
                    .legal-content h2 {
                        color: var(--gold);
                        font-size: 1.2rem;
                        margin-top: 2rem;
                    }
                    .legal-content p { line-height: 1.7; opacity: 0.9; }
                    .legal-content a { color: var(--gold); }
                    .legal-updated { font-size: 0.85rem; opacity: 0.6; }
                    .back-link { display: inline-block; margin-top: 2.5rem; }
                "#}
            </style>
        </div>
    }
}
