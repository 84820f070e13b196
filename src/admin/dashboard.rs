use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::admin::lead_graph::LeadGraph;
use crate::admin::lead_store::{LeadListState, ListAction};
use crate::api::leads::list_leads;
use crate::api::models::{Lead, LeadQuery, LeadSort, LeadStatus};
use crate::components::notification::use_toaster;
use crate::Route;

/// How many recent leads the charts are computed from.
const STATS_SAMPLE: u32 = 500;

fn lead_row(lead: &Lead) -> Html {
    html! {
        <tr key={lead.id.clone()}>
            <td>
                <Link<Route> to={Route::AdminLead { id: lead.id.clone() }} classes="lead-link">
                    { &lead.name }
                </Link<Route>>
            </td>
            <td>{ &lead.phone }</td>
            <td>{ &lead.email }</td>
            <td>{ lead.source.label() }</td>
            <td><span class={classes!("status-pill", lead.status.as_str())}>{ lead.status.label() }</span></td>
            <td><span class={classes!("priority", lead.priority.as_str())}>{ lead.priority.label() }</span></td>
            <td>{ lead.created_at.format("%d %b %Y %H:%M").to_string() }</td>
        </tr>
    }
}

#[function_component]
pub fn AdminDashboard() -> Html {
    let list = use_reducer(LeadListState::default);
    let stats_sample = use_state(Vec::<Lead>::new);
    let search = use_state(String::new);
    let toaster = use_toaster();

    // First page on mount.
    {
        let list = list.clone();
        use_effect_with_deps(
            move |_| {
                list.dispatch(ListAction::Query(LeadQuery::default()));
                || ()
            },
            (),
        );
    }

    // Every new request number means the query changed or a reload was asked for.
    {
        let list = list.clone();
        let toaster = toaster.clone();
        let request = list.request;
        let query = list.query.clone();
        use_effect_with_deps(
            move |(request, query)| {
                let request = *request;
                if request > 0 {
                    let query = query.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        match list_leads(&query).await {
                            Ok(page) => list.dispatch(ListAction::Loaded { request, page }),
                            Err(e) => {
                                log::error!("failed to load leads: {}", e);
                                toaster.error(e.user_message());
                                list.dispatch(ListAction::Failed { request, error: e });
                            }
                        }
                    });
                }
                || ()
            },
            (request, query),
        );
    }

    {
        let stats_sample = stats_sample.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                let query = LeadQuery { per_page: STATS_SAMPLE, ..Default::default() };
                wasm_bindgen_futures::spawn_local(async move {
                    match list_leads(&query).await {
                        Ok(page) => stats_sample.set(page.leads),
                        Err(e) => {
                            log::warn!("lead stats unavailable: {}", e);
                            toaster.info("Lead charts are unavailable right now.");
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let set_query = {
        let list = list.clone();
        move |update: Box<dyn Fn(&mut LeadQuery)>| {
            let mut query = list.query.clone();
            update(&mut query);
            list.dispatch(ListAction::Query(query));
        }
    };

    let on_status = {
        let set_query = set_query.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let status = LeadStatus::parse(&select.value());
            set_query(Box::new(move |q: &mut LeadQuery| {
                q.status = status;
                q.page = 1;
            }));
        })
    };

    let on_sort = {
        let set_query = set_query.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let sort = LeadSort::parse(&select.value()).unwrap_or_default();
            set_query(Box::new(move |q: &mut LeadQuery| {
                q.sort = sort;
                q.page = 1;
            }));
        })
    };

    let on_search_input = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let on_search = {
        let set_query = set_query.clone();
        let search = search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = (*search).clone();
            set_query(Box::new(move |q: &mut LeadQuery| {
                q.search = text.clone();
                q.page = 1;
            }));
        })
    };

    let total_pages = list.page.as_ref().map(|p| p.page_count()).unwrap_or(1);
    let current_page = list.query.page;

    let go_to = |page: u32| {
        let set_query = set_query.clone();
        Callback::from(move |_: MouseEvent| set_query(Box::new(move |q: &mut LeadQuery| q.page = page)))
    };

    let on_reload = {
        let list = list.clone();
        Callback::from(move |_: MouseEvent| list.dispatch(ListAction::Reload))
    };

    html! {
        <div class="dashboard-container">
            <div class="dashboard-panel">
                <div class="panel-header">
                    <h1 class="panel-title">{"Leads"}</h1>
                    <Link<Route> to={Route::Home} classes="back-link">
                        {"Back to site"}
                    </Link<Route>>
                </div>

                <LeadGraph leads={(*stats_sample).clone()} />

                <div class="lead-filters">
                    <form class="lead-search" onsubmit={on_search}>
                        <input type="search" placeholder="Search name, phone or email"
                            value={(*search).clone()} oninput={on_search_input} />
                        <button type="submit">{"Search"}</button>
                    </form>
                    <select onchange={on_status}>
                        <option value="" selected={list.query.status.is_none()}>{"All statuses"}</option>
                        {
                            LeadStatus::ALL.iter().map(|status| html! {
                                <option value={status.as_str()} selected={list.query.status == Some(*status)}>
                                    { status.label() }
                                </option>
                            }).collect::<Html>()
                        }
                    </select>
                    <select onchange={on_sort}>
                        {
                            LeadSort::ALL.iter().map(|sort| html! {
                                <option value={sort.as_str()} selected={list.query.sort == *sort}>
                                    { sort.label() }
                                </option>
                            }).collect::<Html>()
                        }
                    </select>
                    <button class="reload-button" onclick={on_reload} disabled={list.loading}>{"Refresh"}</button>
                </div>

                {
                    match (&list.page, list.loading) {
                        (None, true) => html! { <div class="loading">{"Loading leads..."}</div> },
                        (None, false) => html! {
                            <div class="info-section error">
                                <span class="error-message">
                                    { list.error.as_ref().map(|e| e.user_message()).unwrap_or_else(|| "No leads loaded".to_string()) }
                                </span>
                            </div>
                        },
                        (Some(page), loading) if page.leads.is_empty() => html! {
                            <div class={classes!("empty-state", loading.then_some("stale"))}>{"No leads match these filters."}</div>
                        },
                        (Some(page), loading) => html! {
                            <div class={classes!("leads-table-container", loading.then_some("stale"))}>
                                <table class="leads-table">
                                    <thead>
                                        <tr>
                                            <th>{"Name"}</th>
                                            <th>{"Phone"}</th>
                                            <th>{"Email"}</th>
                                            <th>{"Source"}</th>
                                            <th>{"Status"}</th>
                                            <th>{"Priority"}</th>
                                            <th>{"Received"}</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        { page.leads.iter().map(lead_row).collect::<Html>() }
                                    </tbody>
                                </table>
                                <p class="lead-count">{ format!("{} leads", page.total) }</p>
                            </div>
                        },
                    }
                }

                <div class="pagination">
                    <button onclick={go_to(current_page.saturating_sub(1).max(1))} disabled={current_page <= 1}>
                        {"← Prev"}
                    </button>
                    <span>{ format!("Page {} of {}", current_page, total_pages) }</span>
                    <button onclick={go_to(current_page + 1)} disabled={current_page >= total_pages}>
                        {"Next →"}
                    </button>
                </div>
            </div>
            <style>
                {r#"
                    .dashboard-container {
                        min-height: 100vh;
                        background: #f5f6f8;
                        padding: 2rem;
                        color: var(--navy);
                    }
                    .dashboard-panel {
                        max-width: 1200px;
                        margin: 0 auto;
                        background: #fff;
                        border-radius: 12px;
                        padding: 2rem;
                        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.06);
                    }
                    .panel-header { display: flex; justify-content: space-between; align-items: center; }
                    .panel-title { font-family: var(--font-display); }
                    .back-link, .lead-link { color: var(--navy); font-weight: 600; }
                    .lead-filters { display: flex; flex-wrap: wrap; gap: 0.75rem; margin: 1.5rem 0; }
                    .lead-search { display: flex; gap: 0.5rem; flex: 1; min-width: 260px; }
                    .lead-search input { flex: 1; }
                    .lead-filters input, .lead-filters select, .lead-filters button {
                        padding: 0.55rem 0.8rem;
                        border: 1px solid #d4d8e0;
                        border-radius: 8px;
                        background: #fff;
                    }
                    .leads-table { width: 100%; border-collapse: collapse; }
                    .leads-table th, .leads-table td { text-align: left; padding: 0.7rem; border-bottom: 1px solid #eceef2; }
                    .stale { opacity: 0.5; }
                    .status-pill { padding: 0.2rem 0.6rem; border-radius: 999px; font-size: 0.8rem; background: #eceef2; }
                    .status-pill.new { background: #e3f0ff; }
                    .status-pill.contacted { background: #fff4d6; }
                    .status-pill.site_visit_scheduled { background: #efe3ff; }
                    .status-pill.converted { background: #dcf5e3; }
                    .status-pill.lost { background: #fde2e1; }
                    .priority.high { color: #c0392b; font-weight: 600; }
                    .pagination { display: flex; justify-content: center; align-items: center; gap: 1rem; margin-top: 1.5rem; }
                    .stat-cards { display: flex; gap: 1rem; margin: 1.5rem 0; }
                    .stat-card { flex: 1; background: var(--navy); color: #fff; border-radius: 10px; padding: 1rem; }
                    .stat-value { display: block; font-size: 1.8rem; color: var(--gold); }
                    .breakdowns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
                    .breakdowns ul { list-style: none; padding: 0; }
                    .breakdowns li { display: flex; justify-content: space-between; padding: 0.4rem 0; }
                    .error-message { color: #c0392b; }
                "#}
            </style>
        </div>
    }
}
