use std::cell::RefCell;

use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::admin::lead_store::{DetailAction, EditRequest, LeadDetailState, LeadEdit, PENDING_NOTE_PREFIX};
use crate::api::leads::{add_note, delete_lead, get_lead, update_lead};
use crate::api::models::{Lead, LeadPriority, LeadStatus};
use crate::components::notification::use_toaster;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LeadDetailProps {
    pub id: String,
}

fn info_row(label: &str, value: Html) -> Html {
    html! {
        <div class="info-row">
            <span class="info-label">{ label.to_string() }</span>
            <span class="info-value">{ value }</span>
        </div>
    }
}

fn contact_card(lead: &Lead) -> Html {
    let visit = match &lead.site_visit {
        Some(visit) => format!(
            "{} ({}){}",
            visit.date.format("%a %d %b %Y"),
            visit.time_slot.label(),
            if visit.needs_pickup { ", pickup requested" } else { "" }
        ),
        None => "Not requested".to_string(),
    };
    let campaign = [
        lead.utm.utm_source.as_deref(),
        lead.utm.utm_medium.as_deref(),
        lead.utm.utm_campaign.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" / ");

    html! {
        <div class="lead-card">
            { info_row("Phone", html! { <a href={format!("tel:{}", lead.phone)}>{ &lead.phone }</a> }) }
            { info_row("Email", html! { <a href={format!("mailto:{}", lead.email)}>{ &lead.email }</a> }) }
            { info_row("Source", html! { <>{ lead.source.label() }</> }) }
            { info_row("Campaign", html! { <>{ if campaign.is_empty() { "Direct".to_string() } else { campaign } }</> }) }
            { info_row("Site visit", html! { <>{ visit }</> }) }
            { info_row("Received", html! { <>{ lead.created_at.format("%d %b %Y %H:%M UTC").to_string() }</> }) }
            {
                match &lead.message {
                    Some(message) => info_row("Message", html! { <>{ message.clone() }</> }),
                    None => html! {},
                }
            }
        </div>
    }
}

fn next_seq(counter: &RefCell<u32>) -> u32 {
    let mut seq = counter.borrow_mut();
    *seq += 1;
    *seq
}

#[function_component]
pub fn LeadDetail(props: &LeadDetailProps) -> Html {
    let detail = use_reducer(LeadDetailState::default);
    let note_draft = use_state(String::new);
    let edit_seq = use_mut_ref(|| 0u32);
    let confirm_delete = use_state(|| false);
    let deleting = use_state(|| false);
    let toaster = use_toaster();
    let navigator = use_navigator();

    {
        let detail = detail.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |id: &String| {
                let id = id.clone();
                detail.dispatch(DetailAction::Fetch);
                wasm_bindgen_futures::spawn_local(async move {
                    match get_lead(&id).await {
                        Ok(lead) => detail.dispatch(DetailAction::Loaded(lead)),
                        Err(e) => {
                            log::error!("failed to load lead {}: {}", id, e);
                            toaster.error(e.user_message());
                            detail.dispatch(DetailAction::LoadFailed(e));
                        }
                    }
                });
                || ()
            },
            props.id.clone(),
        );
    }

    // Shows the edit at once; the reply either confirms it or drops it.
    let apply_edit = {
        let detail = detail.clone();
        let toaster = toaster.clone();
        let edit_seq = edit_seq.clone();
        let id = props.id.clone();
        Callback::from(move |edit: LeadEdit| {
            if detail.lead.is_none() {
                return;
            }
            let seq = next_seq(&edit_seq);
            let request = edit.request();
            let done = edit.describe();
            detail.dispatch(DetailAction::Edit { seq, edit });

            let detail = detail.clone();
            let toaster = toaster.clone();
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match request {
                    EditRequest::Patch(patch) => update_lead(&id, &patch).await,
                    EditRequest::Note(note) => add_note(&id, &note).await,
                };
                match result {
                    Ok(lead) => {
                        log::info!("lead {} updated: {}", id, done);
                        detail.dispatch(DetailAction::Synced { seq, lead });
                        toaster.success(done);
                    }
                    Err(e) => {
                        log::error!("lead {} update failed: {}", id, e);
                        detail.dispatch(DetailAction::Rejected { seq });
                        toaster.error(e.user_message());
                    }
                }
            });
        })
    };

    let on_status = {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(status) = LeadStatus::parse(&select.value()) {
                apply_edit.emit(LeadEdit::Status(status));
            }
        })
    };

    let on_priority = {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(priority) = LeadPriority::parse(&select.value()) {
                apply_edit.emit(LeadEdit::Priority(priority));
            }
        })
    };

    let on_follow_up = {
        let apply_edit = apply_edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let date = NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d").ok();
            apply_edit.emit(LeadEdit::FollowUp(date));
        })
    };

    let on_clear_follow_up = {
        let apply_edit = apply_edit.clone();
        Callback::from(move |_: MouseEvent| apply_edit.emit(LeadEdit::FollowUp(None)))
    };

    let on_note_input = {
        let note_draft = note_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            note_draft.set(input.value());
        })
    };

    let on_add_note = {
        let apply_edit = apply_edit.clone();
        let note_draft = note_draft.clone();
        let edit_seq = edit_seq.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if note_draft.trim().is_empty() {
                return;
            }
            // Placeholder id only; the edit itself takes the next number.
            let placeholder = *edit_seq.borrow() + 1;
            apply_edit.emit(LeadEdit::pending_note(&note_draft, placeholder));
            note_draft.set(String::new());
        })
    };

    let on_delete_click = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_: MouseEvent| confirm_delete.set(true))
    };

    let on_cancel_delete = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_: MouseEvent| confirm_delete.set(false))
    };

    let on_confirm_delete = {
        let detail = detail.clone();
        let confirm_delete = confirm_delete.clone();
        let deleting = deleting.clone();
        let toaster = toaster.clone();
        let navigator = navigator.clone();
        let id = props.id.clone();
        Callback::from(move |_: MouseEvent| {
            if *deleting {
                return;
            }
            deleting.set(true);
            let detail = detail.clone();
            let confirm_delete = confirm_delete.clone();
            let deleting = deleting.clone();
            let toaster = toaster.clone();
            let navigator = navigator.clone();
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match delete_lead(&id).await {
                    Ok(()) => {
                        log::info!("lead {} deleted", id);
                        detail.dispatch(DetailAction::Deleted);
                        toaster.success("Lead deleted");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Admin);
                        }
                    }
                    Err(e) => {
                        log::error!("failed to delete lead {}: {}", id, e);
                        toaster.error(e.user_message());
                    }
                }
                deleting.set(false);
                confirm_delete.set(false);
            });
        })
    };

    let back = html! {
        <Link<Route> to={Route::Admin} classes="back-link">{"← All leads"}</Link<Route>>
    };

    let Some(lead) = detail.lead.clone() else {
        return html! {
            <div class="dashboard-container">
                <div class="dashboard-panel">
                    { back }
                    {
                        if detail.loading {
                            html! { <div class="loading">{"Loading lead..."}</div> }
                        } else {
                            let message = detail
                                .error
                                .as_ref()
                                .map(|e| e.user_message())
                                .unwrap_or_else(|| "Lead not available".to_string());
                            html! { <div class="info-section error"><span class="error-message">{ message }</span></div> }
                        }
                    }
                </div>
            </div>
        };
    };

    let follow_up_value = lead.follow_up.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    html! {
        <div class="dashboard-container">
            <div class="dashboard-panel lead-detail">
                <div class="panel-header">
                    <div>
                        { back }
                        <h1 class="panel-title">{ &lead.name }</h1>
                    </div>
                    <button class="delete-button" onclick={on_delete_click} disabled={detail.deleted}>
                        {"Delete lead"}
                    </button>
                </div>

                { contact_card(&lead) }

                <div class="lead-controls">
                    <label>
                        <span>{"Status"}</span>
                        <select onchange={on_status}>
                            {
                                LeadStatus::ALL.iter().map(|status| html! {
                                    <option value={status.as_str()} selected={lead.status == *status}>
                                        { status.label() }
                                    </option>
                                }).collect::<Html>()
                            }
                        </select>
                    </label>
                    <label>
                        <span>{"Priority"}</span>
                        <select onchange={on_priority}>
                            {
                                LeadPriority::ALL.iter().map(|priority| html! {
                                    <option value={priority.as_str()} selected={lead.priority == *priority}>
                                        { priority.label() }
                                    </option>
                                }).collect::<Html>()
                            }
                        </select>
                    </label>
                    <label>
                        <span>{"Follow-up"}</span>
                        <div class="follow-up">
                            <input type="date" value={follow_up_value} onchange={on_follow_up} />
                            if lead.follow_up.is_some() {
                                <button class="link-button" onclick={on_clear_follow_up}>{"Clear"}</button>
                            }
                        </div>
                    </label>
                    if detail.saving() {
                        <span class="saving">{"Saving..."}</span>
                    }
                </div>

                <div class="notes">
                    <h2>{"Notes"}</h2>
                    if lead.notes.is_empty() {
                        <p class="empty-state">{"No notes yet."}</p>
                    }
                    <ul>
                        {
                            lead.notes.iter().map(|note| html! {
                                <li key={note.id.clone()} class={classes!("note", note.id.starts_with(PENDING_NOTE_PREFIX).then_some("pending"))}>
                                    <p>{ &note.body }</p>
                                    <span class="note-meta">
                                        { format!(
                                            "{} · {}",
                                            note.author.as_deref().unwrap_or("You"),
                                            note.created_at.format("%d %b %H:%M")
                                        ) }
                                    </span>
                                </li>
                            }).collect::<Html>()
                        }
                    </ul>
                    <form class="note-form" onsubmit={on_add_note}>
                        <textarea placeholder="Add a note about this call or visit"
                            value={(*note_draft).clone()} oninput={on_note_input} rows="3" />
                        <button type="submit" disabled={note_draft.trim().is_empty()}>{"Add note"}</button>
                    </form>
                </div>
            </div>

            if *confirm_delete {
                <div class="modal-overlay">
                    <div class="modal-content">
                        <h3>{"Confirm Delete"}</h3>
                        <p>{ format!("Are you sure you want to delete the lead for {}?", lead.name) }</p>
                        <p>{"This action cannot be undone."}</p>
                        <div class="modal-buttons">
                            <button onclick={on_cancel_delete} class="cancel-button">{"Cancel"}</button>
                            <button onclick={on_confirm_delete} class="delete-button" disabled={*deleting}>
                                { if *deleting { "Deleting..." } else { "Delete" } }
                            </button>
                        </div>
                    </div>
                </div>
            }
            <style>
                {r#"
                    .lead-card {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
                        gap: 0.75rem 2rem;
                        margin: 1.5rem 0;
                    }
                    .info-row { display: flex; flex-direction: column; }
                    .info-label { font-size: 0.75rem; text-transform: uppercase; color: #7a8194; }
                    .lead-controls { display: flex; flex-wrap: wrap; gap: 1.25rem; align-items: flex-end; }
                    .lead-controls label { display: flex; flex-direction: column; gap: 0.3rem; }
                    .lead-controls select, .lead-controls input { padding: 0.5rem; border: 1px solid #d4d8e0; border-radius: 8px; }
                    .follow-up { display: flex; gap: 0.5rem; }
                    .link-button { background: none; border: none; color: #2c5bd6; cursor: pointer; }
                    .saving { font-size: 0.85rem; color: #7a8194; }
                    .notes ul { list-style: none; padding: 0; }
                    .note { border-left: 3px solid var(--gold); padding: 0.5rem 1rem; margin-bottom: 0.75rem; background: #fafbfc; }
                    .note.pending { opacity: 0.6; }
                    .note-meta { font-size: 0.75rem; color: #7a8194; }
                    .note-form { display: flex; flex-direction: column; gap: 0.5rem; }
                    .note-form textarea { padding: 0.75rem; border: 1px solid #d4d8e0; border-radius: 8px; }
                    .delete-button { background: #c0392b; color: #fff; border: none; border-radius: 8px; padding: 0.6rem 1.2rem; cursor: pointer; }
                    .cancel-button { background: #eceef2; border: none; border-radius: 8px; padding: 0.6rem 1.2rem; cursor: pointer; }
                    .modal-overlay {
                        position: fixed;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.5);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        z-index: 1000;
                    }
                    .modal-content { background: #fff; border-radius: 12px; padding: 2rem; max-width: 420px; }
                    .modal-buttons { display: flex; justify-content: flex-end; gap: 0.75rem; margin-top: 1.5rem; }
                "#}
            </style>
        </div>
    }
}
