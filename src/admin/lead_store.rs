//! Client-side state for the admin lead screens.
//!
//! Both reducers keep the last copy the server confirmed. Failures are
//! recorded beside that copy instead of replacing it. On the detail screen
//! the lead shown is the confirmed copy with every unanswered edit replayed
//! on top, so a rejected edit simply drops out of the replay.

use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use yew::prelude::*;

use crate::api::leads::ApiError;
use crate::api::models::{Lead, LeadNote, LeadPage, LeadPatch, LeadPriority, LeadQuery, LeadStatus, NewNote};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadListState {
    pub query: LeadQuery,
    pub page: Option<LeadPage>,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Bumped per request so a slow response for an old query is dropped.
    pub request: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListAction {
    Query(LeadQuery),
    Reload,
    Loaded { request: u64, page: LeadPage },
    Failed { request: u64, error: ApiError },
}

impl Reducible for LeadListState {
    type Action = ListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ListAction::Query(query) => {
                next.query = query;
                next.loading = true;
                next.request += 1;
            }
            ListAction::Reload => {
                next.loading = true;
                next.request += 1;
            }
            ListAction::Loaded { request, page } => {
                if request != next.request {
                    log::debug!("dropping stale lead page for request {}", request);
                    return self;
                }
                next.page = Some(page);
                next.loading = false;
                next.error = None;
            }
            ListAction::Failed { request, error } => {
                if request != next.request {
                    return self;
                }
                next.loading = false;
                next.error = Some(error);
            }
        }
        Rc::new(next)
    }
}

/// A single change made from the detail screen.
#[derive(Clone, Debug, PartialEq)]
pub enum LeadEdit {
    Status(LeadStatus),
    Priority(LeadPriority),
    FollowUp(Option<NaiveDate>),
    AddNote(LeadNote),
}

/// What has to be sent to the server for an edit.
#[derive(Clone, Debug, PartialEq)]
pub enum EditRequest {
    Patch(LeadPatch),
    Note(NewNote),
}

pub const PENDING_NOTE_PREFIX: &str = "pending-";

impl LeadEdit {
    /// Note shown immediately while the real one is being created.
    pub fn pending_note(body: &str, seq: u32) -> LeadEdit {
        LeadEdit::AddNote(LeadNote {
            id: format!("{}{}", PENDING_NOTE_PREFIX, seq),
            body: body.trim().to_string(),
            author: None,
            created_at: Utc::now(),
        })
    }

    pub fn apply(&self, lead: &mut Lead) {
        match self {
            LeadEdit::Status(status) => lead.status = *status,
            LeadEdit::Priority(priority) => lead.priority = *priority,
            LeadEdit::FollowUp(date) => lead.follow_up = *date,
            LeadEdit::AddNote(note) => lead.notes.push(note.clone()),
        }
    }

    pub fn request(&self) -> EditRequest {
        match self {
            LeadEdit::Status(status) => EditRequest::Patch(LeadPatch {
                status: Some(*status),
                ..Default::default()
            }),
            LeadEdit::Priority(priority) => EditRequest::Patch(LeadPatch {
                priority: Some(*priority),
                ..Default::default()
            }),
            LeadEdit::FollowUp(date) => EditRequest::Patch(LeadPatch {
                follow_up: Some(*date),
                ..Default::default()
            }),
            LeadEdit::AddNote(note) => EditRequest::Note(NewNote { body: note.body.clone() }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LeadEdit::Status(status) => format!("Status set to {}", status.label()),
            LeadEdit::Priority(priority) => format!("Priority set to {}", priority.label()),
            LeadEdit::FollowUp(Some(date)) => format!("Follow-up set for {}", date.format("%d %b %Y")),
            LeadEdit::FollowUp(None) => "Follow-up cleared".to_string(),
            LeadEdit::AddNote(_) => "Note added".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingEdit {
    pub seq: u32,
    pub edit: LeadEdit,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadDetailState {
    /// What the screen shows: `confirmed` plus every pending edit.
    pub lead: Option<Lead>,
    /// Newest copy the server returned.
    pub confirmed: Option<Lead>,
    /// Edits sent but not yet answered, oldest first.
    pub pending: Vec<PendingEdit>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub deleted: bool,
}

impl LeadDetailState {
    pub fn saving(&self) -> bool {
        !self.pending.is_empty()
    }

    fn rebuild(&mut self) {
        self.lead = self.confirmed.clone().map(|mut lead| {
            for pending in &self.pending {
                pending.edit.apply(&mut lead);
            }
            lead
        });
    }

    /// Keeps whichever server copy is newer, so a slow reply to an earlier
    /// edit does not roll back a later one.
    fn confirm(&mut self, stored: Lead) {
        let older = match (&self.confirmed, stored.updated_at) {
            (Some(current), Some(incoming)) => current.updated_at.map_or(false, |at| incoming < at),
            _ => false,
        };
        if !older {
            self.confirmed = Some(stored);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailAction {
    Fetch,
    Loaded(Lead),
    LoadFailed(ApiError),
    /// Optimistic local change, tagged so its reply can find it.
    Edit { seq: u32, edit: LeadEdit },
    /// Server accepted an edit and returned the stored lead.
    Synced { seq: u32, lead: Lead },
    /// Server rejected an edit.
    Rejected { seq: u32 },
    Deleted,
}

impl Reducible for LeadDetailState {
    type Action = DetailAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DetailAction::Fetch => {
                next.loading = true;
                next.pending.clear();
            }
            DetailAction::Loaded(lead) => {
                next.confirmed = Some(lead);
                next.loading = false;
                next.error = None;
            }
            DetailAction::LoadFailed(error) => {
                next.loading = false;
                next.error = Some(error);
            }
            DetailAction::Edit { seq, edit } => {
                if next.confirmed.is_none() {
                    return self;
                }
                next.pending.push(PendingEdit { seq, edit });
            }
            DetailAction::Synced { seq, lead } => {
                let Some(index) = next.pending.iter().position(|p| p.seq == seq) else {
                    log::debug!("dropping reply for unknown edit {}", seq);
                    return self;
                };
                next.pending.remove(index);
                next.confirm(lead);
            }
            DetailAction::Rejected { seq } => {
                let Some(index) = next.pending.iter().position(|p| p.seq == seq) else {
                    return self;
                };
                next.pending.remove(index);
            }
            DetailAction::Deleted => {
                next.deleted = true;
            }
        }
        next.rebuild();
        Rc::new(next)
    }
}
