//! Scheduling state machine for interviews and the remote/on-site logistics
//! rules that go with it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::address::Address;
use crate::models::interview::{Interview, InterviewStatus, InterviewType};

/// Everything needed to schedule a new interview.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewDraft {
    pub application_id: Uuid,
    pub interview_type: InterviewType,
    pub scheduled_at: DateTime<Utc>,
    pub visio_link: Option<String>,
    pub address: Option<Address>,
    pub notes: Option<String>,
}

/// Partial update; `None` means "leave as is", never "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewPatch {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub interview_type: Option<InterviewType>,
    pub visio_link: Option<String>,
    pub address: Option<Address>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
}

impl InterviewPatch {
    fn touches_more_than_notes(&self, current: InterviewStatus) -> bool {
        self.scheduled_at.is_some()
            || self.interview_type.is_some()
            || self.visio_link.is_some()
            || self.address.is_some()
            || self.status.is_some_and(|status| status != current)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchOutcome {
    pub interview: Interview,
    /// True when this patch moved the interview from scheduled to completed.
    pub completed: bool,
}

/// Builds a scheduled interview, resolving on-site logistics against the
/// job offer address when none is given.
pub fn schedule(
    draft: InterviewDraft,
    offer_address: Option<&Address>,
    now: DateTime<Utc>,
) -> Result<Interview> {
    let visio_link = non_blank(draft.visio_link);

    let address = match draft.interview_type {
        InterviewType::Remote => {
            if visio_link.is_none() {
                return Err(Error::Validation(
                    "A visio link is required for a remote interview".to_string(),
                ));
            }
            if present(draft.address).is_some() {
                return Err(Error::Validation(
                    "An address is not allowed for a remote interview".to_string(),
                ));
            }
            None
        }
        InterviewType::OnSite => {
            if visio_link.is_some() {
                return Err(Error::Validation(
                    "A visio link is not allowed for an on-site interview".to_string(),
                ));
            }
            let address = present(draft.address).or_else(|| present(offer_address.cloned()));
            if address.is_none() {
                return Err(Error::Validation(
                    "An on-site interview needs an address and the job offer has none".to_string(),
                ));
            }
            address
        }
    };

    Ok(Interview {
        id: Uuid::new_v4(),
        application_id: draft.application_id,
        scheduled_at: draft.scheduled_at,
        interview_type: draft.interview_type,
        status: InterviewStatus::Scheduled,
        visio_link,
        address,
        notes: draft.notes,
        created_at: now,
        updated_at: None,
        cancelled_at: None,
    })
}

/// Applies a partial update. Terminal interviews only accept notes.
pub fn apply_patch(
    current: &Interview,
    patch: &InterviewPatch,
    offer_address: Option<&Address>,
    now: DateTime<Utc>,
) -> Result<PatchOutcome> {
    if current.status.is_terminal() && patch.touches_more_than_notes(current.status) {
        return Err(Error::InvalidTransition(format!(
            "Interview is {}; only its notes can still change",
            current.status
        )));
    }

    let mut next = current.clone();

    if let Some(scheduled_at) = patch.scheduled_at {
        next.scheduled_at = scheduled_at;
    }
    if let Some(interview_type) = patch.interview_type {
        next.interview_type = interview_type;
    }
    if let Some(link) = &patch.visio_link {
        next.visio_link = non_blank(Some(link.clone()));
    }
    match patch.interview_type {
        Some(InterviewType::OnSite) => next.visio_link = None,
        Some(InterviewType::Remote) => next.address = None,
        None => {}
    }
    if let Some(address) = &patch.address {
        match next.address.as_mut() {
            Some(existing) => existing.merge(address),
            None => next.address = Some(address.clone()),
        }
    }
    next.address = present(next.address.take());
    if next.interview_type == InterviewType::OnSite && next.address.is_none() {
        next.address = present(offer_address.cloned());
    }

    if !current.status.is_terminal() {
        check_logistics(&next)?;
    }

    let mut completed = false;
    if let Some(status) = patch.status {
        match (current.status, status) {
            (from, to) if from == to => {}
            (InterviewStatus::Scheduled, InterviewStatus::Completed) => {
                next.status = InterviewStatus::Completed;
                completed = true;
            }
            (InterviewStatus::Scheduled, InterviewStatus::Cancelled) => {
                next.status = InterviewStatus::Cancelled;
                next.cancelled_at = Some(now);
            }
            (from, to) => {
                return Err(Error::InvalidTransition(format!(
                    "Cannot move an interview from {} to {}",
                    from, to
                )));
            }
        }
    }

    if let Some(notes) = &patch.notes {
        next.notes = Some(notes.clone());
    }

    next.updated_at = Some(now);
    Ok(PatchOutcome {
        interview: next,
        completed,
    })
}

/// Cancels an interview. Re-cancelling re-stamps the timestamps.
pub fn cancel(current: &Interview, now: DateTime<Utc>) -> Result<Interview> {
    if current.status == InterviewStatus::Completed {
        return Err(Error::InvalidTransition(
            "A completed interview cannot be cancelled".to_string(),
        ));
    }

    let mut next = current.clone();
    next.status = InterviewStatus::Cancelled;
    next.cancelled_at = Some(now);
    next.updated_at = Some(now);
    Ok(next)
}

/// Exactly one of link/address, chosen by the interview type.
pub fn check_logistics(interview: &Interview) -> Result<()> {
    let has_link = interview.visio_link.is_some();
    let has_address = interview
        .address
        .as_ref()
        .is_some_and(|address| !address.is_empty());
    match interview.interview_type {
        InterviewType::Remote if !has_link => Err(Error::Validation(
            "A visio link is required for a remote interview".to_string(),
        )),
        InterviewType::Remote if has_address => Err(Error::Validation(
            "An address is not allowed for a remote interview".to_string(),
        )),
        InterviewType::OnSite if has_link => Err(Error::Validation(
            "A visio link is not allowed for an on-site interview".to_string(),
        )),
        InterviewType::OnSite if !has_address => Err(Error::Validation(
            "An on-site interview requires an address".to_string(),
        )),
        _ => Ok(()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn present(address: Option<Address>) -> Option<Address> {
    address.filter(|address| !address.is_empty())
}
