//! Event registration: identity, eligibility rules, and the anti-spam gate.
//!
//! The eligibility check and the anti-spam gate are pure functions; all
//! I/O (event lookup, duplicate check, insert) lives in the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::event::{EventAccess, EventSchedule};

/// Who is attempting to register.
///
/// A member always carries the email the registration row will store
/// (body email if supplied, otherwise the account email). A guest may
/// have no email at all, which rule 6 rejects for public events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registrant {
    Member { user_id: Uuid, email: String },
    Guest { email: Option<String> },
}

impl Registrant {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Registrant::Member { user_id, .. } => Some(*user_id),
            Registrant::Guest { .. } => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Registrant::Member { email, .. } => Some(email),
            Registrant::Guest { email } => email.as_deref(),
        }
    }
}

/// Why a registration attempt was refused.
///
/// Display strings are user-facing and stable; the HTTP layer returns
/// them verbatim with a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EligibilityError {
    #[error("Event has already started.")]
    AlreadyStarted,

    #[error("Registration window is not set for this event.")]
    WindowNotSet,

    #[error("Registration is not open yet.")]
    NotOpenYet,

    #[error("Registration has closed.")]
    Closed,

    #[error("Members only event. Please log in as a member.")]
    MembersOnly,

    #[error("Email is required for registration.")]
    EmailRequired,
}

/// Decides whether `registrant` may register for the event at `now`.
///
/// Rules run in order and the first failure wins; later rules are not
/// evaluated. An event with no start date counts as already started.
pub fn can_register(
    schedule: &EventSchedule,
    now: DateTime<Utc>,
    registrant: &Registrant,
) -> Result<(), EligibilityError> {
    match schedule.event_start_date {
        Some(start) if start > now => {}
        _ => return Err(EligibilityError::AlreadyStarted),
    }

    let (reg_start, reg_end) = match (
        schedule.registration_start_date,
        schedule.registration_end_date,
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(EligibilityError::WindowNotSet),
    };

    if now < reg_start {
        return Err(EligibilityError::NotOpenYet);
    }
    if now > reg_end {
        return Err(EligibilityError::Closed);
    }

    match (schedule.access_type, registrant) {
        (EventAccess::Members, Registrant::Guest { .. }) => Err(EligibilityError::MembersOnly),
        (EventAccess::Members, Registrant::Member { .. }) => Ok(()),
        (EventAccess::Public, Registrant::Guest { email: None }) => {
            Err(EligibilityError::EmailRequired)
        }
        (EventAccess::Public, _) => Ok(()),
    }
}

/// The word guests must type to confirm they are human.
pub const CONFIRM_WORD: &str = "EVENT";

/// Why a guest submission was rejected as spam.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpamError {
    /// Kept deliberately vague so bots are not told what tripped them.
    #[error("Invalid request.")]
    HoneypotFilled,

    #[error("Please type \"{CONFIRM_WORD}\" to confirm you're human.")]
    WrongConfirmWord,
}

/// Anti-spam gate for guest submissions. Members skip this entirely.
///
/// The honeypot is checked first; a populated honeypot short-circuits
/// before the confirmation word is looked at.
pub fn check_anti_spam(
    honeypot: Option<&str>,
    confirm_word: Option<&str>,
) -> Result<(), SpamError> {
    if honeypot.is_some_and(|v| !v.trim().is_empty()) {
        return Err(SpamError::HoneypotFilled);
    }

    let word = confirm_word.unwrap_or("").trim();
    if !word.eq_ignore_ascii_case(CONFIRM_WORD) {
        return Err(SpamError::WrongConfirmWord);
    }

    Ok(())
}

/// A stored registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub registration_timestamp: DateTime<Utc>,
}

/// Body of `POST /api/events/:event_id/register`.
///
/// `website` is the honeypot; humans never see it and leave it blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub confirm_word: Option<String>,
}

/// Minimal receipt returned after a successful registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationReceipt {
    pub id: Uuid,
    pub event_id: Uuid,
    pub registration_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub registration: RegistrationReceipt,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationStatusResponse {
    pub success: bool,
    pub registered: bool,
}

/// Whether a registration row belongs to a member account or a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationKind {
    Member,
    Guest,
}

/// One row in the admin registration listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: RegistrationKind,
    pub registration_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationListResponse {
    pub success: bool,
    pub count: usize,
    pub registrations: Vec<RegistrationSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn guest(email: Option<&str>) -> Registrant {
        Registrant::Guest {
            email: email.map(String::from),
        }
    }

    fn member() -> Registrant {
        Registrant::Member {
            user_id: Uuid::new_v4(),
            email: "m@club.org".to_string(),
        }
    }

    /// Event in the future with an open registration window.
    fn open_schedule(now: DateTime<Utc>, access_type: EventAccess) -> EventSchedule {
        EventSchedule {
            event_start_date: Some(now + Duration::days(7)),
            registration_start_date: Some(now - Duration::days(1)),
            registration_end_date: Some(now + Duration::days(1)),
            access_type,
        }
    }

    #[test]
    fn test_no_start_date_means_already_started() {
        let now = Utc::now();
        let schedule = EventSchedule {
            event_start_date: None,
            registration_start_date: Some(now - Duration::days(1)),
            registration_end_date: Some(now + Duration::days(1)),
            access_type: EventAccess::Public,
        };
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::AlreadyStarted)
        );
    }

    #[test]
    fn test_started_event_denied() {
        let now = Utc::now();
        let mut schedule = open_schedule(now, EventAccess::Public);
        schedule.event_start_date = Some(now - Duration::hours(1));
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::AlreadyStarted)
        );
    }

    #[test]
    fn test_start_exactly_now_counts_as_started() {
        let now = Utc::now();
        let mut schedule = open_schedule(now, EventAccess::Public);
        schedule.event_start_date = Some(now);
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::AlreadyStarted)
        );
    }

    // Rule 1 short-circuits before the window rules.
    #[test]
    fn test_missing_start_wins_over_closed_window() {
        let now = Utc::now();
        let schedule = EventSchedule {
            event_start_date: None,
            registration_start_date: Some(now - Duration::days(10)),
            registration_end_date: Some(now - Duration::days(5)),
            access_type: EventAccess::Public,
        };
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::AlreadyStarted)
        );
    }

    #[test]
    fn test_missing_window_bound_denied() {
        let now = Utc::now();
        for (start, end) in [
            (None, Some(now + Duration::days(1))),
            (Some(now - Duration::days(1)), None),
            (None, None),
        ] {
            let schedule = EventSchedule {
                event_start_date: Some(now + Duration::days(7)),
                registration_start_date: start,
                registration_end_date: end,
                access_type: EventAccess::Public,
            };
            assert_eq!(
                can_register(&schedule, now, &guest(Some("a@x.com"))),
                Err(EligibilityError::WindowNotSet)
            );
        }
    }

    #[test]
    fn test_before_window_opens() {
        let now = Utc::now();
        let mut schedule = open_schedule(now, EventAccess::Public);
        schedule.registration_start_date = Some(now + Duration::hours(1));
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::NotOpenYet)
        );
    }

    #[test]
    fn test_after_window_closes() {
        let now = Utc::now();
        let mut schedule = open_schedule(now, EventAccess::Public);
        schedule.registration_end_date = Some(now - Duration::hours(1));
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::Closed)
        );
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let now = Utc::now();
        let mut schedule = open_schedule(now, EventAccess::Public);
        schedule.registration_start_date = Some(now);
        schedule.registration_end_date = Some(now);
        assert_eq!(can_register(&schedule, now, &guest(Some("a@x.com"))), Ok(()));
    }

    /// An inverted window can never be satisfied; the start bound is
    /// checked first so the caller sees "not open yet".
    #[test]
    fn test_inverted_window_always_denies() {
        let now = Utc::now();
        let mut schedule = open_schedule(now, EventAccess::Public);
        schedule.registration_start_date = Some(now + Duration::days(1));
        schedule.registration_end_date = Some(now - Duration::days(1));
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::NotOpenYet)
        );
    }

    // The members-only gate holds even inside an open window.
    #[test]
    fn test_members_only_rejects_guests() {
        let now = Utc::now();
        let schedule = open_schedule(now, EventAccess::Members);
        assert_eq!(
            can_register(&schedule, now, &guest(Some("a@x.com"))),
            Err(EligibilityError::MembersOnly)
        );
        assert_eq!(
            can_register(&schedule, now, &guest(None)),
            Err(EligibilityError::MembersOnly)
        );
    }

    #[test]
    fn test_members_only_accepts_member() {
        let now = Utc::now();
        let schedule = open_schedule(now, EventAccess::Members);
        assert_eq!(can_register(&schedule, now, &member()), Ok(()));
    }

    // Public events require some identity.
    #[test]
    fn test_public_requires_email_for_guests() {
        let now = Utc::now();
        let schedule = open_schedule(now, EventAccess::Public);
        assert_eq!(
            can_register(&schedule, now, &guest(None)),
            Err(EligibilityError::EmailRequired)
        );
        assert_eq!(can_register(&schedule, now, &guest(Some("a@x.com"))), Ok(()));
    }

    // Edge case from the handler contract: a member may register for a
    // public event without supplying an email.
    #[test]
    fn test_member_on_public_event_needs_no_body_email() {
        let now = Utc::now();
        let schedule = open_schedule(now, EventAccess::Public);
        assert_eq!(can_register(&schedule, now, &member()), Ok(()));
    }

    #[test]
    fn test_eligibility_messages() {
        assert_eq!(
            EligibilityError::AlreadyStarted.to_string(),
            "Event has already started."
        );
        assert_eq!(
            EligibilityError::WindowNotSet.to_string(),
            "Registration window is not set for this event."
        );
        assert_eq!(
            EligibilityError::NotOpenYet.to_string(),
            "Registration is not open yet."
        );
        assert_eq!(
            EligibilityError::Closed.to_string(),
            "Registration has closed."
        );
        assert_eq!(
            EligibilityError::MembersOnly.to_string(),
            "Members only event. Please log in as a member."
        );
        assert_eq!(
            EligibilityError::EmailRequired.to_string(),
            "Email is required for registration."
        );
    }

    // The honeypot trips regardless of the confirm word.
    #[test]
    fn test_honeypot_rejects_before_confirm_word() {
        assert_eq!(
            check_anti_spam(Some("http://spam.example"), Some("EVENT")),
            Err(SpamError::HoneypotFilled)
        );
    }

    #[test]
    fn test_honeypot_whitespace_passes() {
        assert_eq!(check_anti_spam(Some("   "), Some("EVENT")), Ok(()));
        assert_eq!(check_anti_spam(None, Some("EVENT")), Ok(()));
    }

    #[test]
    fn test_confirm_word_case_insensitive() {
        assert_eq!(check_anti_spam(None, Some("event")), Ok(()));
        assert_eq!(check_anti_spam(None, Some(" Event ")), Ok(()));
    }

    #[test]
    fn test_wrong_confirm_word_rejected() {
        assert_eq!(
            check_anti_spam(None, Some("PARTY")),
            Err(SpamError::WrongConfirmWord)
        );
        assert_eq!(
            check_anti_spam(None, None),
            Err(SpamError::WrongConfirmWord)
        );
    }

    #[test]
    fn test_spam_messages() {
        assert_eq!(SpamError::HoneypotFilled.to_string(), "Invalid request.");
        assert_eq!(
            SpamError::WrongConfirmWord.to_string(),
            "Please type \"EVENT\" to confirm you're human."
        );
    }

    #[test]
    fn test_registrant_accessors() {
        let m = member();
        assert!(m.user_id().is_some());
        assert_eq!(m.email(), Some("m@club.org"));

        let g = guest(Some("a@x.com"));
        assert_eq!(g.user_id(), None);
        assert_eq!(g.email(), Some("a@x.com"));
        assert_eq!(guest(None).email(), None);
    }

    #[test]
    fn test_registration_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&RegistrationKind::Member).unwrap(),
            "\"member\""
        );
        assert_eq!(
            serde_json::to_string(&RegistrationKind::Guest).unwrap(),
            "\"guest\""
        );
    }
}
