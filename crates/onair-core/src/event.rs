use std::time::Duration;

use serde::Deserialize;

use crate::challenge::{challenge_response, ChallengeResponse};
use crate::color::Color;
use crate::config::Config;
use crate::error::{OnAirError, Result};

/// How long a meeting-ended blink runs, and how often it toggles.
pub const BLINK_DURATION: Duration = Duration::from_secs(5);
pub const BLINK_INTERVAL: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The subset of the Zoom webhook body the dispatcher cares about.
/// Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    pub event: String,
    #[serde(default)]
    pub payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
pub struct Payload {
    #[serde(rename = "plainToken")]
    pub plain_token: Option<String>,
    pub object: Option<MeetingObject>,
}

#[derive(Debug, Deserialize)]
pub struct MeetingObject {
    pub topic: Option<String>,
    pub participant: Option<Participant>,
}

#[derive(Debug, Deserialize)]
pub struct Participant {
    pub user_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Recognized webhook event kinds. Anything else classifies as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UrlValidation,
    MeetingStarted,
    MeetingEnded,
    ParticipantJoined,
    ParticipantLeft,
    Unknown,
}

impl EventKind {
    pub fn classify(event: &str) -> Self {
        match event {
            "endpoint.url_validation" => EventKind::UrlValidation,
            "meeting.started" => EventKind::MeetingStarted,
            "meeting.ended" => EventKind::MeetingEnded,
            "meeting.participant_joined" => EventKind::ParticipantJoined,
            "meeting.participant_left" => EventKind::ParticipantLeft,
            _ => EventKind::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// What the HTTP layer should do with a classified event.
///
/// `Challenge` is answered synchronously; `SetColor` and `Blink` are handed
/// to the actuation actor so the webhook response never waits on hardware.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Challenge(ChallengeResponse),
    SetColor(Color),
    Blink {
        color: Color,
        duration: Duration,
        interval: Duration,
    },
    /// Recognized event filtered out by business rules; empty 200, no actuation.
    Ignore,
    /// Unrecognized event string; 404 with an explanatory message.
    Unknown(String),
}

/// Parse and classify a raw webhook body into a [`Directive`].
///
/// A body that fails to parse, lacks the `event` field, or lacks a payload
/// field the matched kind requires is a [`OnAirError::MalformedRequest`];
/// the caller surfaces that as HTTP 500 (source-compatible, see DESIGN.md).
pub fn dispatch(raw: &[u8], config: &Config) -> Result<Directive> {
    let body: WebhookBody = serde_json::from_slice(raw)
        .map_err(|e| OnAirError::MalformedRequest(e.to_string()))?;

    match EventKind::classify(&body.event) {
        EventKind::UrlValidation => {
            let token = plain_token(&body)?;
            Ok(Directive::Challenge(challenge_response(
                token,
                &config.secret_token,
            )))
        }
        EventKind::ParticipantJoined => {
            let name = participant_name(&body)?;
            if name != config.username {
                return Ok(Directive::Ignore);
            }
            tracing::info!("Welcome {name}!");
            Ok(Directive::SetColor(Color::MAGENTA))
        }
        EventKind::ParticipantLeft => {
            let name = participant_name(&body)?;
            if name != config.username {
                return Ok(Directive::Ignore);
            }
            tracing::info!("Goodbye {name}!");
            Ok(Directive::SetColor(Color::GREEN))
        }
        EventKind::MeetingStarted => {
            let topic = meeting_topic(&body)?;
            tracing::info!("Meeting {topic} has started!");
            Ok(Directive::SetColor(Color::CYAN))
        }
        EventKind::MeetingEnded => {
            let topic = meeting_topic(&body)?;
            tracing::info!("Meeting {topic} has ended!");
            Ok(Directive::Blink {
                color: Color::CYAN,
                duration: BLINK_DURATION,
                interval: BLINK_INTERVAL,
            })
        }
        EventKind::Unknown => Ok(Directive::Unknown(body.event)),
    }
}

// ---------------------------------------------------------------------------
// Payload accessors
// ---------------------------------------------------------------------------

fn plain_token(body: &WebhookBody) -> Result<&str> {
    body.payload
        .as_ref()
        .and_then(|p| p.plain_token.as_deref())
        .ok_or_else(|| OnAirError::MalformedRequest("payload.plainToken missing".into()))
}

fn participant_name(body: &WebhookBody) -> Result<&str> {
    body.payload
        .as_ref()
        .and_then(|p| p.object.as_ref())
        .and_then(|o| o.participant.as_ref())
        .and_then(|p| p.user_name.as_deref())
        .ok_or_else(|| {
            OnAirError::MalformedRequest("payload.object.participant.user_name missing".into())
        })
}

fn meeting_topic(body: &WebhookBody) -> Result<&str> {
    body.payload
        .as_ref()
        .and_then(|p| p.object.as_ref())
        .and_then(|o| o.topic.as_deref())
        .ok_or_else(|| OnAirError::MalformedRequest("payload.object.topic missing".into()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
