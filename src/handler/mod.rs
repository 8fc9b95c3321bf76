mod ping;

pub use ping::{respond, PingResponder, PING};
use serde::{Deserialize, Serialize};
use serde_json as json;
use spdlog::prelude::*;

use crate::{
    config::Config,
    event::{Event, InputError},
    util::bytes,
};

/// A reply is all or nothing. Absence is expressed as `None` by responders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub confidence: i64,
    pub text: String,
    pub why: Vec<String>,
}

pub trait Responder {
    fn respond(&self, cfg: &Config, event: &Event) -> Option<Reply>;
}

pub fn handle(responder: &impl Responder, cfg: &Config, event: &Event) -> Option<Reply> {
    trace!("new event. body '{}'", bytes::escape(event.body()));

    let reply = responder.respond(cfg, event);
    if let Some(reply) = &reply {
        debug!(
            "replying '{}' with confidence {}",
            reply.text, reply.confidence
        );
    }
    reply
}

/// Entry point for hosts that pass the event as an untyped mapping.
pub fn process(cfg: &Config, raw: &json::Value) -> Result<Option<Reply>, InputError> {
    let event = Event::from_value(raw)?;
    Ok(handle(&PingResponder, cfg, &event))
}
