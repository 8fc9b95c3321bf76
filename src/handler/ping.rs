use crate::{
    config::Config,
    event::Event,
    handler::{Reply, Responder},
};

pub const PING: &[u8] = b"ping python";

impl Reply {
    pub fn pong() -> Self {
        Self {
            confidence: 10,
            text: "pong!".into(),
            why: vec!["They pinged so I ponged!".into()],
        }
    }
}

pub fn respond(_cfg: &Config, event: &Event) -> Option<Reply> {
    (event.body() == PING).then(Reply::pong)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PingResponder;

impl Responder for PingResponder {
    fn respond(&self, cfg: &Config, event: &Event) -> Option<Reply> {
        respond(cfg, event)
    }
}
