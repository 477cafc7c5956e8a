use serde_json::Value;

use crate::types::Heading;

#[derive(Debug, PartialEq)]
pub enum ParsedClientMessage {
    Hello {
        name: String,
        pilot_token: Option<String>,
    },
    /// `heading: None` releases the stick.
    Input {
        heading: Option<Heading>,
    },
    Restart,
    Ping {
        t: f64,
    },
}

pub fn parse_client_message(raw: &str) -> Option<ParsedClientMessage> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;
    let message_type = object.get("type")?.as_str()?;

    match message_type {
        "hello" => {
            let name = match object.get("name") {
                None => String::new(),
                Some(value) => value.as_str()?.to_string(),
            };
            let pilot_token = match object.get("pilotToken") {
                None => None,
                Some(value) => Some(value.as_str()?.to_string()),
            };
            Some(ParsedClientMessage::Hello {
                name: sanitize_name(&name),
                pilot_token,
            })
        }
        "input" => {
            let heading = match object.get("dir")?.as_str()? {
                "none" => None,
                other => Some(Heading::parse(other)?),
            };
            Some(ParsedClientMessage::Input { heading })
        }
        "restart" => Some(ParsedClientMessage::Restart),
        "ping" => {
            let t = object.get("t")?.as_f64()?;
            if !t.is_finite() {
                return None;
            }
            Some(ParsedClientMessage::Ping { t })
        }
        _ => None,
    }
}

pub fn sanitize_name(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "Spectator".to_string();
    }
    trimmed.chars().take(16).collect()
}
