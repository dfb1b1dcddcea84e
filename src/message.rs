use std::fmt::Display;

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    UnlockTimer,
    LockTimer,
    GetInfo,
    CompleteRequirement { id: RequirementId },
}

/// Identifier handed out by the service. Kept as the raw JSON value so it is echoed back exactly
/// as it was received.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RequirementId(serde_json::Value);

impl RequirementId {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }
}

impl Display for RequirementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub name: String,
    pub complete: bool,
    pub due: i64,
}

/// Snapshot of the service state. Only the requirements are decoded, the rest of the payload
/// stays available through [`Reply`].
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Info {
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Info { info: Info },
    Success,
    Error { msg: String },
    /// Any discriminator this client does not know about, or no discriminator at all.
    Other(serde_json::Value),
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum KnownResponse {
    Info { info: Info },
    Success,
    Error { msg: String },
}

impl Response {
    /// Decode a response by looking at its `type` first. Unknown types are kept as
    /// [`Response::Other`]; a known type with a payload that does not fit is an error.
    pub fn from_value(value: &serde_json::Value) -> anyhow::Result<Self> {
        let kind = value.get("type").and_then(|t| t.as_str());
        match kind {
            Some(kind @ ("Info" | "Success" | "Error")) => {
                let known: KnownResponse = serde_json::from_value(value.clone())
                    .with_context(|| format!("Malformed {kind} response"))?;
                Ok(match known {
                    KnownResponse::Info { info } => Response::Info { info },
                    KnownResponse::Success => Response::Success,
                    KnownResponse::Error { msg } => Response::Error { msg },
                })
            }
            _ => Ok(Response::Other(value.clone())),
        }
    }
}

/// A decoded response together with the body it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Body exactly as the service sent it.
    pub body: String,
    pub raw: serde_json::Value,
    pub response: Response,
}

impl Reply {
    pub fn parse(body: &str) -> anyhow::Result<Self> {
        let raw: serde_json::Value =
            serde_json::from_str(body).context("Response body is not valid JSON")?;
        let response = Response::from_value(&raw)?;
        Ok(Self {
            body: body.to_owned(),
            raw,
            response,
        })
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn simple_requests_carry_only_the_type() {
        for (request, name) in [
            (Request::UnlockTimer, "UnlockTimer"),
            (Request::LockTimer, "LockTimer"),
            (Request::GetInfo, "GetInfo"),
        ] {
            assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "type": name }));
        }
    }

    #[test]
    fn complete_requirement_echoes_the_id() {
        let request = Request::CompleteRequirement {
            id: RequirementId::new(3),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "type": "CompleteRequirement", "id": 3 })
        );

        let request = Request::CompleteRequirement {
            id: RequirementId::new("abc"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "type": "CompleteRequirement", "id": "abc" })
        );
    }

    #[test]
    fn info_ignores_extra_state() {
        let reply = Reply::parse(
            r#"{"type":"Info","info":{"state":"Unlockable","until":null,
                "requirements":[{"id":1,"name":"A","complete":false,"due":10}]}}"#,
        )
        .unwrap();
        let Response::Info { info } = &reply.response else {
            panic!("expected info, got {:?}", reply.response);
        };
        assert_eq!(info.requirements.len(), 1);
        assert_eq!(info.requirements[0].name, "A");
        assert_eq!(info.requirements[0].id, RequirementId::new(1));
        assert_eq!(reply.raw["info"]["state"], "Unlockable");
    }

    #[test]
    fn success_and_error() {
        assert_eq!(
            Reply::parse(r#"{"type":"Success"}"#).unwrap().response,
            Response::Success
        );
        assert_eq!(
            Reply::parse(r#"{"type":"Error","msg":"Break timer is locked."}"#)
                .unwrap()
                .response,
            Response::Error {
                msg: "Break timer is locked.".to_owned()
            }
        );
    }

    #[test]
    fn unknown_types_are_kept_raw() {
        let reply = Reply::parse(r#"{"type":"Whatever","x":1}"#).unwrap();
        assert_eq!(
            reply.response,
            Response::Other(json!({ "type": "Whatever", "x": 1 }))
        );

        let reply = Reply::parse("[1,2]").unwrap();
        assert_eq!(reply.response, Response::Other(json!([1, 2])));
        assert_eq!(reply.to_string(), "[1,2]");
    }

    #[test]
    fn display_keeps_the_body_as_sent() {
        let body = r#"{"type": "Error",  "msg": "Break timer is locked."}"#;
        let reply = Reply::parse(body).unwrap();
        assert_eq!(reply.to_string(), body);
    }

    #[test]
    fn malformed_bodies_fail() {
        assert!(Reply::parse("not json").is_err());
        assert!(Reply::parse(r#"{"type":"Info"}"#).is_err());
        assert!(Reply::parse(r#"{"type":"Error"}"#).is_err());
    }
}
