/// LINE reply token (single-use, expires shortly after the event).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReplyToken(pub String);

impl ReplyToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// LINE user id (`U` + 32 hex chars). Absent for some event sources.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub String);
