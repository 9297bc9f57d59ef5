//! Canned replies for the three lookup outcomes.

use crate::{
    domain::ReplyToken,
    messaging::{port::ReplyPort, types::OutgoingMessage},
    roster::LookupResult,
    Result,
};

pub const FETCH_ERROR_TEXT: &str = "系統讀取名單發生錯誤，請稍後再試，或是聯繫現場招待人員。";

pub fn found_text(query: &str, table_number: &str) -> String {
    format!(
        "歡迎 {query}！\n您的座位在【 第 {table_number} 桌 】。\n請參考下方座位圖入座，祝您用餐愉快！"
    )
}

pub fn not_found_text(query: &str) -> String {
    format!(
        "抱歉，名單中找不到「{query}」。\n請確認輸入的是中文全名 (例如: 王小明)。\n如有疑問請詢問現場招待人員。"
    )
}

/// Build the reply for a lookup outcome.
///
/// `Found` yields the greeting followed by the seat map; every other outcome
/// is a single text message.
pub fn compose(query: &str, result: &LookupResult, image_url: &str) -> Vec<OutgoingMessage> {
    match result {
        LookupResult::FetchError(_) => vec![OutgoingMessage::text(FETCH_ERROR_TEXT)],
        LookupResult::Found(table_number) => vec![
            OutgoingMessage::text(found_text(query, table_number)),
            OutgoingMessage::image(image_url),
        ],
        LookupResult::NotFound => vec![OutgoingMessage::text(not_found_text(query))],
    }
}

/// Compose the reply and send it in one call on the event's reply token.
pub async fn compose_and_send(
    port: &dyn ReplyPort,
    reply_token: &ReplyToken,
    query: &str,
    result: &LookupResult,
    image_url: &str,
) -> Result<()> {
    let messages = compose(query, result, image_url);
    port.reply(reply_token, &messages).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{errors::Error, roster::RosterError};

    const MAP_URL: &str = "https://img.example.com/seat-map.jpg";

    #[derive(Default)]
    struct FakeMessenger {
        calls: Mutex<Vec<(ReplyToken, Vec<OutgoingMessage>)>>,
        fail: bool,
    }

    #[async_trait]
    impl ReplyPort for FakeMessenger {
        async fn reply(&self, token: &ReplyToken, messages: &[OutgoingMessage]) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((token.clone(), messages.to_vec()));
            if self.fail {
                return Err(Error::External("reply token expired".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn found_is_greeting_then_map() {
        let msgs = compose("王小明", &LookupResult::Found("5".to_string()), MAP_URL);
        assert_eq!(msgs.len(), 2);
        let text = msgs[0].as_text().unwrap();
        assert!(text.contains("歡迎 王小明！"));
        assert!(text.contains("第 5 桌"));
        assert_eq!(
            msgs[1],
            OutgoingMessage::Image {
                original_content_url: MAP_URL.to_string(),
                preview_image_url: MAP_URL.to_string(),
            }
        );
    }

    #[test]
    fn not_found_echoes_query() {
        let msgs = compose("陳小華", &LookupResult::NotFound, MAP_URL);
        assert_eq!(msgs.len(), 1);
        let text = msgs[0].as_text().unwrap();
        assert!(text.contains("找不到「陳小華」"));
        assert!(text.contains("中文全名"));
    }

    #[test]
    fn fetch_error_is_fixed_apology_without_image() {
        let result = LookupResult::FetchError(RosterError::HttpStatus(500));
        let msgs = compose("王小明", &result, MAP_URL);
        assert_eq!(msgs, vec![OutgoingMessage::text(FETCH_ERROR_TEXT)]);

        // Every failure kind reads the same to the user.
        let schema = LookupResult::FetchError(RosterError::MissingColumn("桌號".to_string()));
        assert_eq!(compose("王小明", &schema, MAP_URL), msgs);
    }

    #[tokio::test]
    async fn sends_exactly_one_reply_call() {
        let messenger = FakeMessenger::default();
        let token = ReplyToken("tok-1".to_string());
        compose_and_send(
            &messenger,
            &token,
            "王小明",
            &LookupResult::Found("5".to_string()),
            MAP_URL,
        )
        .await
        .unwrap();

        let calls = messenger.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, token);
        assert_eq!(calls[0].1.len(), 2);
    }

    #[tokio::test]
    async fn delivery_failure_is_returned_not_retried() {
        let messenger = FakeMessenger {
            fail: true,
            ..Default::default()
        };
        let err = compose_and_send(
            &messenger,
            &ReplyToken("expired".to_string()),
            "陳小華",
            &LookupResult::NotFound,
            MAP_URL,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::External(_)));
        assert_eq!(messenger.calls.lock().unwrap().len(), 1);
    }
}
