use std::error::Error;
use summabot::errors::BotError;

#[test]
fn test_bot_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_bot_error_display() {
    let error = BotError::TelegramError("chat not found".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access Telegram API: chat not found"
    );

    let error = BotError::GenerationError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to generate summary: Model unavailable"
    );

    let error = BotError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_bot_error_from_conversions() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    assert!(matches!(BotError::from(json_err), BotError::ParseError(_)));

    // Only checks that the conversion exists.
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> BotError {
        BotError::from(err)
    }
}

#[tokio::test]
async fn test_timeout_becomes_generation_error() {
    let elapsed = tokio::time::timeout(
        std::time::Duration::from_millis(1),
        std::future::pending::<()>(),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        BotError::from(elapsed),
        BotError::GenerationError(_)
    ));
}
