const APP_NAME: &str = "toolhub";

/// Shows a desktop notification. Failures are logged, never returned.
pub fn send(summary: &str, body: &str) {
    if let Err(err) = notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary(summary)
        .body(body)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}
