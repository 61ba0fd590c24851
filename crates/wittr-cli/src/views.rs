//! Terminal renditions of the posts list and the toast area.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use wittr_core::{EventBatch, EventRecord, PostsView, ToastHandle, ToastView};

/// Prints each post as one line and remembers the newest post time.
pub struct TerminalPostsView<W> {
    out: Mutex<W>,
    latest: Mutex<Option<DateTime<Utc>>>,
}

impl<W: Write + Send> TerminalPostsView<W> {
    /// `since` seeds the newest-post time before anything has arrived.
    pub const fn new(out: W, since: Option<DateTime<Utc>>) -> Self {
        Self {
            out: Mutex::new(out),
            latest: Mutex::new(since),
        }
    }

    /// Consume the view and return its writer.
    pub fn into_writer(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> PostsView for TerminalPostsView<W> {
    fn latest_post_date(&self) -> Option<DateTime<Utc>> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_posts(&self, posts: EventBatch) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);

        for record in posts {
            if let Some(time) = post_time(&record) {
                if latest.is_none_or(|current| time > current) {
                    *latest = Some(time);
                }
            }
            if let Err(e) = writeln!(out, "{}", format_post(&record)) {
                tracing::warn!(error = %e, "Failed to write post");
            }
        }
        if let Err(e) = out.flush() {
            tracing::warn!(error = %e, "Failed to flush posts");
        }
    }
}

/// Publication time of a post, read from its RFC 3339 `time` field.
pub fn post_time(record: &EventRecord) -> Option<DateTime<Utc>> {
    let raw = record.get("time")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// One-line rendition of a post.
///
/// Records without a `name` and `body` are printed as compact JSON.
pub fn format_post(record: &EventRecord) -> String {
    let name = record.get("name").and_then(EventRecord::as_str);
    let body = record.get("body").and_then(EventRecord::as_str);

    match (name, body) {
        (Some(name), Some(body)) => match post_time(record) {
            Some(time) => format!("[{}] {name}: {body}", time.format("%Y-%m-%d %H:%M:%S")),
            None => format!("{name}: {body}"),
        },
        _ => record.to_string(),
    }
}

/// Writes connectivity notices to a terminal stream.
pub struct TerminalToastView<W> {
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> TerminalToastView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    /// Shared writer, for inspecting what was written.
    pub fn writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.out)
    }
}

impl<W: Write + Send + 'static> ToastView for TerminalToastView<W> {
    fn show(&self, message: &str) -> Box<dyn ToastHandle> {
        write_line(&self.out, &format!("! {message}"));
        Box::new(TerminalToast {
            out: Arc::clone(&self.out),
        })
    }
}

struct TerminalToast<W> {
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send> ToastHandle for TerminalToast<W> {
    fn hide(self: Box<Self>) {
        write_line(&self.out, "✓ Connected");
    }
}

fn write_line<W: Write>(out: &Mutex<W>, line: &str) {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        tracing::warn!(error = %e, "Failed to write notice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Writer that accepts bytes but fails every flush.
    #[derive(Default)]
    struct UnflushableWriter {
        written: Vec<u8>,
        flushes: usize,
    }

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushes += 1;
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_format_post() {
        let record = json!({
            "name": "Jake",
            "body": "Hello",
            "time": "2016-01-01T10:00:00.000Z",
        });
        assert_eq!(format_post(&record), "[2016-01-01 10:00:00] Jake: Hello");
    }

    #[test]
    fn test_format_post_without_time() {
        let record = json!({"name": "Jake", "body": "Hello"});
        assert_eq!(format_post(&record), "Jake: Hello");
    }

    #[test]
    fn test_format_unknown_record_as_json() {
        let record = json!({"id": 7});
        assert_eq!(format_post(&record), r#"{"id":7}"#);
    }

    #[test]
    fn test_posts_are_printed_in_order() {
        let view = TerminalPostsView::new(Vec::new(), None);
        view.add_posts(EventBatch::new(vec![
            json!({"name": "a", "body": "first"}),
            json!({"name": "b", "body": "second"}),
        ]));

        assert_eq!(output(view.into_writer()), "a: first\nb: second\n");
    }

    #[test]
    fn test_flush_failure_does_not_lose_tracking() {
        let view = TerminalPostsView::new(UnflushableWriter::default(), None);
        view.add_posts(EventBatch::new(vec![
            json!({"name": "a", "body": "first", "time": "1970-01-01T00:00:03Z"}),
        ]));
        view.add_posts(EventBatch::new(vec![json!({"name": "b", "body": "second"})]));

        assert_eq!(
            view.latest_post_date().map(|d| d.timestamp_millis()),
            Some(3000)
        );
        let writer = view.into_writer();
        assert_eq!(writer.flushes, 2);
        assert_eq!(
            output(writer.written),
            "[1970-01-01 00:00:03] a: first\nb: second\n"
        );
    }

    #[test]
    fn test_latest_post_date_tracks_newest_time() {
        let view = TerminalPostsView::new(Vec::new(), None);
        assert_eq!(view.latest_post_date(), None);

        view.add_posts(EventBatch::new(vec![
            json!({"time": "1970-01-01T00:00:02Z"}),
            json!({"time": "1970-01-01T00:00:01Z"}),
            json!({"time": "not a date"}),
        ]));

        assert_eq!(
            view.latest_post_date().map(|d| d.timestamp_millis()),
            Some(2000)
        );
    }

    #[test]
    fn test_since_seeds_latest_post_date() {
        let since = DateTime::from_timestamp_millis(5000);
        let view = TerminalPostsView::new(Vec::new(), since);

        view.add_posts(EventBatch::new(vec![json!({"time": "1970-01-01T00:00:01Z"})]));

        assert_eq!(view.latest_post_date(), since);
    }

    #[test]
    fn test_toast_show_and_hide() {
        let view = TerminalToastView::new(Vec::new());
        let writer = view.writer();

        let toast = view.show("Unable to connect. Retrying…");
        toast.hide();

        let written = output(writer.lock().unwrap().clone());
        assert_eq!(written, "! Unable to connect. Retrying…\n✓ Connected\n");
    }
}
