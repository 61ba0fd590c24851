//! End-to-end test of the live update client over real WebSockets.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use wittr_core::{
    ConnectivityState, EventBatch, HostAddressBuilder, LiveUpdateClient, LiveUpdatePorts,
    LiveUpdateSettings, PostsView, ToastHandle, ToastView,
};
use wittr_runtime::{PaintCadenceScheduler, WsTransportFactory};

struct FixedPosts {
    latest: Option<DateTime<Utc>>,
    batches: Mutex<Vec<EventBatch>>,
}

impl PostsView for FixedPosts {
    fn latest_post_date(&self) -> Option<DateTime<Utc>> {
        self.latest
    }

    fn add_posts(&self, posts: EventBatch) {
        self.batches.lock().unwrap().push(posts);
    }
}

#[derive(Default)]
struct RecordingToasts {
    calls: Arc<Mutex<Vec<String>>>,
}

struct RecordingHandle {
    calls: Arc<Mutex<Vec<String>>>,
}

impl ToastView for RecordingToasts {
    fn show(&self, message: &str) -> Box<dyn ToastHandle> {
        self.calls.lock().unwrap().push(format!("show:{message}"));
        Box::new(RecordingHandle {
            calls: Arc::clone(&self.calls),
        })
    }
}

impl ToastHandle for RecordingHandle {
    fn hide(self: Box<Self>) {
        self.calls.lock().unwrap().push("hide".to_string());
    }
}

async fn wait_for(what: &str, mut condition: impl FnMut() -> bool) {
    timeout(Duration::from_secs(5), async {
        while !condition() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {what}"));
}

#[tokio::test]
async fn test_reconnects_with_cursor_and_recovers_notice() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = format!("http://{}/", listener.local_addr().unwrap());
    let uris = Arc::new(Mutex::new(Vec::new()));
    let (done_tx, done_rx) = oneshot::channel::<()>();

    let server_uris = Arc::clone(&uris);
    let server = tokio::spawn(async move {
        // First session: one batch, then a server-initiated close
        let (stream, _) = listener.accept().await.unwrap();
        let record = Arc::clone(&server_uris);
        let mut ws = accept_hdr_async(
            stream,
            move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                record.lock().unwrap().push(req.uri().to_string());
                Ok(resp)
            },
        )
        .await
        .unwrap();
        ws.send(Message::text(r#"[{"id":1},{"id":2}]"#)).await.unwrap();
        ws.send(Message::text("not json")).await.unwrap();
        let _ = ws.close(None).await;

        // Second session: stays open until the client stops
        let (stream, _) = listener.accept().await.unwrap();
        let record = Arc::clone(&server_uris);
        let mut ws = accept_hdr_async(
            stream,
            move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                record.lock().unwrap().push(req.uri().to_string());
                Ok(resp)
            },
        )
        .await
        .unwrap();
        let _ = done_rx.await;
        while let Some(Ok(message)) = ws.next().await {
            if message.is_close() {
                break;
            }
        }
    });

    let settings = LiveUpdateSettings {
        retry_delay_ms: Some(100),
        ..LiveUpdateSettings::with_defaults()
    };
    let posts = Arc::new(FixedPosts {
        latest: Utc.timestamp_millis_opt(1000).single(),
        batches: Mutex::new(Vec::new()),
    });
    let toasts = Arc::new(RecordingToasts::default());
    let ports = LiveUpdatePorts::new(
        posts.clone(),
        toasts.clone(),
        Arc::new(HostAddressBuilder::new(&host, &settings).unwrap()),
        Arc::new(WsTransportFactory::new()),
        Arc::new(PaintCadenceScheduler::spawn(settings.effective_paint_interval())),
    );

    let handle = LiveUpdateClient::new(ports, &settings).unwrap().start();

    wait_for("second connection", || uris.lock().unwrap().len() == 2).await;
    assert_eq!(
        *uris.lock().unwrap(),
        vec!["/updates?since=1000", "/updates?since=1000"]
    );

    wait_for("notice hidden", || toasts.calls.lock().unwrap().len() == 2).await;
    assert_eq!(
        *toasts.calls.lock().unwrap(),
        vec!["show:Unable to connect. Retrying…".to_string(), "hide".to_string()]
    );

    wait_for("batch delivered", || !posts.batches.lock().unwrap().is_empty()).await;
    let batches = posts.batches.lock().unwrap().clone();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[0].records()[0]["id"], 1);

    wait_for("connected state", || handle.state() == ConnectivityState::Connected).await;

    let _ = done_tx.send(());
    handle.stop().await;
    timeout(Duration::from_secs(5), server)
        .await
        .expect("server stalled")
        .unwrap();
}
