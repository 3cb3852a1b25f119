//! A tiny HTTP/1.1 server on localhost for exercising the network paths.

use std::{sync::Arc, time::Duration};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

use crate::{ScrapingConfig, ScrapingContext};

/// What to send back for a request path. `None` never answers, so the
/// client runs into its timeout.
pub type Responder = dyn Fn(&str) -> Option<(u16, String)> + Send + Sync;

/// Serves `respond` until the test's runtime shuts down and returns a base
/// URL template pointing at it.
pub async fn serve(respond: Arc<Responder>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let respond = Arc::clone(&respond);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                match respond(&path) {
                    Some((status, body)) => {
                        let response = format!(
                            "HTTP/1.1 {status} Fixture\r\nContent-Type: text/html\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    None => tokio::time::sleep(Duration::from_secs(60)).await,
                }
            });
        }
    });

    format!("http://{addr}/year/")
}

pub fn always(status: u16, body: &str) -> Arc<Responder> {
    let body = body.to_string();
    Arc::new(move |_: &str| Some((status, body.clone())))
}

pub fn never() -> Arc<Responder> {
    Arc::new(|_: &str| None)
}

/// Context talking to a local server, with a short timeout and no real
/// rate limiting.
pub fn context(base_url: &str) -> ScrapingContext {
    let mut config = ScrapingConfig::with_base_url(base_url);
    config.request_timeout = Duration::from_millis(300);
    config.requests_per_sec = nonzero_ext::nonzero!(1000u32);
    ScrapingContext::with_config(config).unwrap()
}
