//! Keep a local copy of the remote calendar.
//!
//! A calendar is downloaded once and kept forever; nothing checks whether the local copy is
//! outdated. Delete the file (or refresh explicitly) to get a new one.

use std::{
    fs::{rename, write},
    path::{Path, PathBuf},
};

use reqwest::Client;
use tracing::info;

use crate::{
    area::{Area, CALENDAR_FILE},
    error::Result,
};

static USER_AGENT: &str = concat!("muellmann/", env!("CARGO_PKG_VERSION"));

/// Where the calendar comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarSource {
    /// The calendar of an area below a base URL.
    Area { area: Area, base_url: String },
    /// A fixed calendar URL.
    Url(String),
}

impl CalendarSource {
    pub fn url(&self) -> String {
        match self {
            CalendarSource::Area { area, base_url } => area.calendar_url(base_url),
            CalendarSource::Url(url) => url.clone(),
        }
    }

    pub fn cache_file_name(&self) -> String {
        match self {
            CalendarSource::Area { area, .. } => area.cache_file_name(),
            CalendarSource::Url(_) => String::from(CALENDAR_FILE),
        }
    }
}

/// Downloads calendars into a cache directory.
#[derive(Debug, Clone)]
pub struct CalendarFetcher {
    client: Client,
    cache_dir: PathBuf,
    refresh: bool,
}

impl CalendarFetcher {
    /// Create a fetcher storing its files in `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            cache_dir: cache_dir.into(),
            refresh: false,
        })
    }

    /// Download even if a local copy exists.
    #[must_use]
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn cache_path(&self, source: &CalendarSource) -> PathBuf {
        self.cache_dir.join(source.cache_file_name())
    }

    /// Make sure the calendar of `source` exists locally and return its path.
    ///
    /// An existing file is returned as is. Otherwise the calendar is downloaded and the
    /// response body is stored verbatim.
    pub async fn ensure_local_file(&self, source: &CalendarSource) -> Result<PathBuf> {
        let path = self.cache_path(source);
        if !self.refresh && path.is_file() {
            return Ok(path);
        }
        let url = source.url();
        info!("Downloading from '{url}'");
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        store(&path, &body)?;
        Ok(path)
    }
}

/// Write via a temporary file so an interrupted write never leaves a partial calendar.
fn store(path: &Path, content: &[u8]) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    write(&partial, content)?;
    rename(&partial, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        fs::{read, read_to_string, write},
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use crate::{
        area::Area,
        error::Error,
        fetcher::{CalendarFetcher, CalendarSource},
    };

    static ICS: &str = include_str!("calendar/tests/abfuhrkalender.ics");

    /// Serve `body` with `status` to every connection and count the requests.
    async fn serve(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buffer = [0; 4096];
                let _ = stream.read(&mut buffer).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/calendar\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        (format!("http://{address}"), requests)
    }

    #[test]
    fn test_source_paths() {
        let area: Area = "petkum".parse().unwrap();
        let source = CalendarSource::Area {
            area,
            base_url: String::from("https://example.org/ics"),
        };
        assert_eq!(source.url(), "https://example.org/ics/petkum/abfuhrkalender.ics");
        assert_eq!(source.cache_file_name(), "petkum-abfuhrkalender.ics");
        let source = CalendarSource::Url(String::from("https://example.org/my.ics"));
        assert_eq!(source.url(), "https://example.org/my.ics");
        assert_eq!(source.cache_file_name(), "abfuhrkalender.ics");
    }

    #[tokio::test]
    async fn test_ensure_local_file_downloads_once() {
        let (base_url, requests) = serve("200 OK", ICS).await;
        let cache_dir = tempfile::tempdir().unwrap();
        let fetcher = CalendarFetcher::new(cache_dir.path()).unwrap();
        let source = CalendarSource::Area {
            area: Area::default(),
            base_url,
        };
        let first = fetcher.ensure_local_file(&source).await.unwrap();
        let second = fetcher.ensure_local_file(&source).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, cache_dir.path().join("jarssum-widdelswehr-abfuhrkalender.ics"));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert_eq!(read(&first).unwrap(), ICS.as_bytes());
    }

    /// An existing file is used without touching the network.
    #[tokio::test]
    async fn test_ensure_local_file_keeps_existing_file() {
        let cache_dir = tempfile::tempdir().unwrap();
        let path = cache_dir.path().join("abfuhrkalender.ics");
        write(&path, "stale").unwrap();
        let fetcher = CalendarFetcher::new(cache_dir.path()).unwrap();
        let source = CalendarSource::Url(String::from("http://127.0.0.1:9/abfuhrkalender.ics"));
        let ensured = fetcher.ensure_local_file(&source).await.unwrap();
        assert_eq!(ensured, path);
        assert_eq!(read_to_string(&path).unwrap(), "stale");
    }

    #[tokio::test]
    async fn test_ensure_local_file_refresh() {
        let (base_url, requests) = serve("200 OK", ICS).await;
        let cache_dir = tempfile::tempdir().unwrap();
        let path = cache_dir.path().join("abfuhrkalender.ics");
        write(&path, "stale").unwrap();
        let fetcher = CalendarFetcher::new(cache_dir.path()).unwrap().refresh(true);
        let source = CalendarSource::Url(format!("{base_url}/abfuhrkalender.ics"));
        fetcher.ensure_local_file(&source).await.unwrap();
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert_eq!(read_to_string(&path).unwrap(), ICS);
    }

    #[tokio::test]
    async fn test_ensure_local_file_http_error_is_not_cached() {
        let (base_url, requests) = serve("404 Not Found", "not found").await;
        let cache_dir = tempfile::tempdir().unwrap();
        let fetcher = CalendarFetcher::new(cache_dir.path()).unwrap();
        let source = CalendarSource::Url(format!("{base_url}/abfuhrkalender.ics"));
        let result = fetcher.ensure_local_file(&source).await;
        assert!(matches!(result, Err(Error::Network(_))));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert!(!fetcher.cache_path(&source).exists());
    }

    #[tokio::test]
    async fn test_ensure_local_file_network_error() {
        let cache_dir = tempfile::tempdir().unwrap();
        let fetcher = CalendarFetcher::new(cache_dir.path()).unwrap();
        let source = CalendarSource::Url(String::from("http://127.0.0.1:9/abfuhrkalender.ics"));
        let result = fetcher.ensure_local_file(&source).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
