//! Opening store pages for reinstallation
//!
//! The native deep link is preferred when something can handle it; the web
//! URL is used otherwise. Failures come back as a `StoreOpenResult` instead
//! of an error so callers can show store-specific guidance.

use std::io::ErrorKind;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AppStore, StoreOpenResult};

/// Why a link could not be opened
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("no handler available for {0}")]
    NoHandler(String),

    #[error("{0}")]
    Failed(String),
}

/// Something that can hand a URI to the platform
pub trait LinkOpener {
    /// Whether an installed handler claims this URI
    fn can_handle(&self, uri: &str) -> bool;

    fn open(&self, uri: &str) -> Result<(), OpenError>;
}

/// Opens links with the desktop's default handler
///
/// Store deep links have no desktop handler, so only web URLs are claimed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(uri: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(uri);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", uri]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(uri);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn can_handle(&self, uri: &str) -> bool {
        uri.starts_with("https://") || uri.starts_with("http://")
    }

    fn open(&self, uri: &str) -> Result<(), OpenError> {
        match Self::command(uri).status() {
            Ok(status) => exit_outcome(uri, status.code()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(OpenError::NoHandler(uri.to_string())),
            Err(e) => Err(OpenError::Failed(e.to_string())),
        }
    }
}

/// Map the launcher's exit code; `xdg-open` exits 3 when no tool can open the URI
fn exit_outcome(uri: &str, code: Option<i32>) -> Result<(), OpenError> {
    match code {
        Some(0) => Ok(()),
        Some(3) => Err(OpenError::NoHandler(uri.to_string())),
        Some(code) => Err(OpenError::Failed(format!(
            "launcher exited with status {} for {}",
            code, uri
        ))),
        None => Err(OpenError::Failed(format!(
            "launcher was terminated while opening {}",
            uri
        ))),
    }
}

/// The URI that would be opened for a package: deep link if handled, else web
pub fn resolve_link(store: AppStore, package_name: &str, opener: &dyn LinkOpener) -> String {
    let deep_link = store.deep_link(package_name);
    if opener.can_handle(&deep_link) {
        deep_link
    } else {
        store.web_url(package_name)
    }
}

/// Open a package's page in the given store
pub fn open_in_store(
    store: AppStore,
    package_name: &str,
    opener: &dyn LinkOpener,
) -> StoreOpenResult {
    let uri = resolve_link(store, package_name, opener);
    debug!(store = %store, uri = %uri, "opening store page");

    match opener.open(&uri) {
        Ok(()) => StoreOpenResult::Success,
        Err(OpenError::NoHandler(_)) => {
            warn!(store = %store, "{}", store.missing_store_message());
            StoreOpenResult::NoAppFound
        }
        Err(OpenError::Failed(message)) => StoreOpenResult::Error(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingOpener {
        handles_deep_links: bool,
        outcome: fn(&str) -> Result<(), OpenError>,
        opened: RefCell<Vec<String>>,
    }

    impl RecordingOpener {
        fn new(handles_deep_links: bool, outcome: fn(&str) -> Result<(), OpenError>) -> Self {
            Self {
                handles_deep_links,
                outcome,
                opened: RefCell::new(Vec::new()),
            }
        }
    }

    impl LinkOpener for RecordingOpener {
        fn can_handle(&self, uri: &str) -> bool {
            self.handles_deep_links || uri.starts_with("https://")
        }

        fn open(&self, uri: &str) -> Result<(), OpenError> {
            self.opened.borrow_mut().push(uri.to_string());
            (self.outcome)(uri)
        }
    }

    #[test]
    fn test_prefers_deep_link() {
        let opener = RecordingOpener::new(true, |_| Ok(()));
        let result = open_in_store(AppStore::FDroid, "org.example.maps", &opener);

        assert_eq!(result, StoreOpenResult::Success);
        assert_eq!(
            opener.opened.borrow().as_slice(),
            ["fdroid.app://details?id=org.example.maps"]
        );
    }

    #[test]
    fn test_falls_back_to_web_url() {
        let opener = RecordingOpener::new(false, |_| Ok(()));
        open_in_store(AppStore::PlayStore, "org.example.maps", &opener);

        assert_eq!(
            opener.opened.borrow().as_slice(),
            ["https://play.google.com/store/apps/details?id=org.example.maps"]
        );
    }

    #[test]
    fn test_reports_missing_handler_and_errors() {
        let opener = RecordingOpener::new(false, |uri| Err(OpenError::NoHandler(uri.into())));
        assert_eq!(
            open_in_store(AppStore::Samsung, "org.example.maps", &opener),
            StoreOpenResult::NoAppFound
        );

        let opener = RecordingOpener::new(false, |_| Err(OpenError::Failed("boom".into())));
        assert_eq!(
            open_in_store(AppStore::Huawei, "org.example.maps", &opener),
            StoreOpenResult::Error("boom".into())
        );
    }

    #[test]
    fn test_launcher_exit_codes() {
        let uri = "https://f-droid.org/packages/org.example.maps";
        assert!(exit_outcome(uri, Some(0)).is_ok());
        assert!(matches!(exit_outcome(uri, Some(3)), Err(OpenError::NoHandler(_))));

        let err = exit_outcome(uri, Some(4)).unwrap_err();
        assert!(matches!(err, OpenError::Failed(_)));
        assert!(err.to_string().contains("status 4"));
        assert!(matches!(exit_outcome(uri, None), Err(OpenError::Failed(_))));
    }

    #[test]
    fn test_system_opener_claims_web_urls_only() {
        let opener = SystemOpener;
        assert!(opener.can_handle("https://f-droid.org/packages/org.example.maps"));
        assert!(!opener.can_handle("market://details?id=org.example.maps"));
        assert_eq!(
            resolve_link(AppStore::Amazon, "org.example.maps", &opener),
            "https://www.amazon.com/gp/mas/dl/android?p=org.example.maps"
        );
    }
}
