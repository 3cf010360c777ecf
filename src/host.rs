//! Capabilities the embedding host provides.
//!
//! The plugin only talks to the host through these traits, so nothing in the
//! core depends on a particular chat frontend.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;
pub type MenuHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Button shown in the channel header.
pub struct HeaderAction {
    pub icon: &'static str,
    pub tooltip: String,
    pub on_click: ClickHandler,
}

/// Entry in a post's dropdown menu. The handler receives the post id.
pub struct MenuAction {
    pub label: String,
    pub on_click: MenuHandler,
}

impl fmt::Debug for HeaderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderAction")
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

pub trait HostRegistry {
    fn register_header_action(&mut self, action: HeaderAction);
    fn register_menu_action(&mut self, action: MenuAction);
}

/// Host configuration as seen at the moment an action fires.
#[derive(Debug, Clone)]
pub struct HostSnapshot {
    /// The host's configured site URL, if any
    pub site_url: Option<String>,
    /// Origin of the page the plugin runs in; relative routes resolve here
    pub origin: Url,
}

pub trait HostState: Send + Sync {
    fn snapshot(&self) -> HostSnapshot;
}

/// Opens a URL in a new tab or window.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str);
}
