use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::host::{HeaderAction, HostRegistry, HostState, MenuAction, UrlOpener};
use crate::icon::{HEADER_ICON_SVG, HEADER_TOOLTIP, MENU_LABEL};
use crate::notice::NoticeRequest;
use crate::route::notice_target_url;
use crate::sender::{NoticeRequestSender, SendOutcome};

/// Client-side half of the plugin: binds host UI actions to the notice sender
/// and the external website.
pub struct Plugin {
    config: ClientConfig,
    sender: NoticeRequestSender,
}

impl Plugin {
    pub fn new(config: ClientConfig, runtime: Handle) -> Self {
        Self {
            config,
            sender: NoticeRequestSender::new(runtime),
        }
    }

    /// Entry point called once by whatever embeds the plugin.
    pub fn initialize(
        self: &Arc<Self>,
        registry: &mut dyn HostRegistry,
        state: Arc<dyn HostState>,
        opener: Arc<dyn UrlOpener>,
    ) {
        let client_url = self.config.client_url.clone();
        registry.register_header_action(HeaderAction {
            icon: HEADER_ICON_SVG,
            tooltip: HEADER_TOOLTIP.to_string(),
            on_click: Arc::new(move || opener.open(&client_url)),
        });

        let plugin = Arc::clone(self);
        registry.register_menu_action(MenuAction {
            label: MENU_LABEL.to_string(),
            on_click: Arc::new(move |message_id: &str| {
                plugin.create_notice(state.as_ref(), message_id);
            }),
        });

        info!("Plugin '{}' initialized", self.config.plugin_id);
    }

    /// Build and dispatch a notice request for `message_id`.
    ///
    /// Returns `None` when no request could be built; the reason is logged.
    pub fn create_notice(
        &self,
        state: &dyn HostState,
        message_id: &str,
    ) -> Option<JoinHandle<SendOutcome>> {
        let snapshot = state.snapshot();
        let request = notice_target_url(&snapshot, &self.config.plugin_id)
            .and_then(|url| NoticeRequest::new(url, message_id));

        match request {
            Ok(request) => Some(self.sender.dispatch(request)),
            Err(e) => {
                warn!("Dropping notice request for post '{}': {}", message_id, e);
                None
            }
        }
    }
}
