use reqwest::Url;
use tracing::warn;

use crate::host::HostSnapshot;
use crate::notice::NoticeError;

/// Server route that creates a notice from an existing post.
pub const NOTICE_WITH_BUTTON_SUFFIX: &str = "/api/v1/create-notice-with-button";

/// Server route that creates a notice from a submitted dialog.
pub const NOTICE_WITH_COMMAND_SUFFIX: &str = "/api/v1/create-notice-with-command";

/// Server route that creates a notice from the web editor's multipart form.
pub const NOTICE_WITH_EDITOR_SUFFIX: &str = "/api/v1/create-notice-with-editor";

/// Server route the host calls for `/mbotc` slash commands.
pub const SLASH_COMMAND_SUFFIX: &str = "/api/v1/command";

/// Path component of the host's site URL, without trailing slashes.
///
/// Returns an empty string when no site URL is configured or it cannot be
/// parsed, so routes fall back to the origin root. Leading slashes collapse to
/// one: a path like `//other` would otherwise join as a scheme-relative URL
/// and leave the origin's host.
pub fn base_path(site_url: Option<&str>) -> String {
    let Some(site_url) = site_url.filter(|s| !s.is_empty()) else {
        return String::new();
    };

    let url = match Url::parse(site_url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Ignoring unparseable site URL '{}': {}", site_url, e);
            return String::new();
        }
    };

    let path = url.path().trim_matches('/');
    if path.is_empty() {
        String::new()
    } else {
        format!("/{}", path)
    }
}

/// Root of everything this plugin serves, e.g. `/sub/plugins/mbotc`.
pub fn plugin_server_route(site_url: Option<&str>, plugin_id: &str) -> String {
    format!("{}/plugins/{}", base_path(site_url), plugin_id)
}

/// Absolute URL the header menu action posts to.
pub fn notice_target_url(snapshot: &HostSnapshot, plugin_id: &str) -> Result<Url, NoticeError> {
    let route = plugin_server_route(snapshot.site_url.as_deref(), plugin_id);
    let path = format!("{}{}", route, NOTICE_WITH_BUTTON_SUFFIX);
    snapshot
        .origin
        .join(&path)
        .map_err(|e| NoticeError::InvalidTargetUrl(format!("{}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(site_url: Option<&str>, origin: &str) -> HostSnapshot {
        HostSnapshot {
            site_url: site_url.map(str::to_string),
            origin: Url::parse(origin).unwrap(),
        }
    }

    #[test]
    fn test_base_path_strips_trailing_slash() {
        assert_eq!(base_path(Some("https://host.example/sub/")), "/sub");
    }

    #[test]
    fn test_base_path_without_site_url() {
        assert_eq!(base_path(None), "");
        assert_eq!(base_path(Some("")), "");
    }

    #[test]
    fn test_base_path_root_site_url() {
        assert_eq!(base_path(Some("https://chat.example")), "");
        assert_eq!(base_path(Some("https://chat.example/")), "");
    }

    #[test]
    fn test_base_path_nested() {
        assert_eq!(base_path(Some("https://chat.example/a/b")), "/a/b");
    }

    #[test]
    fn test_base_path_strips_repeated_slashes() {
        assert_eq!(base_path(Some("https://host.example/sub//")), "/sub");
        assert_eq!(base_path(Some("https://host.example//other/x/")), "/other/x");
    }

    #[test]
    fn test_notice_target_url_stays_on_origin_for_double_slash_site_path() {
        let url = notice_target_url(
            &snapshot(Some("https://chat.example//evil.example/"), "https://chat.example"),
            "mbotc",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("chat.example"));
        assert_eq!(
            url.path(),
            "/evil.example/plugins/mbotc/api/v1/create-notice-with-button"
        );
    }

    #[test]
    fn test_base_path_unparseable() {
        assert_eq!(base_path(Some("not a url")), "");
    }

    #[test]
    fn test_plugin_server_route() {
        assert_eq!(
            plugin_server_route(Some("https://host.example/sub/"), "mbotc"),
            "/sub/plugins/mbotc"
        );
        assert_eq!(plugin_server_route(None, "mbotc"), "/plugins/mbotc");
    }

    #[test]
    fn test_notice_target_url_with_subpath() {
        let url = notice_target_url(
            &snapshot(Some("https://chat.example/team"), "https://chat.example"),
            "mbotc",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://chat.example/team/plugins/mbotc/api/v1/create-notice-with-button"
        );
    }

    #[test]
    fn test_notice_target_url_resolves_against_origin() {
        let url = notice_target_url(&snapshot(None, "http://localhost:8065/some/page"), "mbotc")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8065/plugins/mbotc/api/v1/create-notice-with-button"
        );
    }
}
