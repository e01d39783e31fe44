use serde::{Deserialize, Serialize};

use super::identity::{TabId, WindowId};

/// Load status reported by the content host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

/// The request that triggered an auth challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Challenge parameters as reported by the network layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_proxy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

/// Pending basic-auth challenge attached to a tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequiredDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<AuthRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_info: Option<AuthInfo>,
}

impl LoginRequiredDetail {
    pub fn is_empty(&self) -> bool {
        self.request.is_none() && self.auth_info.is_none()
    }

    /// Merges `other` into `self` key by key; present keys overwrite.
    pub fn merge(&mut self, other: LoginRequiredDetail) {
        if let Some(request) = other.request {
            let mine = self.request.get_or_insert_with(AuthRequest::default);
            merge_opt(&mut mine.url, request.url);
            merge_opt(&mut mine.method, request.method);
        }
        if let Some(info) = other.auth_info {
            let mine = self.auth_info.get_or_insert_with(AuthInfo::default);
            merge_opt(&mut mine.is_proxy, info.is_proxy);
            merge_opt(&mut mine.scheme, info.scheme);
            merge_opt(&mut mine.host, info.host);
            merge_opt(&mut mine.port, info.port);
            merge_opt(&mut mine.realm, info.realm);
        }
    }
}

/// One navigation entry. Not yet captured from the host, always empty today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
}

/// A tab as held in the store.
///
/// `window_uuid` is derived: the stores recompute it from `window_id` on
/// every write, so anything set here by a caller is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<TabId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
    #[serde(default, rename = "windowUUID", skip_serializing_if = "Option::is_none")]
    pub window_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_muted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TabStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incognito: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_required_detail: Option<LoginRequiredDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

impl TabRecord {
    /// Minimal record holding only a live id.
    pub fn placeholder(tab_id: TabId) -> Self {
        Self {
            tab_id: Some(tab_id),
            ..Self::default()
        }
    }

    /// Applies a partial update field by field.
    ///
    /// Scalars overwrite when present in the patch. The auth detail merges key
    /// by key unless the patch clears it. An existing uuid is never replaced.
    pub fn apply(&mut self, patch: TabPatch) {
        merge_opt(&mut self.tab_id, patch.tab_id);
        if self.uuid.is_none() {
            self.uuid = patch.uuid;
        }
        merge_opt(&mut self.window_id, patch.window_id);
        merge_opt(&mut self.url, patch.url);
        merge_opt(&mut self.title, patch.title);
        merge_opt(&mut self.favicon_url, patch.favicon_url);
        merge_opt(&mut self.active, patch.active);
        merge_opt(&mut self.audio_muted, patch.audio_muted);
        merge_opt(&mut self.audible, patch.audible);
        merge_opt(&mut self.status, patch.status);
        merge_opt(&mut self.incognito, patch.incognito);
        merge_opt(&mut self.pinned, patch.pinned);
        merge_opt(&mut self.history, patch.history);
        match patch.login_required_detail {
            None => {}
            Some(None) => self.login_required_detail = None,
            Some(Some(detail)) => match self.login_required_detail.as_mut() {
                Some(existing) => existing.merge(detail),
                None => self.login_required_detail = Some(detail),
            },
        }
    }
}

/// Partial update for a tab. Absent fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabPatch {
    pub tab_id: Option<TabId>,
    pub uuid: Option<String>,
    pub window_id: Option<WindowId>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub favicon_url: Option<String>,
    pub active: Option<bool>,
    pub audio_muted: Option<bool>,
    pub audible: Option<bool>,
    pub status: Option<TabStatus>,
    pub incognito: Option<bool>,
    pub pinned: Option<bool>,
    /// `Some(None)` clears the stored detail.
    pub login_required_detail: Option<Option<LoginRequiredDetail>>,
    pub history: Option<Vec<HistoryEntry>>,
}

impl TabPatch {
    pub fn for_tab(tab_id: TabId) -> Self {
        Self {
            tab_id: Some(tab_id),
            ..Self::default()
        }
    }
}

impl From<TabRecord> for TabPatch {
    fn from(record: TabRecord) -> Self {
        Self {
            tab_id: record.tab_id,
            uuid: record.uuid,
            window_id: record.window_id,
            url: record.url,
            title: record.title,
            favicon_url: record.favicon_url,
            active: record.active,
            audio_muted: record.audio_muted,
            audible: record.audible,
            status: record.status,
            incognito: record.incognito,
            pinned: record.pinned,
            login_required_detail: record.login_required_detail.map(Some),
            history: record.history,
        }
    }
}

fn merge_opt<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}
