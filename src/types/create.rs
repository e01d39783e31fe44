use serde::{Deserialize, Serialize};

use super::identity::{TabId, WindowId};

/// Parameters for opening a new tab, in the `tabs.create` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `WindowId::CURRENT` and absent both mean the focused window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opener_tab_id: Option<TabId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Older alias of `active`. Either flag left unset or true keeps the tab
    /// in the foreground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl CreateProperties {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Background only when both `active` and `selected` are explicitly false.
    pub fn is_active(&self) -> bool {
        self.active != Some(false) || self.selected != Some(false)
    }
}

/// How the host should present a newly attached view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Disposition {
    ForegroundTab,
    BackgroundTab,
}

impl Disposition {
    pub fn for_properties(props: &CreateProperties) -> Self {
        if props.is_active() {
            Disposition::ForegroundTab
        } else {
            Disposition::BackgroundTab
        }
    }
}
