use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::graph::lanes::BranchKind;

/// Spacing, threshold, and color settings for the layout engine.
///
/// The defaults match the wide (desktop) layout; [`LayoutConfig::compact`]
/// is the narrow variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between adjacent lanes.
    pub lane_spacing: f32,
    /// Vertical distance between distinct commit timestamps.
    pub commit_spacing: f32,
    /// x of lane 0.
    pub start_x: f32,
    /// y of the newest timestamp.
    pub start_y: f32,
    /// Fork edges between commits closer than this are suppressed.
    pub fork_suppression_secs: i64,
    pub branch_colors: BranchColorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchColorSettings {
    pub default_branch_color: String, // hex color
    pub develop_color: String,
    pub release_color: String,
    pub feature_color: String,
    pub bugfix_color: String,
    pub hotfix_color: String,
    pub other_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lane_spacing: 200.0,
            commit_spacing: 100.0,
            start_x: 350.0,
            start_y: 120.0,
            fork_suppression_secs: 5 * 60,
            branch_colors: BranchColorSettings::default(),
        }
    }
}

impl LayoutConfig {
    /// Tighter spacing for narrow viewports.
    pub fn compact() -> Self {
        Self {
            lane_spacing: 100.0,
            commit_spacing: 60.0,
            start_x: 200.0,
            start_y: 80.0,
            ..Self::default()
        }
    }

    pub fn fork_suppression(&self) -> Duration {
        Duration::seconds(self.fork_suppression_secs)
    }

    pub fn load() -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("gitviz-rs").join("config.json");
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = serde_json::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("gitviz-rs");
            std::fs::create_dir_all(&app_config_dir)?;

            let config_path = app_config_dir.join("config.json");
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, content)?;
        }
        Ok(())
    }
}

impl Default for BranchColorSettings {
    fn default() -> Self {
        Self {
            default_branch_color: "#3b82f6".to_string(), // blue
            develop_color: "#10b981".to_string(),        // emerald
            release_color: "#f97316".to_string(),        // orange
            feature_color: "#8b5cf6".to_string(),        // violet
            bugfix_color: "#059669".to_string(),         // green
            hotfix_color: "#ef4444".to_string(),         // red
            other_color: "#6b7280".to_string(),          // gray
        }
    }
}

impl BranchColorSettings {
    /// The default branch always takes the default-branch color regardless
    /// of its name-derived kind.
    pub fn color_for(&self, kind: BranchKind, is_default: bool) -> &str {
        if is_default {
            return &self.default_branch_color;
        }
        match kind {
            BranchKind::Main => &self.default_branch_color,
            BranchKind::Develop => &self.develop_color,
            BranchKind::Release => &self.release_color,
            BranchKind::Feature => &self.feature_color,
            BranchKind::Bugfix => &self.bugfix_color,
            BranchKind::Hotfix => &self.hotfix_color,
            BranchKind::Other => &self.other_color,
        }
    }
}
