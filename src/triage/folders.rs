//! Smart-folder mapping — category and urgency flag to a folder name.

use std::collections::HashMap;

use crate::config::FolderNames;
use crate::model::{Category, EmailThread, TriageResult};

/// Maps triage outcomes onto configured folder names.
pub struct FolderMapper {
    folders: FolderNames,
}

impl FolderMapper {
    pub fn new(folders: FolderNames) -> Self {
        Self { folders }
    }

    /// Folder for a triage outcome. The urgency flag wins over the
    /// category, so an urgent newsletter still lands in the urgent folder.
    pub fn folder_for(&self, category: Category, is_urgent: bool) -> String {
        if is_urgent {
            return self.folders.urgent.clone();
        }
        match category {
            Category::Urgent => self.folders.urgent.clone(),
            Category::FollowUp => self.folders.follow_up.clone(),
            Category::Meeting => self.folders.meetings.clone(),
            Category::Newsletter => self.folders.newsletters.clone(),
            Category::Promotion => self.folders.promotions.clone(),
            Category::Other => self.folders.other.clone(),
        }
    }
}

/// Group triaged threads by their suggested folder, preserving input
/// order within each folder.
pub fn group_by_folder(
    entries: Vec<(EmailThread, TriageResult)>,
) -> HashMap<String, Vec<EmailThread>> {
    let mut by_folder: HashMap<String, Vec<EmailThread>> = HashMap::new();
    for (thread, result) in entries {
        by_folder
            .entry(result.suggested_folder)
            .or_default()
            .push(thread);
    }
    by_folder
}
