//! The reducer action vocabulary.
//!
//! Actions fall into four categories:
//! - full replacement (`Load`, `Reset`) used for hydration, profile switch
//!   and explicit reset;
//! - history-eligible patches of one named part of the document;
//! - cosmetic settings changes that intentionally bypass history;
//! - history-cursor and tailoring side-channel manipulation.

use serde::{Deserialize, Serialize};

use super::model::{
    CertificationEntry, EducationEntry, ExperienceEntry, PageSize, PersonalInfo, ProjectEntry,
    Resume, SectionKind, SkillEntry,
};

/// A state transition over the resume document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResumeAction {
    // Full replacement
    Load { resume: Resume },
    Reset,

    // History-eligible patches
    SetPersonal { personal: PersonalInfo },
    SetSummary { summary: String },
    AddExperience { entry: ExperienceEntry },
    UpdateExperience { entry: ExperienceEntry },
    RemoveExperience { id: String },
    AddEducation { entry: EducationEntry },
    UpdateEducation { entry: EducationEntry },
    RemoveEducation { id: String },
    AddSkill { entry: SkillEntry },
    UpdateSkill { entry: SkillEntry },
    RemoveSkill { id: String },
    AddProject { entry: ProjectEntry },
    UpdateProject { entry: ProjectEntry },
    RemoveProject { id: String },
    AddCertification { entry: CertificationEntry },
    UpdateCertification { entry: CertificationEntry },
    RemoveCertification { id: String },
    ReorderSections { order: Vec<SectionKind> },
    SetSectionVisible { kind: SectionKind, visible: bool },

    // Cosmetic settings (bypass history)
    SetTemplate { template: String },
    SetFontFamily { font_family: String },
    SetFontSize { font_size: u8 },
    SetPageSize { page_size: PageSize },

    // History cursor and tailoring side-channel
    Undo,
    Redo,
    StartTailoring { target_job: String },
    ApplyTailoring,
    DiscardTailoring,
    SetTargetJob { target_job: Option<String> },
}

impl ResumeAction {
    /// Whether applying this action pushes a snapshot onto the undo log.
    pub fn is_history_eligible(&self) -> bool {
        matches!(
            self,
            Self::SetPersonal { .. }
                | Self::SetSummary { .. }
                | Self::AddExperience { .. }
                | Self::UpdateExperience { .. }
                | Self::RemoveExperience { .. }
                | Self::AddEducation { .. }
                | Self::UpdateEducation { .. }
                | Self::RemoveEducation { .. }
                | Self::AddSkill { .. }
                | Self::UpdateSkill { .. }
                | Self::RemoveSkill { .. }
                | Self::AddProject { .. }
                | Self::UpdateProject { .. }
                | Self::RemoveProject { .. }
                | Self::AddCertification { .. }
                | Self::UpdateCertification { .. }
                | Self::RemoveCertification { .. }
                | Self::ReorderSections { .. }
                | Self::SetSectionVisible { .. }
        )
    }

    /// Whether this action only touches display settings.
    pub fn is_cosmetic(&self) -> bool {
        matches!(
            self,
            Self::SetTemplate { .. }
                | Self::SetFontFamily { .. }
                | Self::SetFontSize { .. }
                | Self::SetPageSize { .. }
        )
    }

    /// Decodes an action from its serialized form.
    ///
    /// Unknown or malformed action payloads yield `None` so that version
    /// skew between a UI shell and this core degrades to a no-op instead of
    /// an error.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(action) => Some(action),
            Err(err) => {
                tracing::debug!("[Reducer] Ignoring unknown action payload: {}", err);
                None
            }
        }
    }
}
