//! Resume domain model.
//!
//! The resume is the document being edited: personal info, an ordered list of
//! visible/hidden sections, the entry collections, layout settings, and the
//! ephemeral tailoring state. Every collection entry carries a stable,
//! caller-assigned identifier that is the only key used for update/delete
//! addressing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact and identity block shown at the top of the resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: Vec<String>,
}

/// The kinds of sections a resume can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

/// One slot in the display order, with its visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRef {
    pub kind: SectionKind,
    pub visible: bool,
}

/// A work-experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    /// Stable caller-assigned identifier (UUID format)
    pub id: String,
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub bullets: Vec<String>,
}

/// An education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// A skill entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub highlights: Vec<String>,
}

/// A certification entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub issued: String,
}

/// Paper size for rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    Letter,
}

/// Display-only layout settings. Mutations bypass the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    pub template: String,
    pub font_family: String,
    pub font_size: u8,
    pub page_size: PageSize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            template: "classic".to_string(),
            font_family: "Inter".to_string(),
            font_size: 11,
            page_size: PageSize::Letter,
        }
    }
}

/// Ephemeral editor state carried inside the document.
///
/// `original` holds the pristine copy saved when tailoring starts so a
/// discard can restore it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorFlags {
    pub is_tailoring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<Box<Resume>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_job: Option<String>,
}

/// The resume document.
///
/// The record identifier is assigned at creation but the remote store is
/// authoritative and may reassign it (identity healing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    /// Record identifier (UUID format)
    pub id: String,
    pub personal: PersonalInfo,
    pub summary: String,
    pub sections: Vec<SectionRef>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub settings: LayoutSettings,
    pub editor: EditorFlags,
}

impl Default for Resume {
    fn default() -> Self {
        Self::blank()
    }
}

impl Resume {
    /// Creates a blank resume with a fresh identifier and the default
    /// section order, all sections visible.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            personal: PersonalInfo::default(),
            summary: String::new(),
            sections: Self::default_sections(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            settings: LayoutSettings::default(),
            editor: EditorFlags::default(),
        }
    }

    /// The canonical section order for a new resume.
    pub fn default_sections() -> Vec<SectionRef> {
        [
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Certifications,
        ]
        .into_iter()
        .map(|kind| SectionRef {
            kind,
            visible: true,
        })
        .collect()
    }
}

/// Common accessor for collection entries addressed by stable id.
pub trait SectionEntry {
    fn entry_id(&self) -> &str;
}

macro_rules! impl_section_entry {
    ($($ty:ty),*) => {
        $(impl SectionEntry for $ty {
            fn entry_id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_section_entry!(
    ExperienceEntry,
    EducationEntry,
    SkillEntry,
    ProjectEntry,
    CertificationEntry
);
