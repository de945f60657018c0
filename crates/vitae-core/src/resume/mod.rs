//! The resume document, its action vocabulary, and the reducer.

pub mod action;
pub mod history;
pub mod model;
pub mod reducer;

pub use action::ResumeAction;
pub use history::{HISTORY_LIMIT, History};
pub use model::{
    CertificationEntry, EditorFlags, EducationEntry, ExperienceEntry, LayoutSettings, PageSize,
    PersonalInfo, ProjectEntry, Resume, SectionEntry, SectionKind, SectionRef, SkillEntry,
};
pub use reducer::EditorState;
