//! Pure reducer over the resume document plus its bounded history.
//!
//! `EditorState::apply` never fails: actions that cannot be applied (an
//! update addressing a missing id, a discard with no saved copy, an undo at
//! the bottom of the log) return the input state unchanged.

use std::sync::Arc;

use super::action::ResumeAction;
use super::history::History;
use super::model::{Resume, SectionEntry, SectionKind, SectionRef};

/// The reducer state: the visible document and the undo/redo log.
#[derive(Debug, Clone)]
pub struct EditorState {
    resume: Arc<Resume>,
    history: History,
}

impl EditorState {
    /// Creates a state whose history is seeded with the given document.
    pub fn new(resume: Resume) -> Self {
        let resume = Arc::new(resume);
        let history = History::new(resume.clone());
        Self { resume, history }
    }

    /// The currently visible document.
    pub fn resume(&self) -> &Arc<Resume> {
        &self.resume
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of snapshots currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Position of the cursor inside the log.
    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    /// Applies one action, returning the successor state.
    pub fn apply(&self, action: &ResumeAction) -> EditorState {
        let mut next = self.clone();
        match action {
            ResumeAction::Load { resume } => {
                return EditorState::new(resume.clone());
            }
            ResumeAction::Reset => {
                return EditorState::new(Resume::blank());
            }

            ResumeAction::SetPersonal { personal } => {
                Arc::make_mut(&mut next.resume).personal = personal.clone();
            }
            ResumeAction::SetSummary { summary } => {
                Arc::make_mut(&mut next.resume).summary = summary.clone();
            }
            ResumeAction::AddExperience { entry } => {
                Arc::make_mut(&mut next.resume).experience.push(entry.clone());
            }
            ResumeAction::UpdateExperience { entry } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !update_entry(&mut doc.experience, entry.clone()) {
                    return self.clone();
                }
            }
            ResumeAction::RemoveExperience { id } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !remove_entry(&mut doc.experience, id) {
                    return self.clone();
                }
            }
            ResumeAction::AddEducation { entry } => {
                Arc::make_mut(&mut next.resume).education.push(entry.clone());
            }
            ResumeAction::UpdateEducation { entry } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !update_entry(&mut doc.education, entry.clone()) {
                    return self.clone();
                }
            }
            ResumeAction::RemoveEducation { id } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !remove_entry(&mut doc.education, id) {
                    return self.clone();
                }
            }
            ResumeAction::AddSkill { entry } => {
                Arc::make_mut(&mut next.resume).skills.push(entry.clone());
            }
            ResumeAction::UpdateSkill { entry } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !update_entry(&mut doc.skills, entry.clone()) {
                    return self.clone();
                }
            }
            ResumeAction::RemoveSkill { id } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !remove_entry(&mut doc.skills, id) {
                    return self.clone();
                }
            }
            ResumeAction::AddProject { entry } => {
                Arc::make_mut(&mut next.resume).projects.push(entry.clone());
            }
            ResumeAction::UpdateProject { entry } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !update_entry(&mut doc.projects, entry.clone()) {
                    return self.clone();
                }
            }
            ResumeAction::RemoveProject { id } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !remove_entry(&mut doc.projects, id) {
                    return self.clone();
                }
            }
            ResumeAction::AddCertification { entry } => {
                Arc::make_mut(&mut next.resume)
                    .certifications
                    .push(entry.clone());
            }
            ResumeAction::UpdateCertification { entry } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !update_entry(&mut doc.certifications, entry.clone()) {
                    return self.clone();
                }
            }
            ResumeAction::RemoveCertification { id } => {
                let doc = Arc::make_mut(&mut next.resume);
                if !remove_entry(&mut doc.certifications, id) {
                    return self.clone();
                }
            }
            ResumeAction::ReorderSections { order } => {
                let doc = Arc::make_mut(&mut next.resume);
                doc.sections = reorder_sections(&doc.sections, order);
            }
            ResumeAction::SetSectionVisible { kind, visible } => {
                let doc = Arc::make_mut(&mut next.resume);
                match doc.sections.iter_mut().find(|s| s.kind == *kind) {
                    Some(section) => section.visible = *visible,
                    None => return self.clone(),
                }
            }

            ResumeAction::SetTemplate { template } => {
                Arc::make_mut(&mut next.resume).settings.template = template.clone();
                return next;
            }
            ResumeAction::SetFontFamily { font_family } => {
                Arc::make_mut(&mut next.resume).settings.font_family = font_family.clone();
                return next;
            }
            ResumeAction::SetFontSize { font_size } => {
                Arc::make_mut(&mut next.resume).settings.font_size = *font_size;
                return next;
            }
            ResumeAction::SetPageSize { page_size } => {
                Arc::make_mut(&mut next.resume).settings.page_size = *page_size;
                return next;
            }

            ResumeAction::Undo => {
                if let Some(snapshot) = next.history.undo() {
                    next.resume = snapshot;
                }
                return next;
            }
            ResumeAction::Redo => {
                if let Some(snapshot) = next.history.redo() {
                    next.resume = snapshot;
                }
                return next;
            }
            ResumeAction::StartTailoring { target_job } => {
                if next.resume.editor.is_tailoring {
                    return self.clone();
                }
                let pristine = (*next.resume).clone();
                let doc = Arc::make_mut(&mut next.resume);
                doc.editor.original = Some(Box::new(pristine));
                doc.editor.is_tailoring = true;
                doc.editor.target_job = Some(target_job.clone());
                return next;
            }
            ResumeAction::ApplyTailoring => {
                if !next.resume.editor.is_tailoring {
                    return self.clone();
                }
                let doc = Arc::make_mut(&mut next.resume);
                doc.editor.is_tailoring = false;
                doc.editor.original = None;
                return next;
            }
            ResumeAction::DiscardTailoring => {
                match next.resume.editor.original.clone() {
                    Some(pristine) => next.resume = Arc::new(*pristine),
                    None => return self.clone(),
                }
                return next;
            }
            ResumeAction::SetTargetJob { target_job } => {
                Arc::make_mut(&mut next.resume).editor.target_job = target_job.clone();
                return next;
            }
        }

        // Only the history-eligible patch arms fall through to here.
        next.history.push(next.resume.clone());
        next
    }
}

/// Replaces the entry whose id matches. Returns false when no entry matches.
fn update_entry<T: SectionEntry>(entries: &mut Vec<T>, replacement: T) -> bool {
    match entries
        .iter_mut()
        .find(|e| e.entry_id() == replacement.entry_id())
    {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}

/// Removes the entry whose id matches. Returns false when no entry matches.
fn remove_entry<T: SectionEntry>(entries: &mut Vec<T>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.entry_id() != id);
    entries.len() != before
}

/// Rebuilds the section list in the requested kind order, preserving each
/// section's visibility. Kinds absent from the request keep their relative
/// order at the end.
fn reorder_sections(current: &[SectionRef], order: &[SectionKind]) -> Vec<SectionRef> {
    let mut remaining: Vec<SectionRef> = current.to_vec();
    let mut result = Vec::with_capacity(current.len());
    for kind in order {
        if let Some(pos) = remaining.iter().position(|s| s.kind == *kind) {
            result.push(remaining.remove(pos));
        }
    }
    result.extend(remaining);
    result
}
